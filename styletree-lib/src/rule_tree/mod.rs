//! The rule tree: an ordered document keyed by selector and at-rule text,
//! with the decoder that builds it from CSS and the encoder that prints it back.

pub mod decode;
pub mod document;
pub mod encode;

pub use decode::{decode, decode_batch, decode_declaration, decode_stylesheet};
pub use document::{Document, Rule};
pub use encode::{encode, EncodeOptions};

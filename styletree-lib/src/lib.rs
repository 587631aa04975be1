//! Bidirectional codec between CSS text and an ordered rule tree.
//!
//! [`decode`] reads a stylesheet into a [`Document`] keyed by selector and
//! at-rule text; [`encode`] prints a document back as indented CSS.
//!
//! ```
//! use styletree_lib::{decode, encode, EncodeOptions};
//!
//! let document = decode("a[href^=\"https\"] { color: red }").unwrap();
//! let css = encode(&document, &EncodeOptions::default()).unwrap();
//! assert_eq!(css, "a[href^=\"https\"] {\n  color: red;\n}\n");
//! ```

pub mod error;
pub mod parser;
pub mod render;
pub mod rule_tree;
pub mod style;

pub use error::{EncodeError, Error, ParseError, RenderError, Result};
pub use rule_tree::{decode, decode_batch, encode, Document, EncodeOptions, Rule};

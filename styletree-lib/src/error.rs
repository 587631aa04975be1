//! Error types for decoding and encoding.

use std::path::PathBuf;

use crate::style::owned_css::{Location, Unrecognized};

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the library and the command-line wrapper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid rule tree JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// The stylesheet could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("CSS parse error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl From<&Unrecognized> for ParseError {
    fn from(node: &Unrecognized) -> Self {
        let Location { line, column } = node.location;
        ParseError::new(node.reason.clone(), line, column)
    }
}

/// A value the renderer refuses to print.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A `color()` space outside the known vocabulary.
    #[error("Unknown color space '{0}'")]
    UnknownColorSpace(String),
}

/// A document that does not have the shape the decoder produces.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("Declaration '{property}' is not inside any rule")]
    DeclarationAtRoot { property: String },

    #[error("Rule tree contains an empty key")]
    EmptyKey,
}

/// Errors raised while walking the token stream. They never leave the
/// parser: each one ends up as an unrecognized node or a verbatim fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SyntaxError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(&'static str),

    #[error("Invalid keyframe selector")]
    InvalidKeyframeSelector,

    #[error("Declaration has no value")]
    EmptyValue,

    #[error("Unexpected block in value")]
    UnexpectedBlock,

    #[error("Not a color")]
    InvalidColor,

    #[error("Not a length-percentage expression")]
    InvalidCalc,

    #[error("Invalid media feature")]
    InvalidFeature,
}

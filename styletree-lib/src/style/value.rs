use serde::Serialize;

use crate::style::calc::LengthPercentage;
use crate::style::color::CssColor;

/// One decoded property value, tagged by its kind.
///
/// The set of kinds is closed: the value renderer matches on every variant, so
/// adding a kind here forces the renderer to decide how to print it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A number with a unit, e.g. `100px` or `1fr`.
    Dimension(Dimension),
    /// A percentage, stored as the written number (`50%` is `50.0`).
    Percentage(f32),
    /// A bare number written with a fraction or exponent.
    Number(f32),
    /// A bare number written as an integer.
    Integer(i32),
    /// A quoted string literal.
    String(QuotedString),
    /// An identifier such as `auto`, `red` or `--main-color`.
    Keyword(String),
    Function(Function),
    Color(CssColor),
    /// A length-percentage, including `calc()`-family expressions.
    LengthPercentage(LengthPercentage),
    /// Space separated values.
    List(Vec<Value>),
    /// Comma separated values.
    CommaList(Vec<Value>),
    /// Source text the classifier keeps verbatim.
    Raw(String),
    /// A token the classifier has no model for.
    Unmodeled(Unmodeled),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub value: f32,
    pub unit: String,
}

impl Dimension {
    pub fn new(value: f32, unit: impl Into<String>) -> Self {
        Dimension {
            value,
            unit: unit.into(),
        }
    }
}

/// A string literal together with the quote character it was written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString {
    pub value: String,
    pub quote: char,
}

impl QuotedString {
    pub fn new(value: impl Into<String>, quote: char) -> Self {
        QuotedString {
            value: value.into(),
            quote,
        }
    }

    /// Picks the quote character out of the source text of a string token.
    /// Falls back to `"` when the token carries no quote (unterminated input).
    pub fn quote_from_source(source: &str) -> char {
        source
            .trim_end()
            .chars()
            .rev()
            .find(|c| *c == '"' || *c == '\'')
            .unwrap_or('"')
    }
}

/// A function call such as `repeat(3, 1fr)` or `var(--x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub args: FunctionArgs,
}

impl Function {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Function {
            name: name.into(),
            args: FunctionArgs::Parsed(args),
        }
    }

    pub fn verbatim(name: impl Into<String>, args: impl Into<String>) -> Self {
        Function {
            name: name.into(),
            args: FunctionArgs::Verbatim(args.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// Comma separated arguments, each possibly a space separated list.
    Parsed(Vec<Value>),
    /// Argument text forwarded as written.
    Verbatim(String),
}

/// What is left of a token the classifier cannot model.
///
/// `detail` holds whatever text the token carried; without it the renderer
/// has nothing structural to print and falls back to the sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unmodeled {
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Unmodeled {
    pub fn new(kind: impl Into<String>, detail: Option<String>) -> Self {
        Unmodeled {
            kind: kind.into(),
            detail,
        }
    }
}

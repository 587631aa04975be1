//! Reads CSS text into the owned syntax tree of [`crate::style`].
//!
//! Tokenizing is left to the `cssparser` crate; this module walks its token
//! stream by hand, the same way for top-level rules, nested blocks, selectors
//! and values. Nothing here fails on bad input except a stylesheet in which no
//! rule at all can be read: everything else degrades to an
//! [`Unrecognized`](crate::style::Unrecognized) node or a verbatim value.

mod preludes;
mod selectors;
mod stylesheet;
mod values;

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ToCss};

use crate::error::SyntaxError;
use crate::render::render_value;
use crate::style::value::Value;

pub use stylesheet::parse_stylesheet;

pub(crate) type SyntaxResult<'i, T> = Result<T, ParseError<'i, SyntaxError>>;

/// Whether `value` renders back to exactly `source`.
pub(crate) fn prints_as(value: &Value, source: &str) -> bool {
    render_value(value).is_ok_and(|text| text == source)
}

/// Keeps a numeric token as written when its parsed form would print
/// differently: `1e50px`, `3000000000`, `33.33333%`, `.5`.
pub(crate) fn exact_or_raw(value: Value, source: &str) -> Value {
    if prints_as(&value, source) {
        value
    } else {
        Value::Raw(source.to_owned())
    }
}

pub(crate) fn syntax_error<'i>(input: &Parser<'i, '_>, error: SyntaxError) -> ParseError<'i, SyntaxError> {
    input.new_custom_error(error)
}

/// Consumes every remaining token of the current block.
pub(crate) fn consume_rest<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, ()> {
    while input.next_including_whitespace_and_comments().is_ok() {}
    Ok(())
}

/// The written number of a percentage token: 50 for `50%`.
pub(crate) fn percentage_number(unit_value: f32, int_value: Option<i32>) -> f32 {
    match int_value {
        Some(int) => int as f32,
        // Percentages are stored divided by 100; undo that without f32 noise.
        None => ((f64::from(unit_value) * 1_000_000.0).round() / 10_000.0) as f32,
    }
}

pub(crate) fn describe_error(error: &ParseError<'_, SyntaxError>) -> String {
    match &error.kind {
        ParseErrorKind::Custom(custom) => custom.to_string(),
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("Unexpected token '{}'", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "Unexpected end of input".to_owned()
        }
        ParseErrorKind::Basic(other) => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_numbers_are_clean() {
        assert_eq!(percentage_number(0.5, Some(50)), 50.0);
        assert_eq!(percentage_number(0.333, None), 33.3);
        assert_eq!(percentage_number(0.125, None), 12.5);
    }

    #[test]
    fn numbers_that_print_differently_stay_raw() {
        assert_eq!(exact_or_raw(Value::Integer(2), "2"), Value::Integer(2));
        assert_eq!(exact_or_raw(Value::Integer(i32::MAX), "3000000000"), Value::Raw("3000000000".to_owned()));
        assert_eq!(exact_or_raw(Value::Number(0.5), ".5"), Value::Raw(".5".to_owned()));
        assert!(!prints_as(&Value::Number(f32::INFINITY), "1e50"));
    }
}

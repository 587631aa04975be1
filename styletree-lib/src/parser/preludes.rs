// src/parser/preludes.rs: what sits between an at-rule name and its block.
use cssparser::{Delimiter, ParseError, Parser, ToCss, Token};

use crate::error::SyntaxError;
use crate::parser::values::parse_component_value;
use crate::parser::{consume_rest, syntax_error, SyntaxResult};
use crate::style::prelude::{AtRulePrelude, ConditionToken, MediaFeature, MediaQuery};

/// Reads the whole prelude. `kind` is the lowercased name without vendor prefix.
pub(crate) fn parse_at_rule_prelude(input: &mut Parser<'_, '_>, kind: &str) -> AtRulePrelude {
    input.skip_whitespace();
    if input.is_exhausted() {
        return AtRulePrelude::Empty;
    }
    let start = input.position();
    let parsed = match kind {
        "media" => input.try_parse(parse_media_query_list).map(AtRulePrelude::Media),
        "supports" | "container" | "scope" => {
            input.try_parse(parse_condition).map(AtRulePrelude::Condition)
        }
        _ => input.try_parse(parse_component_value).map(AtRulePrelude::Value),
    };
    match parsed {
        Ok(prelude) => prelude,
        Err(_) => {
            let _ = consume_rest(input);
            AtRulePrelude::Raw(input.slice_from(start).trim().to_owned())
        }
    }
}

fn parse_media_query_list<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Vec<MediaQuery>> {
    let mut queries = Vec::new();
    loop {
        let tokens = input.parse_until_before(Delimiter::Comma, parse_condition)?;
        queries.push(MediaQuery { tokens });
        if input.try_parse(|input| input.expect_comma()).is_err() {
            break;
        }
    }
    Ok(queries)
}

/// Keywords and parenthesized groups, as in `screen and (min-width: 900px)`.
fn parse_condition<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Vec<ConditionToken>> {
    let mut tokens = Vec::new();
    loop {
        input.skip_whitespace();
        let start = input.position();
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let condition = match token {
            Token::Ident(name) => ConditionToken::Keyword(name.to_string()),
            Token::ParenthesisBlock => {
                let feature = input.parse_nested_block(|input| {
                    let feature = input.try_parse(parse_media_feature).ok();
                    if feature.is_none() {
                        consume_rest(input)?;
                    }
                    Ok::<_, ParseError<'i, SyntaxError>>(feature)
                })?;
                match feature {
                    Some(feature) => ConditionToken::Feature(feature),
                    None => ConditionToken::Raw(input.slice_from(start).to_owned()),
                }
            }
            Token::Function(_) => {
                input.parse_nested_block(consume_rest)?;
                ConditionToken::Raw(input.slice_from(start).to_owned())
            }
            other => ConditionToken::Raw(other.to_css_string()),
        };
        tokens.push(condition);
    }
    if tokens.is_empty() {
        return Err(syntax_error(input, SyntaxError::InvalidFeature));
    }
    Ok(tokens)
}

/// `(name)` or `(name: value)`, inside the parentheses.
fn parse_media_feature<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, MediaFeature> {
    let name = input.expect_ident_cloned()?.to_string();
    if input.is_exhausted() {
        return Ok(MediaFeature { name, value: None });
    }
    input.expect_colon()?;
    input.skip_whitespace();
    let value = parse_component_value(input)?;
    Ok(MediaFeature {
        name,
        value: Some(value),
    })
}

#[cfg(test)]
mod tests {
    use cssparser::ParserInput;

    use super::*;
    use crate::style::value::{Dimension, Value};

    fn prelude(kind: &str, css: &str) -> AtRulePrelude {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        parse_at_rule_prelude(&mut parser, kind)
    }

    #[test]
    fn media_queries() {
        assert_eq!(
            prelude("media", "screen and (min-width: 900px), print"),
            AtRulePrelude::Media(vec![
                MediaQuery {
                    tokens: vec![
                        ConditionToken::Keyword("screen".to_owned()),
                        ConditionToken::Keyword("and".to_owned()),
                        ConditionToken::Feature(MediaFeature {
                            name: "min-width".to_owned(),
                            value: Some(Value::Dimension(Dimension::new(900.0, "px"))),
                        }),
                    ]
                },
                MediaQuery {
                    tokens: vec![ConditionToken::Keyword("print".to_owned())]
                },
            ])
        );
    }

    #[test]
    fn range_syntax_is_kept_raw() {
        assert_eq!(
            prelude("media", "(400px <= width <= 700px)"),
            AtRulePrelude::Media(vec![MediaQuery {
                tokens: vec![ConditionToken::Raw("(400px <= width <= 700px)".to_owned())]
            }])
        );
    }

    #[test]
    fn other_preludes() {
        assert_eq!(prelude("font-face", "  "), AtRulePrelude::Empty);
        assert_eq!(
            prelude("layer", "base"),
            AtRulePrelude::Value(Value::Keyword("base".to_owned()))
        );
        assert_eq!(prelude("media", "screen,"), AtRulePrelude::Raw("screen,".to_owned()));
    }
}

// src/parser/selectors.rs: selector lists and keyframe selectors.
use cssparser::{Delimiter, ParseError, Parser, Token};

use crate::error::SyntaxError;
use crate::parser::{consume_rest, percentage_number, syntax_error, SyntaxResult};
use crate::style::selector::{
    takes_selector_argument, AttributeMatcher, AttributeOperator, AttributeSelector,
    AttributeValue, Combinator, ComplexSelector, Component, KeyframeSelector, Pseudo,
    PseudoArgument, SelectorList,
};
use crate::style::value::QuotedString;

/// Parses `a > b, .c:hover` until the end of the input.
pub(crate) fn parse_selector_list<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, SelectorList> {
    let mut selectors = Vec::new();
    loop {
        let selector = input.parse_until_before(Delimiter::Comma, parse_complex_selector)?;
        selectors.push(selector);
        if input.try_parse(|input| input.expect_comma()).is_err() {
            break;
        }
    }
    Ok(SelectorList(selectors))
}

fn parse_complex_selector<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, ComplexSelector> {
    input.skip_whitespace();
    let mut components: Vec<Component> = Vec::new();
    let mut pending_descendant = false;
    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let combinator = match token {
            Token::WhiteSpace(_) => {
                pending_descendant = !components.is_empty();
                continue;
            }
            Token::Delim('>') => Some(Combinator::Child),
            Token::Delim('+') => Some(Combinator::AdjacentSibling),
            Token::Delim('~') => Some(Combinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if matches!(components.last(), Some(Component::Combinator(_))) {
                return Err(syntax_error(input, SyntaxError::InvalidSelector("two combinators in a row")));
            }
            components.push(Component::Combinator(combinator));
            pending_descendant = false;
            continue;
        }
        if pending_descendant && !matches!(components.last(), Some(Component::Combinator(_))) {
            components.push(Component::Combinator(Combinator::Descendant));
        }
        pending_descendant = false;
        components.push(parse_simple_selector(input, token)?);
    }
    match components.last() {
        None => Err(syntax_error(input, SyntaxError::InvalidSelector("empty selector"))),
        Some(Component::Combinator(_)) => Err(syntax_error(
            input,
            SyntaxError::InvalidSelector("selector ends with a combinator"),
        )),
        Some(_) => Ok(ComplexSelector { components }),
    }
}

fn parse_simple_selector<'i>(input: &mut Parser<'i, '_>, token: Token<'i>) -> SyntaxResult<'i, Component> {
    let component = match token {
        Token::Ident(name) => Component::Type(name.to_string()),
        Token::Delim('*') => Component::Universal,
        Token::Delim('&') => Component::Nesting,
        Token::IDHash(id) => Component::Id(id.to_string()),
        Token::Delim('.') => match input.next_including_whitespace()?.clone() {
            Token::Ident(class) => Component::Class(class.to_string()),
            _ => return Err(syntax_error(input, SyntaxError::InvalidSelector("expected a class name"))),
        },
        Token::SquareBracketBlock => Component::Attribute(input.parse_nested_block(parse_attribute)?),
        Token::Colon => match input.next_including_whitespace()?.clone() {
            Token::Colon => Component::PseudoElement(parse_pseudo(input)?),
            Token::Ident(name) => Component::PseudoClass(Pseudo {
                name: name.to_string(),
                argument: None,
            }),
            Token::Function(name) => Component::PseudoClass(parse_pseudo_function(input, &name)?),
            _ => return Err(syntax_error(input, SyntaxError::InvalidSelector("expected a pseudo-class"))),
        },
        _ => return Err(syntax_error(input, SyntaxError::InvalidSelector("unexpected token"))),
    };
    Ok(component)
}

fn parse_pseudo<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Pseudo> {
    match input.next_including_whitespace()?.clone() {
        Token::Ident(name) => Ok(Pseudo {
            name: name.to_string(),
            argument: None,
        }),
        Token::Function(name) => parse_pseudo_function(input, &name),
        _ => Err(syntax_error(input, SyntaxError::InvalidSelector("expected a pseudo-element"))),
    }
}

fn parse_pseudo_function<'i>(input: &mut Parser<'i, '_>, name: &str) -> SyntaxResult<'i, Pseudo> {
    let selector_argument = takes_selector_argument(name);
    let argument = input.parse_nested_block(|input| {
        if selector_argument {
            if let Ok(list) = input.try_parse(parse_selector_list) {
                return Ok(PseudoArgument::Selectors(list));
            }
        }
        input.skip_whitespace();
        let start = input.position();
        consume_rest(input)?;
        Ok::<_, ParseError<'i, SyntaxError>>(PseudoArgument::Raw(
            input.slice_from(start).trim().to_owned(),
        ))
    })?;
    Ok(Pseudo {
        name: name.to_owned(),
        argument: Some(argument),
    })
}

fn parse_attribute<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, AttributeSelector> {
    let name = input.expect_ident_cloned()?.to_string();
    if input.is_exhausted() {
        return Ok(AttributeSelector { name, matcher: None });
    }
    let operator = match input.next()?.clone() {
        Token::Delim('=') => AttributeOperator::Exact,
        Token::IncludeMatch => AttributeOperator::Includes,
        Token::DashMatch => AttributeOperator::DashMatch,
        Token::PrefixMatch => AttributeOperator::Prefix,
        Token::SuffixMatch => AttributeOperator::Suffix,
        Token::SubstringMatch => AttributeOperator::Substring,
        _ => return Err(syntax_error(input, SyntaxError::InvalidSelector("unknown attribute operator"))),
    };
    input.skip_whitespace();
    let start = input.position();
    let value = match input.next()?.clone() {
        Token::QuotedString(text) => AttributeValue::Quoted(QuotedString::new(
            text.to_string(),
            QuotedString::quote_from_source(input.slice_from(start)),
        )),
        Token::Ident(text) => AttributeValue::Ident(text.to_string()),
        _ => return Err(syntax_error(input, SyntaxError::InvalidSelector("expected an attribute value"))),
    };
    let case_flag = if input.is_exhausted() {
        None
    } else {
        let flag = input.expect_ident_cloned()?;
        if !flag.eq_ignore_ascii_case("i") && !flag.eq_ignore_ascii_case("s") {
            return Err(syntax_error(input, SyntaxError::InvalidSelector("unknown attribute flag")));
        }
        Some(flag.to_string())
    };
    Ok(AttributeSelector {
        name,
        matcher: Some(AttributeMatcher {
            operator,
            value,
            case_flag,
        }),
    })
}

/// `from`, `to` and percentages, comma separated.
pub(crate) fn parse_keyframe_selectors<'i>(
    input: &mut Parser<'i, '_>,
) -> SyntaxResult<'i, Vec<KeyframeSelector>> {
    let mut selectors = Vec::new();
    loop {
        let selector = match input.next()?.clone() {
            Token::Ident(name) if name.eq_ignore_ascii_case("from") => KeyframeSelector::From,
            Token::Ident(name) if name.eq_ignore_ascii_case("to") => KeyframeSelector::To,
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => KeyframeSelector::Percentage(percentage_number(unit_value, int_value)),
            _ => return Err(syntax_error(input, SyntaxError::InvalidKeyframeSelector)),
        };
        selectors.push(selector);
        if input.is_exhausted() {
            break;
        }
        input.expect_comma()?;
    }
    Ok(selectors)
}

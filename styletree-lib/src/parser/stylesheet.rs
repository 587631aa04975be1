// src/parser/stylesheet.rs: rules, at-rules and the bodies of `{}` blocks.
use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, ParserState, Token};

use crate::error::{ParseError, SyntaxError};
use crate::parser::selectors::{parse_keyframe_selectors, parse_selector_list};
use crate::parser::values::{parse_declaration_value, DeclarationValue};
use crate::parser::{consume_rest, describe_error, preludes, SyntaxResult};
use crate::style::owned_css::{
    AtRuleBody, BodyItem, Location, OwnedAtRule, OwnedDeclaration, OwnedRule, OwnedStyleRule,
    OwnedStylesheet, PropertyName, RuleBody, RulePrelude, Unrecognized, VendorPrefix,
};
use crate::style::prelude::AtRulePrelude;

/// Blocks nested deeper than this are not read.
pub const MAX_NESTING_DEPTH: usize = 64;

/// At-rules whose block holds declarations and rules.
const BLOCK_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "container",
    "layer",
    "scope",
    "starting-style",
    "document",
    "font-face",
    "page",
    "top-left-corner",
    "top-left",
    "top-center",
    "top-right",
    "top-right-corner",
    "bottom-left-corner",
    "bottom-left",
    "bottom-center",
    "bottom-right",
    "bottom-right-corner",
    "left-top",
    "left-middle",
    "left-bottom",
    "right-top",
    "right-middle",
    "right-bottom",
    "property",
    "counter-style",
    "font-palette-values",
    "font-feature-values",
    "swash",
    "annotation",
    "ornaments",
    "stylistic",
    "styleset",
    "character-variant",
    "viewport",
    "view-transition",
    "position-try",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyContext {
    /// Declarations and nested rules.
    Style,
    /// Keyframe blocks only.
    Keyframes,
}

/// Parses a whole stylesheet.
///
/// Rules that cannot be read are kept as [`OwnedRule::Unrecognized`]. The
/// call only fails when the input has content and none of it is a rule.
pub fn parse_stylesheet(css: &str) -> Result<OwnedStylesheet, ParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let rules = parse_rule_list(&mut parser);

    if !rules.is_empty() && rules.iter().all(|rule| matches!(rule, OwnedRule::Unrecognized(_))) {
        if let Some(OwnedRule::Unrecognized(first)) = rules.first() {
            return Err(ParseError::from(first));
        }
    }
    Ok(OwnedStylesheet { rules })
}

fn parse_rule_list(input: &mut Parser<'_, '_>) -> Vec<OwnedRule> {
    let mut rules = Vec::new();
    loop {
        input.skip_whitespace();
        let start = input.state();
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::CDO | Token::CDC => {}
            Token::AtKeyword(name) => rules.push(parse_at_rule(input, &start, &name, 0)),
            _ => {
                input.reset(&start);
                rules.push(parse_qualified_rule(input, &start, BodyContext::Style, 0, false));
            }
        }
    }
    rules
}

fn parse_body(input: &mut Parser<'_, '_>, context: BodyContext, depth: usize) -> RuleBody {
    let mut items = Vec::new();
    loop {
        input.skip_whitespace();
        let start = input.state();
        let token = match input.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::Semicolon => {}
            Token::AtKeyword(name) => {
                items.push(BodyItem::Rule(parse_at_rule(input, &start, &name, depth)));
            }
            Token::Ident(name) if context == BodyContext::Style => {
                let declaration =
                    input.parse_until_after(Delimiter::Semicolon, |input| parse_declaration(input, &name));
                match declaration {
                    Ok(declaration) => items.push(BodyItem::Declaration(declaration)),
                    Err(error) => items.push(BodyItem::Rule(retry_as_rule(
                        input, &start, context, depth, &error,
                    ))),
                }
            }
            _ => {
                input.reset(&start);
                items.push(BodyItem::Rule(parse_qualified_rule(input, &start, context, depth, true)));
            }
        }
    }
    RuleBody { items }
}

/// `a:hover { ... }` starts like a declaration. When the declaration reading
/// fails, read the same text as a nested rule; if that fails too, keep
/// whichever reading skipped less input.
fn retry_as_rule(
    input: &mut Parser<'_, '_>,
    start: &ParserState,
    context: BodyContext,
    depth: usize,
    declaration_error: &CssParseError<'_, SyntaxError>,
) -> OwnedRule {
    input.reset(start);
    let rule = parse_qualified_rule(input, start, context, depth, true);
    if !matches!(rule, OwnedRule::Unrecognized(_)) {
        return rule;
    }
    let after_rule = input.state();
    let rule_length = input.slice_from(start.position()).len();

    input.reset(start);
    let _ = input.parse_until_after(Delimiter::Semicolon, consume_rest);
    if input.slice_from(start.position()).len() > rule_length {
        input.reset(&after_rule);
        return rule;
    }
    unrecognized(input, start, describe_error(declaration_error))
}

fn parse_declaration<'i>(input: &mut Parser<'i, '_>, name: &str) -> SyntaxResult<'i, OwnedDeclaration> {
    input.expect_colon()?;
    let property = PropertyName::parse(name);
    let DeclarationValue { value, important } = parse_declaration_value(input, &property)?;
    Ok(OwnedDeclaration {
        property,
        value,
        important,
    })
}

fn parse_qualified_rule<'i>(
    input: &mut Parser<'i, '_>,
    start: &ParserState,
    context: BodyContext,
    depth: usize,
    nested: bool,
) -> OwnedRule {
    let delimiters = if nested {
        Delimiter::CurlyBracketBlock | Delimiter::Semicolon
    } else {
        Delimiter::CurlyBracketBlock
    };
    let prelude = input.parse_until_before(delimiters, |input| match context {
        BodyContext::Style => parse_selector_list(input).map(RulePrelude::Selectors),
        BodyContext::Keyframes => parse_keyframe_selectors(input).map(RulePrelude::Keyframes),
    });
    if !matches!(input.next(), Ok(Token::CurlyBracketBlock)) {
        return unrecognized(input, start, "Expected '{' after rule prelude");
    }
    let prelude = match prelude {
        Ok(prelude) => prelude,
        Err(error) => return unrecognized(input, start, describe_error(&error)),
    };
    if depth >= MAX_NESTING_DEPTH {
        return unrecognized(input, start, "Rule nesting is too deep");
    }
    let body = parse_block(input, BodyContext::Style, depth + 1);
    OwnedRule::Style(OwnedStyleRule {
        prelude,
        body,
        location: Location::from(start.source_location()),
    })
}

fn parse_at_rule<'i>(
    input: &mut Parser<'i, '_>,
    start: &ParserState,
    name: &str,
    depth: usize,
) -> OwnedRule {
    let lower = name.to_ascii_lowercase();
    let (_, kind) = VendorPrefix::split(&lower);
    let prelude = input
        .parse_until_before(Delimiter::Semicolon | Delimiter::CurlyBracketBlock, |input| {
            Ok::<_, CssParseError<'i, SyntaxError>>(preludes::parse_at_rule_prelude(input, kind))
        })
        .unwrap_or(AtRulePrelude::Empty);
    let location = Location::from(start.source_location());

    if !matches!(input.next(), Ok(Token::CurlyBracketBlock)) {
        return OwnedRule::At(OwnedAtRule {
            name: name.to_owned(),
            prelude,
            body: None,
            location,
        });
    }
    if depth >= MAX_NESTING_DEPTH {
        return unrecognized(input, start, "Rule nesting is too deep");
    }
    let body = if kind == "keyframes" {
        AtRuleBody::Items(parse_block(input, BodyContext::Keyframes, depth + 1))
    } else if BLOCK_AT_RULES.contains(&kind) {
        AtRuleBody::Items(parse_block(input, BodyContext::Style, depth + 1))
    } else {
        log::debug!("Keeping the body of unknown at-rule '@{}' as text", name);
        AtRuleBody::Opaque(parse_opaque_block(input))
    };
    OwnedRule::At(OwnedAtRule {
        name: name.to_owned(),
        prelude,
        body: Some(body),
        location,
    })
}

fn parse_block(input: &mut Parser<'_, '_>, context: BodyContext, depth: usize) -> RuleBody {
    input
        .parse_nested_block(|input| {
            Ok::<_, CssParseError<'_, SyntaxError>>(parse_body(input, context, depth))
        })
        .unwrap_or_default()
}

fn parse_opaque_block(input: &mut Parser<'_, '_>) -> String {
    input
        .parse_nested_block(|input| {
            let start = input.position();
            consume_rest(input)?;
            Ok::<_, CssParseError<'_, SyntaxError>>(input.slice_from(start).trim().to_owned())
        })
        .unwrap_or_default()
}

fn unrecognized(input: &Parser<'_, '_>, start: &ParserState, reason: impl Into<String>) -> OwnedRule {
    OwnedRule::Unrecognized(Unrecognized {
        source: input.slice_from(start.position()).trim().to_owned(),
        reason: reason.into(),
        location: Location::from(start.source_location()),
    })
}

// src/rule_tree/decode.rs: syntax tree → rule tree.
use rayon::prelude::*;

use crate::error::ParseError;
use crate::parser::parse_stylesheet;
use crate::render::{
    render_at_rule_key, render_keyframe_selectors, render_selector_list, render_value,
    UNABLE_TO_PARSE,
};
use crate::rule_tree::document::{Document, Rule};
use crate::style::owned_css::{
    AtRuleBody, BodyItem, OwnedAtRule, OwnedDeclaration, OwnedRule, OwnedStyleRule,
    OwnedStylesheet, RuleBody, RulePrelude,
};

/// Decodes a stylesheet into a rule tree.
///
/// Rules that cannot be read are logged and skipped. Fails only when the text
/// holds no readable rule at all.
pub fn decode(css: &str) -> Result<Document, ParseError> {
    let stylesheet = parse_stylesheet(css)?;
    let document = decode_stylesheet(&stylesheet);
    log::debug!(
        "Decoded {} top-level rules into {} keys",
        stylesheet.rules.len(),
        document.len()
    );
    Ok(document)
}

/// Decodes independent stylesheets in parallel. Results keep input order.
pub fn decode_batch<S: AsRef<str> + Sync>(sources: &[S]) -> Vec<Result<Document, ParseError>> {
    sources
        .par_iter()
        .map(|source| decode(source.as_ref()))
        .collect()
}

pub fn decode_stylesheet(stylesheet: &OwnedStylesheet) -> Document {
    let mut document = Document::new();
    for rule in &stylesheet.rules {
        decode_rule(rule, &mut document);
    }
    document
}

fn decode_rule(rule: &OwnedRule, into: &mut Document) {
    match rule {
        OwnedRule::Style(style) => decode_style_rule(style, into),
        OwnedRule::At(at_rule) => decode_at_rule(at_rule, into),
        OwnedRule::Unrecognized(node) => {
            log::warn!(
                "Skipping unrecognized CSS at {}: {} ({:?})",
                node.location,
                node.reason,
                node.source
            );
        }
    }
}

fn decode_style_rule(style: &OwnedStyleRule, into: &mut Document) {
    let key = match &style.prelude {
        RulePrelude::Selectors(list) => render_selector_list(list),
        RulePrelude::Keyframes(selectors) => render_keyframe_selectors(selectors),
    };
    log::trace!("Style rule '{}' at {}", key, style.location);
    into.merge(key, decode_body(&style.body));
}

fn decode_at_rule(at_rule: &OwnedAtRule, into: &mut Document) {
    let key = render_at_rule_key(&at_rule.name, &at_rule.prelude).unwrap_or_else(|error| {
        log::warn!("At-rule '@{}' at {}: {}", at_rule.name, at_rule.location, error);
        format!("@{} {}", at_rule.name, UNABLE_TO_PARSE)
    });
    log::trace!("At-rule '{}' at {}", key, at_rule.location);
    match &at_rule.body {
        None => into.merge(key, Rule::Value(String::new())),
        Some(AtRuleBody::Items(body)) => into.merge(key, decode_body(body)),
        Some(AtRuleBody::Opaque(text)) => {
            let text = text.trim_end().trim_end_matches(';').trim_end();
            let mut block = Document::new();
            if !text.is_empty() {
                block.insert(key.clone(), text);
            }
            into.merge(key, block);
        }
    }
}

fn decode_body(body: &RuleBody) -> Document {
    let mut document = Document::new();
    for item in &body.items {
        match item {
            BodyItem::Declaration(declaration) => {
                let (property, value) = decode_declaration(declaration);
                document.merge(property, value);
            }
            BodyItem::Rule(rule) => decode_rule(rule, &mut document),
        }
    }
    document
}

/// The property name and rendered value of one declaration.
///
/// A value the renderer refuses becomes [`UNABLE_TO_PARSE`].
pub fn decode_declaration(declaration: &OwnedDeclaration) -> (String, String) {
    let property = declaration.property.to_string();
    let mut value = match render_value(&declaration.value) {
        Ok(value) => value,
        Err(error) => {
            log::warn!("Cannot render the value of '{}': {}", property, error);
            UNABLE_TO_PARSE.to_owned()
        }
    };
    if declaration.important {
        value.push_str(" !important");
    }
    (property, value)
}

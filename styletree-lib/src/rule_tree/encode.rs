// src/rule_tree/encode.rs: rule tree → indented CSS.
use crate::error::EncodeError;
use crate::rule_tree::document::{Document, Rule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Added once per nesting level.
    pub indent: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: "  ".to_owned(),
        }
    }
}

impl EncodeOptions {
    pub fn with_indent(indent: impl Into<String>) -> Self {
        EncodeOptions {
            indent: indent.into(),
        }
    }
}

/// Encodes a rule tree as CSS, one declaration per line.
///
/// An at-rule key holding `""` prints as a statement with its terminator,
/// `@import url(a.css);`, rather than as the bare key, so the output decodes
/// back to the same tree.
pub fn encode(document: &Document, options: &EncodeOptions) -> Result<String, EncodeError> {
    let mut out = String::new();
    encode_document(document, &options.indent, "", true, &mut out)?;
    Ok(out)
}

fn encode_document(
    document: &Document,
    unit: &str,
    indent: &str,
    root: bool,
    out: &mut String,
) -> Result<(), EncodeError> {
    for (key, rule) in document.iter() {
        if key.is_empty() {
            return Err(EncodeError::EmptyKey);
        }
        match rule {
            Rule::Value(value) if value.is_empty() && key.starts_with('@') => {
                push_line(out, indent, &format!("{};", key));
            }
            Rule::Value(_) if root => {
                return Err(EncodeError::DeclarationAtRoot {
                    property: key.to_owned(),
                });
            }
            Rule::Value(value) => push_line(out, indent, &format!("{}: {};", key, value)),
            Rule::Block(block) => match compact_body(key, block) {
                Some(body) => push_line(out, indent, &format!("{} {{ {}; }}", key, body)),
                None => {
                    push_line(out, indent, &format!("{} {{", key));
                    let nested = format!("{}{}", indent, unit);
                    encode_document(block, unit, &nested, false, out)?;
                    push_line(out, indent, "}");
                }
            },
        }
    }
    Ok(())
}

/// The text of an opaque at-rule body: an at-rule block whose only entry
/// repeats the block's own key with a non-empty value. An empty value is a
/// nested statement such as `@layer x { @layer x; }`.
fn compact_body<'a>(key: &str, block: &'a Document) -> Option<&'a str> {
    if !key.starts_with('@') || block.len() != 1 {
        return None;
    }
    match block.get(key) {
        Some(Rule::Value(body)) if !body.is_empty() => Some(body.as_str()),
        _ => None,
    }
}

fn push_line(out: &mut String, indent: &str, line: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn nested_blocks_are_indented() {
        let tree = document(r#"{"@media print":{"a":{"color":"red","margin":"0"}}}"#);
        assert_eq!(
            encode(&tree, &EncodeOptions::default()).unwrap(),
            "@media print {\n  a {\n    color: red;\n    margin: 0;\n  }\n}\n"
        );
    }

    #[test]
    fn custom_indent() {
        let tree = document(r#"{"a":{"b":"c"}}"#);
        assert_eq!(
            encode(&tree, &EncodeOptions::with_indent("\t")).unwrap(),
            "a {\n\tb: c;\n}\n"
        );
    }

    #[test]
    fn statements_and_compact_bodies() {
        let tree = document(
            r#"{"@import url(a.css)":"","@custom x":{"@custom x":"whatever"},"@custom y":{}}"#,
        );
        assert_eq!(
            encode(&tree, &EncodeOptions::default()).unwrap(),
            "@import url(a.css);\n@custom x { whatever; }\n@custom y {\n}\n"
        );
    }

    #[test]
    fn nested_statement_with_the_same_key_is_not_compact() {
        let tree = document(r#"{"@layer x":{"@layer x":""}}"#);
        assert_eq!(
            encode(&tree, &EncodeOptions::default()).unwrap(),
            "@layer x {\n  @layer x;\n}\n"
        );
    }

    #[test]
    fn style_rules_are_never_compact() {
        let tree = document(r#"{"a":{"a":"x"}}"#);
        assert_eq!(
            encode(&tree, &EncodeOptions::default()).unwrap(),
            "a {\n  a: x;\n}\n"
        );
    }

    #[test]
    fn structural_errors() {
        assert_eq!(
            encode(&document(r#"{"color":"red"}"#), &EncodeOptions::default()),
            Err(EncodeError::DeclarationAtRoot {
                property: "color".to_owned()
            })
        );
        assert_eq!(
            encode(&document(r#"{"a":{"":"x"}}"#), &EncodeOptions::default()),
            Err(EncodeError::EmptyKey)
        );
    }
}

// src/style/owned_css.rs: the fully-owned syntax tree the parser hands to the decoder.
use std::fmt;

use crate::style::prelude::AtRulePrelude;
use crate::style::selector::{KeyframeSelector, SelectorList};
use crate::style::value::Value;

/// A fully-owned CSS stylesheet: top-level rules in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OwnedStylesheet {
    pub rules: Vec<OwnedRule>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OwnedRule {
    Style(OwnedStyleRule),
    At(OwnedAtRule),
    /// Text the parser could not read as a rule. Kept so the decoder can
    /// report it before skipping it.
    Unrecognized(Unrecognized),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedStyleRule {
    pub prelude: RulePrelude,
    pub body: RuleBody,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RulePrelude {
    /// e.g. "div", ".red, #header", "&:hover"
    Selectors(SelectorList),
    /// e.g. "from", "50%, to" inside `@keyframes`
    Keyframes(Vec<KeyframeSelector>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedAtRule {
    /// Name without the `@`, as written.
    pub name: String,
    pub prelude: AtRulePrelude,
    /// None for statement at-rules such as `@import ...;`.
    pub body: Option<AtRuleBody>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AtRuleBody {
    Items(RuleBody),
    /// Body of an at-rule this crate has no grammar for, trimmed.
    Opaque(String),
}

/// The inside of a `{}` block: declarations and nested rules, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleBody {
    pub items: Vec<BodyItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Declaration(OwnedDeclaration),
    Rule(OwnedRule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OwnedDeclaration {
    pub property: PropertyName,
    pub value: Value,
    pub important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    /// `--main-color`, case preserved.
    Custom(String),
    Standard { prefix: VendorPrefix, name: String },
}

impl PropertyName {
    pub fn parse(name: &str) -> Self {
        if name.starts_with("--") {
            return PropertyName::Custom(name.to_owned());
        }
        let lower = name.to_ascii_lowercase();
        let (prefix, rest) = VendorPrefix::split(&lower);
        PropertyName::Standard {
            prefix,
            name: rest.to_owned(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, PropertyName::Custom(_))
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyName::Custom(name) => f.write_str(name),
            PropertyName::Standard { prefix, name } => write!(f, "{}{}", prefix.as_str(), name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VendorPrefix {
    #[default]
    None,
    WebKit,
    Moz,
    Ms,
    O,
}

impl VendorPrefix {
    const ALL: [VendorPrefix; 4] = [
        VendorPrefix::WebKit,
        VendorPrefix::Moz,
        VendorPrefix::Ms,
        VendorPrefix::O,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VendorPrefix::None => "",
            VendorPrefix::WebKit => "-webkit-",
            VendorPrefix::Moz => "-moz-",
            VendorPrefix::Ms => "-ms-",
            VendorPrefix::O => "-o-",
        }
    }

    /// Splits a lowercase name into its vendor prefix and the rest.
    pub fn split(name: &str) -> (VendorPrefix, &str) {
        for prefix in Self::ALL {
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                if !rest.is_empty() {
                    return (prefix, rest);
                }
            }
        }
        (VendorPrefix::None, name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unrecognized {
    pub source: String,
    pub reason: String,
    pub location: Location,
}

/// 1-based position in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl From<cssparser::SourceLocation> for Location {
    fn from(location: cssparser::SourceLocation) -> Self {
        // cssparser lines are 0-based, columns already 1-based.
        Location {
            line: location.line + 1,
            column: location.column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

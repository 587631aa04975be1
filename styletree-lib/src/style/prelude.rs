use crate::style::value::Value;

/// What follows the name of an at-rule, up to its block or `;`.
#[derive(Debug, Clone, PartialEq)]
pub enum AtRulePrelude {
    Empty,
    /// `@media` queries, comma separated.
    Media(Vec<MediaQuery>),
    /// `@supports`, `@container` and `@scope` conditions.
    Condition(Vec<ConditionToken>),
    /// Any other prelude, read by the value classifier.
    Value(Value),
    /// Prelude text the classifier rejected.
    Raw(String),
}

/// One media query as a run of keywords and parenthesized features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaQuery {
    pub tokens: Vec<ConditionToken>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConditionToken {
    /// `screen`, `and`, `not`, `only`, a container name...
    Keyword(String),
    /// `(min-width: 900px)` or `(color)`.
    Feature(MediaFeature),
    /// A group kept as written, parentheses included: `(width >= 600px)`.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeature {
    pub name: String,
    pub value: Option<Value>,
}

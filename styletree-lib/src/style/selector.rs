use crate::style::value::QuotedString;

/// A comma separated list of complex selectors, e.g. `h1+p, h2~h3`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// One complex selector: simple selectors and combinators in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    /// `div`, `from`
    Type(String),
    /// `*`
    Universal,
    /// `.name`
    Class(String),
    /// `#name`
    Id(String),
    Attribute(AttributeSelector),
    /// `:hover`, `:not(.a)`
    PseudoClass(Pseudo),
    /// `::after`, `::part(label)`
    PseudoElement(Pseudo),
    Combinator(Combinator),
    /// `&`
    Nesting,
}

/// Supported combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (a space).
    Descendant,
    /// Child combinator (`>`).
    Child,
    /// Adjacent sibling combinator (`+`).
    AdjacentSibling,
    /// General sibling combinator (`~`).
    GeneralSibling,
}

/// Supported attribute selector operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr="value"]
    Exact,
    /// [attr~="value"]
    Includes,
    /// [attr|="value"]
    DashMatch,
    /// [attr^="value"]
    Prefix,
    /// [attr$="value"]
    Suffix,
    /// [attr*="value"]
    Substring,
}

impl AttributeOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeOperator::Exact => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        }
    }
}

/// Represents one attribute condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    /// None means only existence check.
    pub matcher: Option<AttributeMatcher>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatcher {
    pub operator: AttributeOperator,
    pub value: AttributeValue,
    /// The `i` / `s` flag, as written.
    pub case_flag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Quoted(QuotedString),
    Ident(String),
}

/// A pseudo-class or pseudo-element with its optional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pseudo {
    pub name: String,
    pub argument: Option<PseudoArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoArgument {
    Selectors(SelectorList),
    /// Arguments with their own micro-syntax (`2n+1`, `en`), trimmed.
    Raw(String),
}

/// Pseudo-classes and pseudo-elements whose argument is a selector list.
pub fn takes_selector_argument(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "not"
            | "is"
            | "where"
            | "has"
            | "matches"
            | "any"
            | "-webkit-any"
            | "-moz-any"
            | "host"
            | "host-context"
            | "slotted"
            | "current"
            | "past"
            | "future"
            | "cue"
            | "global"
            | "local"
    )
}

/// A selector inside a `@keyframes` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyframeSelector {
    From,
    To,
    Percentage(f32),
}

//! The typed syntax tree: rules, selectors, at-rule preludes and the closed
//! vocabulary of property values.

pub mod calc;
pub mod color;
pub mod owned_css;
pub mod prelude;
pub mod selector;
pub mod value;

pub use calc::{Calc, LengthPercentage, MathFunction};
pub use color::CssColor;
pub use owned_css::{
    AtRuleBody, BodyItem, Location, OwnedAtRule, OwnedDeclaration, OwnedRule, OwnedStyleRule,
    OwnedStylesheet, PropertyName, RuleBody, RulePrelude, Unrecognized, VendorPrefix,
};
pub use prelude::{AtRulePrelude, ConditionToken, MediaFeature, MediaQuery};
pub use selector::SelectorList;
pub use value::{Dimension, Function, FunctionArgs, QuotedString, Unmodeled, Value};

//! Canonical text for values, selectors and at-rule preludes.

pub mod prelude;
pub mod selector;
pub mod value;

pub use prelude::{render_at_rule_key, render_prelude};
pub use selector::{render_keyframe_selectors, render_selector_list};
pub use value::{format_number, render_color, render_value, UNABLE_TO_PARSE};

/// Serializes an identifier with CSS escaping, e.g. `1a` → `\31 a`.
pub(crate) fn identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    match cssparser::serialize_identifier(name, &mut out) {
        Ok(()) => out,
        Err(_) => name.to_owned(),
    }
}

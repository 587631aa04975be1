// src/render/selector.rs: selector keys.
use crate::render::identifier;
use crate::render::value::{format_number, render_string};
use crate::style::selector::{
    AttributeSelector, AttributeValue, Combinator, ComplexSelector, Component, KeyframeSelector,
    Pseudo, PseudoArgument, SelectorList,
};

/// `a > b, .c:hover`: one space after each comma, none before.
pub fn render_selector_list(list: &SelectorList) -> String {
    list.0
        .iter()
        .map(render_complex_selector)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_complex_selector(selector: &ComplexSelector) -> String {
    let mut out = String::new();
    for component in &selector.components {
        render_component(component, &mut out);
    }
    out
}

fn render_component(component: &Component, out: &mut String) {
    match component {
        Component::Type(name) => out.push_str(&identifier(name)),
        Component::Universal => out.push('*'),
        Component::Class(name) => {
            out.push('.');
            out.push_str(&identifier(name));
        }
        Component::Id(name) => {
            out.push('#');
            out.push_str(&identifier(name));
        }
        Component::Attribute(attribute) => render_attribute(attribute, out),
        Component::PseudoClass(pseudo) => {
            out.push(':');
            render_pseudo(pseudo, out);
        }
        Component::PseudoElement(pseudo) => {
            out.push_str("::");
            render_pseudo(pseudo, out);
        }
        Component::Combinator(combinator) => out.push_str(match combinator {
            Combinator::Descendant => " ",
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }),
        Component::Nesting => out.push('&'),
    }
}

fn render_attribute(attribute: &AttributeSelector, out: &mut String) {
    out.push('[');
    out.push_str(&identifier(&attribute.name));
    if let Some(matcher) = &attribute.matcher {
        out.push_str(matcher.operator.as_str());
        match &matcher.value {
            AttributeValue::Quoted(string) => out.push_str(&render_string(string)),
            AttributeValue::Ident(ident) => out.push_str(&identifier(ident)),
        }
        if let Some(flag) = &matcher.case_flag {
            out.push(' ');
            out.push_str(flag);
        }
    }
    out.push(']');
}

fn render_pseudo(pseudo: &Pseudo, out: &mut String) {
    out.push_str(&identifier(&pseudo.name));
    match &pseudo.argument {
        None => {}
        Some(PseudoArgument::Selectors(list)) => {
            out.push('(');
            out.push_str(&render_selector_list(list));
            out.push(')');
        }
        Some(PseudoArgument::Raw(text)) => {
            out.push('(');
            out.push_str(text);
            out.push(')');
        }
    }
}

/// `from, 50%, to`
pub fn render_keyframe_selectors(selectors: &[KeyframeSelector]) -> String {
    selectors
        .iter()
        .map(|selector| match selector {
            KeyframeSelector::From => "from".to_owned(),
            KeyframeSelector::To => "to".to_owned(),
            KeyframeSelector::Percentage(percent) => format!("{}%", format_number(*percent)),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

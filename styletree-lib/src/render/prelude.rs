// src/render/prelude.rs: at-rule keys.
use crate::error::RenderError;
use crate::render::identifier;
use crate::render::value::render_value;
use crate::style::prelude::{AtRulePrelude, ConditionToken, MediaQuery};

/// `@{name}`, followed by the rendered prelude when there is one.
pub fn render_at_rule_key(name: &str, prelude: &AtRulePrelude) -> Result<String, RenderError> {
    let prelude = render_prelude(prelude)?;
    if prelude.is_empty() {
        Ok(format!("@{}", name))
    } else {
        Ok(format!("@{} {}", name, prelude))
    }
}

pub fn render_prelude(prelude: &AtRulePrelude) -> Result<String, RenderError> {
    match prelude {
        AtRulePrelude::Empty => Ok(String::new()),
        AtRulePrelude::Media(queries) => Ok(queries
            .iter()
            .map(render_media_query)
            .collect::<Result<Vec<_>, _>>()?
            .join(", ")),
        AtRulePrelude::Condition(tokens) => render_condition(tokens),
        AtRulePrelude::Value(value) => render_value(value),
        AtRulePrelude::Raw(text) => Ok(text.clone()),
    }
}

fn render_media_query(query: &MediaQuery) -> Result<String, RenderError> {
    render_condition(&query.tokens)
}

fn render_condition(tokens: &[ConditionToken]) -> Result<String, RenderError> {
    let rendered = tokens
        .iter()
        .map(render_condition_token)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(" "))
}

fn render_condition_token(token: &ConditionToken) -> Result<String, RenderError> {
    let text = match token {
        ConditionToken::Keyword(keyword) => identifier(keyword),
        ConditionToken::Feature(feature) => match &feature.value {
            Some(value) => format!("({}: {})", identifier(&feature.name), render_value(value)?),
            None => format!("({})", identifier(&feature.name)),
        },
        ConditionToken::Raw(text) => text.clone(),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::prelude::MediaFeature;
    use crate::style::value::{Dimension, Value};

    #[test]
    fn media_key() {
        let prelude = AtRulePrelude::Media(vec![MediaQuery {
            tokens: vec![
                ConditionToken::Keyword("screen".to_owned()),
                ConditionToken::Keyword("and".to_owned()),
                ConditionToken::Feature(MediaFeature {
                    name: "min-width".to_owned(),
                    value: Some(Value::Dimension(Dimension::new(900.0, "px"))),
                }),
            ],
        }]);
        assert_eq!(
            render_at_rule_key("media", &prelude),
            Ok("@media screen and (min-width: 900px)".to_owned())
        );
    }

    #[test]
    fn bare_key() {
        assert_eq!(render_at_rule_key("font-face", &AtRulePrelude::Empty), Ok("@font-face".to_owned()));
    }
}

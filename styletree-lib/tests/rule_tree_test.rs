use styletree_lib::render::UNABLE_TO_PARSE;
use styletree_lib::{decode, encode, Document, EncodeOptions, Rule};

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn tree(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    fn to_css(document: &Document) -> String {
        encode(document, &EncodeOptions::default()).unwrap()
    }

    /// Decodes `input`, compares with `expected`, encodes back and compares
    /// with the input.
    fn round_trip(input: &str, expected: &str) {
        init_logger();
        let document = decode(input.trim()).unwrap();
        assert_eq!(document, tree(expected));
        assert_eq!(to_css(&document).trim(), input.trim());
    }

    fn block<'a>(document: &'a Document, key: &str) -> &'a Document {
        document
            .get(key)
            .and_then(Rule::as_block)
            .unwrap_or_else(|| panic!("no block under '{key}'"))
    }

    #[test]
    fn test_nested_rule_at_end_of_body() {
        round_trip(
            r#"
body {
  background: red;
  h1 {
    margin: 0;
  }
}
body :not(.container) {
  max-width: 200px;
}
"#,
            r#"{
                "body": { "background": "red", "h1": { "margin": "0" } },
                "body :not(.container)": { "max-width": "200px" }
            }"#,
        );
    }

    #[test]
    fn test_grid_and_flexbox() {
        round_trip(
            r#"
div {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
}
.flex {
  display: flex;
  justify-content: space-between;
}
"#,
            r#"{
                "div": { "display": "grid", "grid-template-columns": "repeat(3, 1fr)" },
                ".flex": { "display": "flex", "justify-content": "space-between" }
            }"#,
        );
    }

    #[test]
    fn test_global_keywords() {
        round_trip(
            r#"
div {
  display: initial;
}
span {
  color: inherit;
}
ul.list {
  list-style: unset;
}
"#,
            r#"{
                "div": { "display": "initial" },
                "span": { "color": "inherit" },
                "ul.list": { "list-style": "unset" }
            }"#,
        );
    }

    #[test]
    fn test_selector_list_and_deep_nesting() {
        round_trip(
            r#"
body, div {
  background: red;
}
"#,
            r#"{ "body, div": { "background": "red" } }"#,
        );
        round_trip(
            r#"
body {
  div {
    p {
      span {
        color: blue;
      }
    }
  }
}
"#,
            r#"{ "body": { "div": { "p": { "span": { "color": "blue" } } } } }"#,
        );
    }

    #[test]
    fn test_media_rules() {
        round_trip(
            r#"
@media (max-width: 600px) {
  body {
    background: white;
  }
}
@media (prefers-color-scheme: dark) {
  body {
    background: black;
  }
}
"#,
            r#"{
                "@media (max-width: 600px)": { "body": { "background": "white" } },
                "@media (prefers-color-scheme: dark)": { "body": { "background": "black" } }
            }"#,
        );
    }

    #[test]
    fn test_sibling_combinators_and_raw_values() {
        round_trip(
            r#"
body {
  h1+p, h2~h3 {
    aspect-ratio: 1/1;
    content: '';
    max-width: clamp(1rem, 16px, 12em);
  }
}
"#,
            r#"{
                "body": {
                    "h1+p, h2~h3": {
                        "aspect-ratio": "1/1",
                        "content": "''",
                        "max-width": "clamp(1rem, 16px, 12em)"
                    }
                }
            }"#,
        );
    }

    #[test]
    fn test_important() {
        round_trip(
            r#"
p {
  color: red !important;
  font-size: 14px;
}
"#,
            r#"{ "p": { "color": "red !important", "font-size": "14px" } }"#,
        );
    }

    #[test]
    fn test_pseudo_classes_and_elements() {
        round_trip(
            r#"
a:hover, a::after {
  color: green;
}
div:first-child {
  margin-top: 0;
}
a[rel="noopener noreferrer"]:hover {
  color: red;
}
"#,
            r#"{
                "a:hover, a::after": { "color": "green" },
                "div:first-child": { "margin-top": "0" },
                "a[rel=\"noopener noreferrer\"]:hover": { "color": "red" }
            }"#,
        );
    }

    #[test]
    fn test_font_face() {
        round_trip(
            r#"
@font-face {
  font-family: 'MyFont';
  src: url('font.woff2')format('woff2');
  unicode-range: U+000-5FF;
}
"#,
            r#"{
                "@font-face": {
                    "font-family": "'MyFont'",
                    "src": "url('font.woff2')format('woff2')",
                    "unicode-range": "U+000-5FF"
                }
            }"#,
        );
    }

    #[test]
    fn test_keyframes() {
        round_trip(
            r#"
@keyframes slide {
  from {
    opacity: 0;
  }
  50% {
    opacity: 0.5;
  }
  to {
    opacity: 1;
  }
}
"#,
            r#"{
                "@keyframes slide": {
                    "from": { "opacity": "0" },
                    "50%": { "opacity": "0.5" },
                    "to": { "opacity": "1" }
                }
            }"#,
        );
    }

    #[test]
    fn test_custom_properties() {
        round_trip(
            r#"
:root {
  --main-bg-color: brown;
  &:has(.dark) {
    --main-bg-color: pink;
  }
}
body {
  background-color: var(--main-bg-color);
}
"#,
            r#"{
                ":root": { "--main-bg-color": "brown", "&:has(.dark)": { "--main-bg-color": "pink" } },
                "body": { "background-color": "var(--main-bg-color)" }
            }"#,
        );
    }

    #[test]
    fn test_custom_properties_under_media() {
        round_trip(
            r#"
:root {
  --main-color: black;
  --padding: 5px;
}
body {
  color: var(--main-color);
  padding: var(--padding);
}
@media (prefers-color-scheme: dark) {
  :root {
    --main-color: white;
  }
  body {
    background: var(--main-color);
  }
}
"#,
            r#"{
                ":root": { "--main-color": "black", "--padding": "5px" },
                "body": { "color": "var(--main-color)", "padding": "var(--padding)" },
                "@media (prefers-color-scheme: dark)": {
                    ":root": { "--main-color": "white" },
                    "body": { "background": "var(--main-color)" }
                }
            }"#,
        );
    }

    #[test]
    fn test_gradient_function() {
        round_trip(
            r#"
div {
  background: linear-gradient(to right, red, yellow);
}
"#,
            r#"{ "div": { "background": "linear-gradient(to right, red, yellow)" } }"#,
        );
    }

    #[test]
    fn test_attribute_operators() {
        round_trip(
            r#"
a[target="_blank"] {
  color: blue;
}
a[href^="https"] {
  font-weight: bold;
}
a[href$=".pdf"] {
  font-style: italic;
}
a[href*="example"] {
  text-decoration: underline;
}
"#,
            r#"{
                "a[target=\"_blank\"]": { "color": "blue" },
                "a[href^=\"https\"]": { "font-weight": "bold" },
                "a[href$=\".pdf\"]": { "font-style": "italic" },
                "a[href*=\"example\"]": { "text-decoration": "underline" }
            }"#,
        );
    }

    #[test]
    fn test_nested_at_rules() {
        round_trip(
            r#"
@media screen and (min-width: 900px) {
  article {
    padding: 1rem 3rem;
  }
  @media (prefers-color-scheme: dark) {
    article {
      background: black;
      color: white;
    }
  }
}
"#,
            r#"{
                "@media screen and (min-width: 900px)": {
                    "article": { "padding": "1rem 3rem" },
                    "@media (prefers-color-scheme: dark)": {
                        "article": { "background": "black", "color": "white" }
                    }
                }
            }"#,
        );
    }

    #[test]
    fn test_supports() {
        round_trip(
            r#"
@supports (display: grid) {
  div {
    display: grid;
  }
}
@supports not (display: grid) {
  div {
    float: left;
  }
}
"#,
            r#"{
                "@supports (display: grid)": { "div": { "display": "grid" } },
                "@supports not (display: grid)": { "div": { "float": "left" } }
            }"#,
        );
    }

    #[test]
    fn test_interleaved_declarations_keep_order() {
        round_trip(
            r#"
body {
  p {
    span {
      color: blue;
    }
    padding: 10px;
  }
  aspect-ratio: 1 / 1;
  div {
    color: blue;
  }
  background: red;
}
"#,
            r#"{
                "body": {
                    "p": { "span": { "color": "blue" }, "padding": "10px" },
                    "aspect-ratio": "1 / 1",
                    "div": { "color": "blue" },
                    "background": "red"
                }
            }"#,
        );
    }

    #[test]
    fn test_statement_at_rules() {
        round_trip(
            r#"
@charset "utf-8";
@import url(theme.css);
a {
  color: red;
}
"#,
            r#"{
                "@charset \"utf-8\"": "",
                "@import url(theme.css)": "",
                "a": { "color": "red" }
            }"#,
        );
    }

    #[test]
    fn test_unknown_at_rule_is_compact() {
        round_trip(
            "@custom-thing foo { whatever goes; here; }",
            r#"{ "@custom-thing foo": { "@custom-thing foo": "whatever goes; here" } }"#,
        );
    }

    #[test]
    fn test_merge_law() {
        init_logger();
        let document = decode(
            "a { color: red; margin: 0 } b { x: y } a { padding: 1px; color: blue }",
        )
        .unwrap();
        assert_eq!(
            document,
            tree(
                r#"{
                    "a": { "color": "blue", "margin": "0", "padding": "1px" },
                    "b": { "x": "y" }
                }"#
            )
        );
    }

    #[test]
    fn test_repeated_at_rules_merge_deeply() {
        let document = decode(
            "@media print { a { x: 1 } } @media print { a { y: 2 } b { z: 3 } }",
        )
        .unwrap();
        assert_eq!(
            document,
            tree(r#"{ "@media print": { "a": { "x": "1", "y": "2" }, "b": { "z": "3" } } }"#)
        );
    }

    #[test]
    fn test_idempotence() {
        init_logger();
        let inputs = [
            "a { color: #f00; width: calc(100% - 80px); height: calc(2 * 10px) }",
            "ul > li , ol>li { margin : 0 auto ; }",
            "@custom-thing { a b c }",
            "@media screen { a { b: c } } a { --x: { y: z } }",
            "a { font: 12px/1.5 \"Helvetica Neue\", Arial, sans-serif }",
        ];
        for input in inputs {
            let once = decode(input).unwrap();
            let twice = decode(&to_css(&once)).unwrap();
            assert_eq!(twice, once, "input: {input}");
        }
    }

    #[test]
    fn test_canonical_values() {
        let document = decode(
            r#"
a {
  color: #ff0000;
  background: hsl(200deg 50% 50%);
  border-color: rgba(0, 0, 0, 0.5);
  outline-color: oklch(0 0 0);
  width: calc(100% - 80px);
  height: calc(2 * 10px);
  margin: 0px   auto;
  font-family: "Helvetica Neue", Arial;
}
ul  >  li {
  -webkit-transition: opacity 1s;
}
"#,
        )
        .unwrap();
        assert_eq!(
            document,
            tree(
                r#"{
                    "a": {
                        "color": "rgb(255 0 0)",
                        "background": "hsl(200 50% 50%)",
                        "border-color": "rgb(0 0 0 / 0.5)",
                        "outline-color": "oklch(0 0 0)",
                        "width": "calc(sum(100% - 80px))",
                        "height": "calc(2 * 10px)",
                        "margin": "0px auto",
                        "font-family": "\"Helvetica Neue\", Arial"
                    },
                    "ul>li": { "-webkit-transition": "opacity 1s" }
                }"#
            )
        );
    }

    #[test]
    fn test_unmodeled_value_falls_back() {
        init_logger();
        let document = decode("a { b: <!--; c: d }").unwrap();
        let a = block(&document, "a");
        assert_eq!(a.get("b"), Some(&Rule::from(UNABLE_TO_PARSE)));
        assert_eq!(a.get("c"), Some(&Rule::from("d")));
    }

    #[test]
    fn test_unknown_color_space_falls_back() {
        let document = decode("a { color: color(cmyk 0 0 0); b: c }").unwrap();
        let a = block(&document, "a");
        assert_eq!(a.get("color"), Some(&Rule::from(UNABLE_TO_PARSE)));
        assert_eq!(a.get("b"), Some(&Rule::from("c")));
    }

    #[test]
    fn test_unrecognized_rules_are_skipped() {
        init_logger();
        let document = decode("a { b: c } ??? { x: y } d { e: f }").unwrap();
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["a", "d"]);
    }

    #[test]
    fn test_numbers_round_trip_as_written() {
        round_trip(
            r#"
a {
  width: 33.33333%;
  z-index: 3000000000;
  margin: 1e50px;
  height: calc(10px / 3);
  padding: calc(2 * 3px);
}
"#,
            r#"{
                "a": {
                    "width": "33.33333%",
                    "z-index": "3000000000",
                    "margin": "1e50px",
                    "height": "calc(10px / 3)",
                    "padding": "calc(2 * 3px)"
                }
            }"#,
        );
    }

    #[test]
    fn test_statement_inside_block_of_same_key() {
        let once = tree(r#"{ "@layer x": { "@layer x": "" } }"#);
        let css = to_css(&once);
        assert_eq!(css, "@layer x {\n  @layer x;\n}\n");
        let twice = decode(&css).unwrap();
        assert_eq!(twice, once);
        let inner = block(&twice, "@layer x").get("@layer x").and_then(Rule::as_value);
        assert_eq!(inner, Some(""));
    }

    #[test]
    fn test_empty_unknown_at_rule_body() {
        let once = decode("@custom-thing {}").unwrap();
        assert_eq!(once, tree(r#"{ "@custom-thing": {} }"#));
        assert_eq!(decode(&to_css(&once)).unwrap(), once);
    }

    #[test]
    fn test_fatal_parse_error() {
        let error = decode("\nthis is not css").unwrap_err();
        assert_eq!((error.line, error.column), (2, 1));
        assert!(decode("").unwrap().is_empty());
        assert!(decode("/* nothing */").unwrap().is_empty());
    }
}

// src/render/value.rs: the value renderer.
use crate::error::RenderError;
use crate::render::identifier;
use crate::style::calc::{Calc, LengthPercentage, MathFunction};
use crate::style::color::{CssColor, LabSpace, LchSpace, PredefinedSpace};
use crate::style::value::{Dimension, Function, FunctionArgs, QuotedString, Unmodeled, Value};

/// Printed for a value that has no usable shape.
pub const UNABLE_TO_PARSE: &str = "unable-to-parse";

/// Renders one property value.
///
/// Only a `color()` space outside the known set fails; every other value has
/// a textual form, falling back to [`UNABLE_TO_PARSE`].
pub fn render_value(value: &Value) -> Result<String, RenderError> {
    let text = match value {
        Value::Dimension(dimension) => render_dimension(dimension),
        Value::Percentage(percent) => format!("{}%", format_number(*percent)),
        Value::Number(number) => format_number(*number),
        Value::Integer(int) => int.to_string(),
        Value::String(string) => render_string(string),
        Value::Keyword(keyword) => identifier(keyword),
        Value::Function(function) => render_function(function)?,
        Value::Color(color) => render_color(color)?,
        Value::LengthPercentage(length) => render_length_percentage(length),
        Value::List(items) => join(items, " ")?,
        Value::CommaList(items) => join(items, ", ")?,
        Value::Raw(text) => text.clone(),
        Value::Unmodeled(node) => render_unmodeled(node),
    };
    Ok(text)
}

fn join(items: &[Value], separator: &str) -> Result<String, RenderError> {
    let rendered = items.iter().map(render_value).collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(separator))
}

/// Shortest decimal form, no exponent; `-0` prints as `0`.
pub fn format_number(value: f32) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }
    value.to_string()
}

fn render_dimension(dimension: &Dimension) -> String {
    format!("{}{}", format_number(dimension.value), dimension.unit)
}

pub(crate) fn render_string(string: &QuotedString) -> String {
    let mut out = String::with_capacity(string.value.len() + 2);
    out.push(string.quote);
    for c in string.value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\a "),
            c if c == string.quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(string.quote);
    out
}

fn render_function(function: &Function) -> Result<String, RenderError> {
    let args = match &function.args {
        FunctionArgs::Parsed(args) => join(args, ", ")?,
        FunctionArgs::Verbatim(text) => text.clone(),
    };
    Ok(format!("{}({})", identifier(&function.name), args))
}

fn render_unmodeled(node: &Unmodeled) -> String {
    if node.detail.is_none() {
        return UNABLE_TO_PARSE.to_owned();
    }
    serde_json::to_string(node).unwrap_or_else(|_| UNABLE_TO_PARSE.to_owned())
}

fn alpha_suffix(alpha: f32) -> String {
    if alpha < 1.0 {
        format!(" / {}", format_number(alpha))
    } else {
        String::new()
    }
}

fn channels(function: &str, [a, b, c]: [f32; 3], alpha: f32) -> String {
    format!(
        "{}({} {} {}{})",
        function,
        format_number(a),
        format_number(b),
        format_number(c),
        alpha_suffix(alpha)
    )
}

fn predefined_function(space: PredefinedSpace) -> &'static str {
    match space {
        PredefinedSpace::Srgb => "srgb-rgb",
        PredefinedSpace::SrgbLinear => "srgb-linear-rgb",
        PredefinedSpace::DisplayP3 => "display-p3-rgb",
        PredefinedSpace::A98Rgb => "a98-rgb",
        PredefinedSpace::ProphotoRgb => "prophoto-rgb",
        PredefinedSpace::Rec2020 => "rec2020-rgb",
        PredefinedSpace::XyzD50 => "xyz-d50",
        PredefinedSpace::XyzD65 => "xyz-d65",
    }
}

/// Renders a color with the fixed template of its color space.
pub fn render_color(color: &CssColor) -> Result<String, RenderError> {
    let text = match color {
        CssColor::CurrentColor => "currentcolor".to_owned(),
        CssColor::Named(name) => name.clone(),
        CssColor::Rgb(rgb) => channels("rgb", [rgb.r, rgb.g, rgb.b], rgb.alpha),
        CssColor::Hsl(hsl) => format!(
            "hsl({} {}% {}%{})",
            format_number(hsl.h),
            format_number(hsl.s),
            format_number(hsl.l),
            alpha_suffix(hsl.alpha)
        ),
        CssColor::Hwb(hwb) => format!(
            "hwb({} {}% {}%{})",
            format_number(hwb.h),
            format_number(hwb.w),
            format_number(hwb.b),
            alpha_suffix(hwb.alpha)
        ),
        CssColor::Lab(lab) => {
            let function = match lab.space {
                LabSpace::Lab => "lab",
                LabSpace::Oklab => "oklab",
            };
            channels(function, [lab.l, lab.a, lab.b], lab.alpha)
        }
        CssColor::Lch(lch) => {
            let function = match lch.space {
                LchSpace::Lch => "lch",
                LchSpace::Oklch => "oklch",
            };
            channels(function, [lch.l, lch.c, lch.h], lch.alpha)
        }
        CssColor::Predefined(predefined) => {
            let space: PredefinedSpace = predefined.space.parse()?;
            channels(predefined_function(space), predefined.channels, predefined.alpha)
        }
        CssColor::LightDark(light, dark) => {
            format!("light-dark({} {})", render_color(light)?, render_color(dark)?)
        }
    };
    Ok(text)
}

fn render_length_percentage(length: &LengthPercentage) -> String {
    match length {
        LengthPercentage::Dimension(dimension) => render_dimension(dimension),
        LengthPercentage::Percentage(percent) => format!("{}%", format_number(*percent)),
        LengthPercentage::Calc(function) => render_math_function(function),
    }
}

fn render_calc(calc: &Calc) -> String {
    match calc {
        Calc::Value(length) => render_length_percentage(length),
        Calc::Number(number) => format_number(*number),
        Calc::Function(function) => render_math_function(function),
        Calc::Product(factor, rest) => format!("{} * {}", format_number(*factor), render_calc(rest)),
        Calc::Sum { source, .. } => format!("sum({})", source),
    }
}

fn render_math_function(function: &MathFunction) -> String {
    let args: Vec<String> = match function {
        MathFunction::Calc(calc) => vec![render_calc(calc)],
        MathFunction::Min(args) | MathFunction::Max(args) | MathFunction::Hypot(args) => {
            args.iter().map(render_calc).collect()
        }
        MathFunction::Clamp(min, value, max) => {
            vec![render_calc(min), render_calc(value), render_calc(max)]
        }
        MathFunction::Abs(value) | MathFunction::Sign(value) => vec![render_calc(value)],
        MathFunction::Mod(a, b) | MathFunction::Rem(a, b) => vec![render_calc(a), render_calc(b)],
        MathFunction::Round {
            strategy,
            value,
            interval,
        } => strategy
            .iter()
            .cloned()
            .chain(Some(render_calc(value)))
            .chain(interval.as_ref().map(render_calc))
            .collect(),
    };
    format!("{}({})", function.name(), args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::{HslColor, HwbColor, LabColor, LchColor, PredefinedColor, RgbColor};

    fn color(color: CssColor) -> String {
        render_color(&color).unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn numbers() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(100.0), "100");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn scalar_values() {
        assert_eq!(
            render_value(&Value::Dimension(Dimension::new(100.0, "px"))),
            Ok("100px".to_owned())
        );
        assert_eq!(render_value(&Value::Percentage(50.0)), Ok("50%".to_owned()));
        assert_eq!(
            render_value(&Value::String(QuotedString::new("it's", '\''))),
            Ok("'it\\'s'".to_owned())
        );
        assert_eq!(
            render_value(&Value::List(vec![
                Value::Dimension(Dimension::new(1.0, "px")),
                Value::Keyword("solid".to_owned()),
            ])),
            Ok("1px solid".to_owned())
        );
    }

    #[test]
    fn functions() {
        let gradient = Value::Function(Function::new(
            "linear-gradient",
            vec![
                Value::Keyword("red".to_owned()),
                Value::Keyword("blue".to_owned()),
            ],
        ));
        assert_eq!(render_value(&gradient), Ok("linear-gradient(red, blue)".to_owned()));
        let url = Value::Function(Function::verbatim("url", "a.png"));
        assert_eq!(render_value(&url), Ok("url(a.png)".to_owned()));
    }

    #[test]
    fn color_table() {
        assert_eq!(
            color(CssColor::Hsl(HslColor {
                h: 200.0,
                s: 50.0,
                l: 50.0,
                alpha: 1.0
            })),
            "hsl(200 50% 50%)"
        );
        assert_eq!(
            color(CssColor::Lch(LchColor {
                space: LchSpace::Oklch,
                l: 0.0,
                c: 0.0,
                h: 0.0,
                alpha: 1.0
            })),
            "oklch(0 0 0)"
        );
        assert_eq!(color(CssColor::Rgb(RgbColor::new(255.0, 0.0, 0.0))), "rgb(255 0 0)");
        assert_eq!(
            color(CssColor::Hwb(HwbColor {
                h: 90.0,
                w: 10.0,
                b: 20.0,
                alpha: 1.0
            })),
            "hwb(90 10% 20%)"
        );
        assert_eq!(
            color(CssColor::Lab(LabColor {
                space: LabSpace::Lab,
                l: 50.0,
                a: 20.0,
                b: -30.0,
                alpha: 1.0
            })),
            "lab(50 20 -30)"
        );
        assert_eq!(
            color(CssColor::Lab(LabColor {
                space: LabSpace::Oklab,
                l: 0.5,
                a: 0.1,
                b: -0.1,
                alpha: 1.0
            })),
            "oklab(0.5 0.1 -0.1)"
        );
        assert_eq!(
            color(CssColor::Lch(LchColor {
                space: LchSpace::Lch,
                l: 50.0,
                c: 30.0,
                h: 270.0,
                alpha: 1.0
            })),
            "lch(50 30 270)"
        );
        assert_eq!(color(CssColor::CurrentColor), "currentcolor");
    }

    #[test]
    fn predefined_spaces() {
        let predefined = |space: &str| {
            CssColor::Predefined(PredefinedColor {
                space: space.to_owned(),
                channels: [1.0, 0.5, 0.0],
                alpha: 1.0,
            })
        };
        assert_eq!(
            color(CssColor::Predefined(PredefinedColor {
                space: "srgb".to_owned(),
                channels: [255.0, 0.0, 0.0],
                alpha: 1.0,
            })),
            "srgb-rgb(255 0 0)"
        );
        assert_eq!(color(predefined("display-p3")), "display-p3-rgb(1 0.5 0)");
        assert_eq!(color(predefined("a98-rgb")), "a98-rgb(1 0.5 0)");
        assert_eq!(color(predefined("prophoto-rgb")), "prophoto-rgb(1 0.5 0)");
        assert_eq!(color(predefined("rec2020")), "rec2020-rgb(1 0.5 0)");
        assert_eq!(color(predefined("xyz-d50")), "xyz-d50(1 0.5 0)");
        assert_eq!(color(predefined("xyz-d65")), "xyz-d65(1 0.5 0)");
        assert_eq!(color(predefined("srgb-linear")), "srgb-linear-rgb(1 0.5 0)");
        assert_eq!(color(predefined("xyz")), "xyz-d65(1 0.5 0)");
        assert_eq!(
            render_color(&predefined("cmyk")),
            Err(RenderError::UnknownColorSpace("cmyk".to_owned()))
        );
    }

    #[test]
    fn light_dark_and_alpha() {
        let light_dark = CssColor::LightDark(
            Box::new(CssColor::Named("white".to_owned())),
            Box::new(CssColor::Rgb(RgbColor {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                alpha: 0.5,
            })),
        );
        assert_eq!(color(light_dark), "light-dark(white rgb(0 0 0 / 0.5))");
    }

    #[test]
    fn calc_expressions() {
        let px = |value: f32| Calc::Value(LengthPercentage::Dimension(Dimension::new(value, "px")));
        let product = MathFunction::Calc(Calc::Product(2.0, Box::new(px(10.0))));
        assert_eq!(render_math_function(&product), "calc(2 * 10px)");

        let sum = MathFunction::Calc(Calc::Sum {
            operands: vec![px(1.0), px(2.0)],
            source: "1px + 2px".to_owned(),
        });
        assert_eq!(render_math_function(&sum), "calc(sum(1px + 2px))");

        let clamp = MathFunction::Clamp(px(1.0), Calc::Value(LengthPercentage::Percentage(50.0)), px(3.0));
        assert_eq!(render_math_function(&clamp), "clamp(1px, 50%, 3px)");

        let round = MathFunction::Round {
            strategy: Some("up".to_owned()),
            value: px(7.0),
            interval: Some(px(2.0)),
        };
        assert_eq!(render_math_function(&round), "round(up, 7px, 2px)");
    }

    #[test]
    fn unmodeled_values() {
        assert_eq!(
            render_value(&Value::Unmodeled(Unmodeled::new("cdo", None))),
            Ok(UNABLE_TO_PARSE.to_owned())
        );
        assert_eq!(
            render_value(&Value::Unmodeled(Unmodeled::new("bad-url", Some("a b".to_owned())))),
            Ok(r#"{"kind":"bad-url","detail":"a b"}"#.to_owned())
        );
    }
}

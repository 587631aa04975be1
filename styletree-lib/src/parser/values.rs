// src/parser/values.rs: classifies the tokens of one value into a `Value`.
use cssparser::{Delimiter, ParseError, Parser, SourcePosition, ToCss, Token};

use crate::error::SyntaxError;
use crate::parser::{
    consume_rest, exact_or_raw, percentage_number, prints_as, syntax_error, SyntaxResult,
};
use crate::style::calc::{is_length_unit, Calc, LengthPercentage, MathFunction};
use crate::style::color::{
    CssColor, HslColor, HwbColor, LabColor, LabSpace, LchColor, LchSpace, PredefinedColor,
    RgbColor,
};
use crate::style::owned_css::PropertyName;
use crate::style::value::{Dimension, Function, FunctionArgs, QuotedString, Unmodeled, Value};

pub(crate) struct DeclarationValue {
    pub value: Value,
    pub important: bool,
}

/// Reads everything after the `:` of a declaration.
pub(crate) fn parse_declaration_value<'i>(
    input: &mut Parser<'i, '_>,
    property: &PropertyName,
) -> SyntaxResult<'i, DeclarationValue> {
    input.skip_whitespace();
    if property.is_custom() {
        return parse_custom_value(input);
    }
    let start = input.position();
    let groups = parse_groups(input, true)?;
    if groups.is_empty() {
        return Err(input.new_custom_error(SyntaxError::EmptyValue));
    }
    let important = groups.important;
    let end = groups.end;
    let value = match groups.into_value() {
        Some(value) => value,
        None => Value::Raw(source_text(input, start, end)),
    };
    Ok(DeclarationValue { value, important })
}

/// A value outside any declaration: at-rule preludes and media features.
pub(crate) fn parse_component_value<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Value> {
    let start = input.position();
    let groups = parse_groups(input, false)?;
    if groups.is_empty() {
        return Err(input.new_custom_error(SyntaxError::EmptyValue));
    }
    let end = groups.end;
    Ok(groups
        .into_value()
        .unwrap_or_else(|| Value::Raw(source_text(input, start, end))))
}

fn source_text(input: &Parser<'_, '_>, start: SourcePosition, end: Option<SourcePosition>) -> String {
    match end {
        Some(end) => input.slice(start..end).trim().to_owned(),
        None => input.slice_from(start).trim().to_owned(),
    }
}

fn parse_custom_value<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, DeclarationValue> {
    let start = input.position();
    let mut end = start;
    let mut important = false;
    loop {
        let before = input.state();
        match input.next_including_whitespace() {
            Err(_) => break,
            Ok(Token::WhiteSpace(_)) => continue,
            Ok(Token::Delim('!')) => {
                input.reset(&before);
                if input.try_parse(cssparser::parse_important).is_ok() {
                    important = true;
                    continue;
                }
                input.next_including_whitespace()?;
            }
            Ok(_) => {}
        }
        end = input.position();
    }
    Ok(DeclarationValue {
        value: Value::Raw(input.slice(start..end).to_owned()),
        important,
    })
}

struct ValueGroups {
    groups: Vec<Vec<Value>>,
    important: bool,
    /// End of the last token that belongs to the value.
    end: Option<SourcePosition>,
}

impl ValueGroups {
    fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// None when a group is empty, as in `a,,b` or a trailing comma.
    fn into_value(self) -> Option<Value> {
        let mut groups = self.into_groups()?;
        if groups.len() == 1 {
            return groups.pop();
        }
        Some(Value::CommaList(groups))
    }

    fn into_args(self) -> Option<Vec<Value>> {
        if self.is_empty() && self.groups.len() == 1 {
            return Some(Vec::new());
        }
        self.into_groups()
    }

    fn into_groups(self) -> Option<Vec<Value>> {
        if self.groups.iter().any(Vec::is_empty) {
            return None;
        }
        Some(
            self.groups
                .into_iter()
                .map(|mut words| {
                    if words.len() == 1 {
                        words.remove(0)
                    } else {
                        Value::List(words)
                    }
                })
                .collect(),
        )
    }
}

/// Adjacent tokens with no whitespace between them.
#[derive(Default)]
struct Word {
    values: Vec<Value>,
    span: Option<(SourcePosition, SourcePosition)>,
}

impl Word {
    fn push(&mut self, start: SourcePosition, end: SourcePosition, value: Value) {
        self.span = Some(match self.span {
            Some((first, _)) => (first, end),
            None => (start, end),
        });
        self.values.push(value);
    }

    fn flush(&mut self, input: &Parser<'_, '_>, into: &mut Vec<Vec<Value>>) {
        let Some((start, end)) = self.span.take() else {
            return;
        };
        let mut values = std::mem::take(&mut self.values);
        let word = if values.len() == 1 {
            values.remove(0)
        } else {
            Value::Raw(input.slice(start..end).to_owned())
        };
        if let Some(group) = into.last_mut() {
            group.push(word);
        }
    }
}

fn parse_groups<'i>(input: &mut Parser<'i, '_>, allow_important: bool) -> SyntaxResult<'i, ValueGroups> {
    let mut groups: Vec<Vec<Value>> = vec![Vec::new()];
    let mut word = Word::default();
    let mut important = false;
    let mut end = None;
    loop {
        let before = input.state();
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) => word.flush(input, &mut groups),
            Token::Comma => {
                word.flush(input, &mut groups);
                groups.push(Vec::new());
                end = Some(input.position());
            }
            Token::Delim('!') if allow_important => {
                input.reset(&before);
                if input.try_parse(cssparser::parse_important).is_ok() {
                    word.flush(input, &mut groups);
                    important = true;
                    continue;
                }
                input.next_including_whitespace()?;
                word.push(before.position(), input.position(), Value::Raw("!".to_owned()));
                end = Some(input.position());
            }
            token => {
                let value = classify_token(input, token, before.position())?;
                word.push(before.position(), input.position(), value);
                end = Some(input.position());
            }
        }
    }
    word.flush(input, &mut groups);
    Ok(ValueGroups {
        groups,
        important,
        end,
    })
}

fn classify_token<'i>(
    input: &mut Parser<'i, '_>,
    token: Token<'i>,
    start: SourcePosition,
) -> SyntaxResult<'i, Value> {
    let value = match token {
        Token::Ident(name) => {
            if name.eq_ignore_ascii_case("currentcolor") {
                Value::Color(CssColor::CurrentColor)
            } else {
                Value::Keyword(name.to_string())
            }
        }
        Token::Hash(hash) | Token::IDHash(hash) => match RgbColor::from_hex(&hash) {
            Some(rgb) => Value::Color(CssColor::Rgb(rgb)),
            None => Value::Raw(input.slice_from(start).to_owned()),
        },
        Token::QuotedString(text) => Value::String(QuotedString::new(
            text.to_string(),
            QuotedString::quote_from_source(input.slice_from(start)),
        )),
        Token::UnquotedUrl(url) => Value::Function(Function::verbatim("url", url.to_string())),
        Token::Number {
            value, int_value, ..
        } => exact_or_raw(
            match int_value {
                Some(int) => Value::Integer(int),
                None => Value::Number(value),
            },
            input.slice_from(start),
        ),
        Token::Percentage {
            unit_value,
            int_value,
            ..
        } => exact_or_raw(
            Value::Percentage(percentage_number(unit_value, int_value)),
            input.slice_from(start),
        ),
        Token::Dimension { value, unit, .. } => exact_or_raw(
            Value::Dimension(Dimension::new(value, unit.to_string())),
            input.slice_from(start),
        ),
        Token::Function(name) => parse_function(input, &name)?,
        Token::ParenthesisBlock | Token::SquareBracketBlock => {
            input.parse_nested_block(consume_rest)?;
            Value::Raw(input.slice_from(start).to_owned())
        }
        Token::CurlyBracketBlock => {
            return Err(input.new_custom_error(SyntaxError::UnexpectedBlock));
        }
        Token::BadUrl(text) => Value::Unmodeled(Unmodeled::new("bad-url", Some(text.to_string()))),
        Token::BadString(text) => {
            Value::Unmodeled(Unmodeled::new("bad-string", Some(text.to_string())))
        }
        Token::CDO => Value::Unmodeled(Unmodeled::new("cdo", None)),
        Token::CDC => Value::Unmodeled(Unmodeled::new("cdc", None)),
        Token::CloseParenthesis | Token::CloseSquareBracket | Token::CloseCurlyBracket => {
            Value::Unmodeled(Unmodeled::new("unbalanced-close", None))
        }
        other => Value::Raw(other.to_css_string()),
    };
    Ok(value)
}

fn parse_function<'i>(input: &mut Parser<'i, '_>, name: &str) -> SyntaxResult<'i, Value> {
    let lower = name.to_ascii_lowercase();
    if is_color_function(&lower) {
        let color = input.try_parse(|input| {
            input.parse_nested_block(|input| parse_color_function(input, &lower))
        });
        if let Ok(color) = color {
            return Ok(Value::Color(color));
        }
    }
    if MathFunction::is_math_function(&lower) {
        let math = input.try_parse(|input| {
            input.parse_nested_block(|input| parse_math_function(input, &lower))
        });
        if let Ok(math) = math {
            return Ok(Value::LengthPercentage(LengthPercentage::Calc(Box::new(math))));
        }
    }
    let args = input.parse_nested_block(|input| {
        input.skip_whitespace();
        let start = input.position();
        if let Ok(groups) = input.try_parse(|input| parse_groups(input, false)) {
            if let Some(args) = groups.into_args() {
                return Ok(FunctionArgs::Parsed(args));
            }
        }
        consume_rest(input)?;
        Ok::<_, ParseError<'i, SyntaxError>>(FunctionArgs::Verbatim(
            input.slice_from(start).trim().to_owned(),
        ))
    })?;
    Ok(Value::Function(Function {
        name: name.to_owned(),
        args,
    }))
}

fn is_color_function(name: &str) -> bool {
    matches!(
        name,
        "rgb" | "rgba" | "hsl" | "hsla" | "hwb" | "lab" | "lch" | "oklab" | "oklch" | "color" | "light-dark"
    )
}

#[derive(Debug, Clone, Copy)]
enum Channel {
    Number(f32),
    Percent(f32),
}

impl Channel {
    /// Maps a percentage onto `reference` (100% == reference).
    fn scaled(self, reference: f32) -> f32 {
        match self {
            Channel::Number(value) => value,
            Channel::Percent(percent) => percent / 100.0 * reference,
        }
    }
}

fn angle_degrees(value: f32, unit: &str) -> Option<f32> {
    match unit.to_ascii_lowercase().as_str() {
        "deg" => Some(value),
        "grad" => Some(value * 0.9),
        "rad" => Some(value.to_degrees()),
        "turn" => Some(value * 360.0),
        _ => None,
    }
}

fn parse_color_function<'i>(input: &mut Parser<'i, '_>, name: &str) -> SyntaxResult<'i, CssColor> {
    if name == "light-dark" {
        let light = input.parse_until_before(Delimiter::Comma, parse_color_operand)?;
        input.expect_comma()?;
        let dark = parse_color_operand(input)?;
        return Ok(CssColor::LightDark(Box::new(light), Box::new(dark)));
    }
    let space = if name == "color" {
        Some(input.expect_ident_cloned()?.to_string())
    } else {
        None
    };
    let (mut channels, mut alpha) = parse_channels(input)?;
    // legacy `rgba(r, g, b, a)`
    if alpha.is_none() && channels.len() == 4 {
        alpha = channels.pop();
    }
    let [c1, c2, c3]: [Channel; 3] = channels
        .try_into()
        .map_err(|_| syntax_error(input, SyntaxError::InvalidColor))?;
    let alpha = alpha.map_or(1.0, |alpha| alpha.scaled(1.0));
    let color = match name {
        "rgb" | "rgba" => CssColor::Rgb(RgbColor {
            r: c1.scaled(255.0),
            g: c2.scaled(255.0),
            b: c3.scaled(255.0),
            alpha,
        }),
        "hsl" | "hsla" => CssColor::Hsl(HslColor {
            h: c1.scaled(1.0),
            s: c2.scaled(100.0),
            l: c3.scaled(100.0),
            alpha,
        }),
        "hwb" => CssColor::Hwb(HwbColor {
            h: c1.scaled(1.0),
            w: c2.scaled(100.0),
            b: c3.scaled(100.0),
            alpha,
        }),
        "lab" => CssColor::Lab(LabColor {
            space: LabSpace::Lab,
            l: c1.scaled(100.0),
            a: c2.scaled(125.0),
            b: c3.scaled(125.0),
            alpha,
        }),
        "oklab" => CssColor::Lab(LabColor {
            space: LabSpace::Oklab,
            l: c1.scaled(1.0),
            a: c2.scaled(0.4),
            b: c3.scaled(0.4),
            alpha,
        }),
        "lch" => CssColor::Lch(LchColor {
            space: LchSpace::Lch,
            l: c1.scaled(100.0),
            c: c2.scaled(150.0),
            h: c3.scaled(1.0),
            alpha,
        }),
        "oklch" => CssColor::Lch(LchColor {
            space: LchSpace::Oklch,
            l: c1.scaled(1.0),
            c: c2.scaled(0.4),
            h: c3.scaled(1.0),
            alpha,
        }),
        _ => match space {
            Some(space) => CssColor::Predefined(PredefinedColor {
                space,
                channels: [c1.scaled(1.0), c2.scaled(1.0), c3.scaled(1.0)],
                alpha,
            }),
            None => return Err(input.new_custom_error(SyntaxError::InvalidColor)),
        },
    };
    Ok(color)
}

/// Channels up to an optional `/ alpha`. Legacy commas are skipped.
fn parse_channels<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, (Vec<Channel>, Option<Channel>)> {
    let mut channels = Vec::with_capacity(3);
    let mut alpha = None;
    let mut after_slash = false;
    while let Ok(token) = input.next() {
        let channel = match token.clone() {
            Token::Number { value, .. } => Channel::Number(value),
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => Channel::Percent(percentage_number(unit_value, int_value)),
            Token::Dimension { value, unit, .. } => match angle_degrees(value, &unit) {
                Some(degrees) => Channel::Number(degrees),
                None => return Err(input.new_custom_error(SyntaxError::InvalidColor)),
            },
            Token::Ident(ident) if ident.eq_ignore_ascii_case("none") => Channel::Number(0.0),
            Token::Comma => continue,
            Token::Delim('/') if !after_slash => {
                after_slash = true;
                continue;
            }
            _ => return Err(input.new_custom_error(SyntaxError::InvalidColor)),
        };
        if !after_slash {
            channels.push(channel);
        } else if alpha.is_none() {
            alpha = Some(channel);
        } else {
            return Err(input.new_custom_error(SyntaxError::InvalidColor));
        }
    }
    Ok((channels, alpha))
}

fn parse_color_operand<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, CssColor> {
    let token = input.next()?.clone();
    match token {
        Token::Ident(name) if name.eq_ignore_ascii_case("currentcolor") => Ok(CssColor::CurrentColor),
        Token::Ident(name) => Ok(CssColor::Named(name.to_string())),
        Token::Hash(hash) | Token::IDHash(hash) => RgbColor::from_hex(&hash)
            .map(CssColor::Rgb)
            .ok_or_else(|| input.new_custom_error(SyntaxError::InvalidColor)),
        Token::Function(name) => {
            let lower = name.to_ascii_lowercase();
            if !is_color_function(&lower) {
                return Err(input.new_custom_error(SyntaxError::InvalidColor));
            }
            input.parse_nested_block(|input| parse_color_function(input, &lower))
        }
        _ => Err(input.new_custom_error(SyntaxError::InvalidColor)),
    }
}

fn parse_math_function<'i>(input: &mut Parser<'i, '_>, name: &str) -> SyntaxResult<'i, MathFunction> {
    let invalid = |input: &Parser<'i, '_>| syntax_error(input, SyntaxError::InvalidCalc);
    let function = match name {
        "calc" => MathFunction::Calc(parse_sum(input)?),
        "min" => MathFunction::Min(parse_calc_arguments(input)?),
        "max" => MathFunction::Max(parse_calc_arguments(input)?),
        "hypot" => MathFunction::Hypot(parse_calc_arguments(input)?),
        "clamp" => {
            let [min, value, max]: [Calc; 3] = parse_calc_arguments(input)?
                .try_into()
                .map_err(|_| invalid(input))?;
            MathFunction::Clamp(min, value, max)
        }
        "abs" | "sign" => {
            let [value]: [Calc; 1] = parse_calc_arguments(input)?
                .try_into()
                .map_err(|_| invalid(input))?;
            if name == "abs" {
                MathFunction::Abs(value)
            } else {
                MathFunction::Sign(value)
            }
        }
        "mod" | "rem" => {
            let [dividend, divisor]: [Calc; 2] = parse_calc_arguments(input)?
                .try_into()
                .map_err(|_| invalid(input))?;
            if name == "mod" {
                MathFunction::Mod(dividend, divisor)
            } else {
                MathFunction::Rem(dividend, divisor)
            }
        }
        "round" => {
            let strategy = input.try_parse(parse_rounding_strategy).ok();
            let mut args = parse_calc_arguments(input)?;
            let interval = match args.len() {
                1 => None,
                2 => args.pop(),
                _ => return Err(invalid(input)),
            };
            let value = args.remove(0);
            MathFunction::Round {
                strategy,
                value,
                interval,
            }
        }
        _ => return Err(invalid(input)),
    };
    Ok(function)
}

fn parse_rounding_strategy<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, String> {
    let ident = input.expect_ident_cloned()?;
    match ident.to_ascii_lowercase().as_str() {
        "nearest" | "up" | "down" | "to-zero" => {
            input.expect_comma()?;
            Ok(ident.to_string())
        }
        _ => Err(input.new_custom_error(SyntaxError::InvalidCalc)),
    }
}

fn parse_calc_arguments<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Vec<Calc>> {
    let mut args = Vec::new();
    loop {
        args.push(input.parse_until_before(Delimiter::Comma, parse_sum)?);
        if input.try_parse(|input| input.expect_comma()).is_err() {
            break;
        }
    }
    Ok(args)
}

fn parse_sum<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Calc> {
    input.skip_whitespace();
    let start = input.position();
    let mut operands = vec![parse_product(input)?];
    let mut end = input.position();
    loop {
        let state = input.state();
        let negate = match input.next() {
            Ok(Token::Delim('+')) => false,
            Ok(Token::Delim('-')) => true,
            Ok(_) => return Err(input.new_custom_error(SyntaxError::InvalidCalc)),
            Err(_) => {
                input.reset(&state);
                break;
            }
        };
        let operand = parse_product(input)?;
        operands.push(if negate {
            Calc::Product(-1.0, Box::new(operand))
        } else {
            operand
        });
        end = input.position();
    }
    if operands.len() == 1 {
        return Ok(operands.remove(0));
    }
    Ok(Calc::Sum {
        operands,
        source: input.slice(start..end).to_owned(),
    })
}

fn parse_product<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Calc> {
    let mut node = parse_calc_leaf(input)?;
    loop {
        let state = input.state();
        let divide = match input.next() {
            Ok(Token::Delim('*')) => false,
            Ok(Token::Delim('/')) => true,
            _ => {
                input.reset(&state);
                break;
            }
        };
        // a reciprocal would not print back as written
        if divide {
            return Err(input.new_custom_error(SyntaxError::InvalidCalc));
        }
        let rhs = parse_calc_leaf(input)?;
        node = match multiply(node, rhs) {
            Some(product) => product,
            None => return Err(input.new_custom_error(SyntaxError::InvalidCalc)),
        };
    }
    Ok(node)
}

/// Exactly one side of a product has to be a plain number.
fn multiply(lhs: Calc, rhs: Calc) -> Option<Calc> {
    match (lhs, rhs) {
        (Calc::Number(_), Calc::Number(_)) => None,
        (Calc::Number(factor), other) | (other, Calc::Number(factor)) => {
            Some(Calc::Product(factor, Box::new(other)))
        }
        _ => None,
    }
}

/// A calc leaf has to print back as written.
fn exact_leaf<'i>(input: &Parser<'i, '_>, start: SourcePosition, value: &Value) -> SyntaxResult<'i, ()> {
    if prints_as(value, input.slice_from(start)) {
        Ok(())
    } else {
        Err(syntax_error(input, SyntaxError::InvalidCalc))
    }
}

fn parse_calc_leaf<'i>(input: &mut Parser<'i, '_>) -> SyntaxResult<'i, Calc> {
    input.skip_whitespace();
    let start = input.position();
    let token = input.next()?.clone();
    match token {
        Token::Number { value, .. } => {
            exact_leaf(input, start, &Value::Number(value))?;
            Ok(Calc::Number(value))
        }
        Token::Percentage {
            unit_value,
            int_value,
            ..
        } => {
            let percent = percentage_number(unit_value, int_value);
            exact_leaf(input, start, &Value::Percentage(percent))?;
            Ok(Calc::Value(LengthPercentage::Percentage(percent)))
        }
        Token::Dimension { value, unit, .. } if is_length_unit(&unit) => {
            let dimension = Dimension::new(value, unit.to_string());
            exact_leaf(input, start, &Value::Dimension(dimension.clone()))?;
            Ok(Calc::Value(LengthPercentage::Dimension(dimension)))
        }
        Token::ParenthesisBlock => input.parse_nested_block(parse_sum),
        Token::Function(name) if MathFunction::is_math_function(&name) => {
            let lower = name.to_ascii_lowercase();
            let function = input.parse_nested_block(|input| parse_math_function(input, &lower))?;
            Ok(Calc::Function(Box::new(function)))
        }
        _ => Err(input.new_custom_error(SyntaxError::InvalidCalc)),
    }
}

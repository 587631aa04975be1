use crate::style::value::Dimension;

/// A length, a percentage, or a math expression mixing the two.
#[derive(Debug, Clone, PartialEq)]
pub enum LengthPercentage {
    Dimension(Dimension),
    Percentage(f32),
    Calc(Box<MathFunction>),
}

/// A node of a `calc()` expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Calc {
    Value(LengthPercentage),
    Number(f32),
    Function(Box<MathFunction>),
    /// `factor * operand`; division by a number is stored as its reciprocal.
    Product(f32, Box<Calc>),
    /// Additions and subtractions. `source` is the expression as written.
    Sum { operands: Vec<Calc>, source: String },
}

/// A named math function.
#[derive(Debug, Clone, PartialEq)]
pub enum MathFunction {
    Calc(Calc),
    Min(Vec<Calc>),
    Max(Vec<Calc>),
    Clamp(Calc, Calc, Calc),
    Abs(Calc),
    Hypot(Vec<Calc>),
    Mod(Calc, Calc),
    Rem(Calc, Calc),
    Round {
        strategy: Option<String>,
        value: Calc,
        interval: Option<Calc>,
    },
    Sign(Calc),
}

impl MathFunction {
    pub fn name(&self) -> &'static str {
        match self {
            MathFunction::Calc(_) => "calc",
            MathFunction::Min(_) => "min",
            MathFunction::Max(_) => "max",
            MathFunction::Clamp(..) => "clamp",
            MathFunction::Abs(_) => "abs",
            MathFunction::Hypot(_) => "hypot",
            MathFunction::Mod(..) => "mod",
            MathFunction::Rem(..) => "rem",
            MathFunction::Round { .. } => "round",
            MathFunction::Sign(_) => "sign",
        }
    }

    pub fn is_math_function(name: &str) -> bool {
        matches!(
            name.to_ascii_lowercase().as_str(),
            "calc" | "min" | "max" | "clamp" | "abs" | "hypot" | "mod" | "rem" | "round" | "sign"
        )
    }
}

const LENGTH_UNITS: &[&str] = &[
    "px", "cm", "mm", "q", "in", "pt", "pc", "em", "rem", "ex", "rex", "cap", "rcap", "ch", "rch",
    "ic", "ric", "lh", "rlh", "vw", "vh", "vi", "vb", "vmin", "vmax", "svw", "svh", "svi", "svb",
    "svmin", "svmax", "lvw", "lvh", "lvi", "lvb", "lvmin", "lvmax", "dvw", "dvh", "dvi", "dvb",
    "dvmin", "dvmax", "cqw", "cqh", "cqi", "cqb", "cqmin", "cqmax",
];

pub fn is_length_unit(unit: &str) -> bool {
    LENGTH_UNITS.iter().any(|known| known.eq_ignore_ascii_case(unit))
}

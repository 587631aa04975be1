use std::str::FromStr;

use crate::error::RenderError;

/// A color value, one variant per color syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum CssColor {
    /// The `currentcolor` keyword.
    CurrentColor,
    /// A named or system color. Only produced for `light-dark()` operands;
    /// a bare `red` elsewhere stays a keyword.
    Named(String),
    /// Device RGB: `rgb()`, `rgba()` and hex notation. Channels are 0-255.
    Rgb(RgbColor),
    Hsl(HslColor),
    Hwb(HwbColor),
    /// `lab()` and `oklab()`.
    Lab(LabColor),
    /// `lch()` and `oklch()`.
    Lch(LchColor),
    /// `color(<space> c1 c2 c3)`.
    Predefined(PredefinedColor),
    LightDark(Box<CssColor>, Box<CssColor>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
}

impl RgbColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        RgbColor {
            r,
            g,
            b,
            alpha: 1.0,
        }
    }

    /// Reads `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa` (without the `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let (r, g, b, a) = match hex.len() {
            3 | 4 => {
                let short = |i: usize| digit(i).map(|d| d * 17);
                let a = if hex.len() == 4 { short(3)? } else { 255 };
                (short(0)?, short(1)?, short(2)?, a)
            }
            6 | 8 => {
                let a = if hex.len() == 8 { pair(6)? } else { 255 };
                (pair(0)?, pair(2)?, pair(4)?, a)
            }
            _ => return None,
        };
        Some(RgbColor {
            r: f32::from(r),
            g: f32::from(g),
            b: f32::from(b),
            alpha: f32::from(a) / 255.0,
        })
    }
}

/// `hsl(h s% l%)`; `s` and `l` hold the percentage numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub alpha: f32,
}

/// `hwb(h w% b%)`; `w` and `b` hold the percentage numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HwbColor {
    pub h: f32,
    pub w: f32,
    pub b: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabSpace {
    Lab,
    Oklab,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabColor {
    pub space: LabSpace,
    pub l: f32,
    pub a: f32,
    pub b: f32,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LchSpace {
    Lch,
    Oklch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LchColor {
    pub space: LchSpace,
    pub l: f32,
    pub c: f32,
    pub h: f32,
    pub alpha: f32,
}

/// A `color()` value. The space is kept as written and only resolved to a
/// [`PredefinedSpace`] when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PredefinedColor {
    pub space: String,
    pub channels: [f32; 3],
    pub alpha: f32,
}

/// Color spaces accepted by `color()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedSpace {
    Srgb,
    SrgbLinear,
    DisplayP3,
    A98Rgb,
    ProphotoRgb,
    Rec2020,
    XyzD50,
    XyzD65,
}

impl FromStr for PredefinedSpace {
    type Err = RenderError;

    fn from_str(space: &str) -> Result<Self, Self::Err> {
        let space = match space.to_ascii_lowercase().as_str() {
            "srgb" => PredefinedSpace::Srgb,
            "srgb-linear" => PredefinedSpace::SrgbLinear,
            "display-p3" => PredefinedSpace::DisplayP3,
            "a98-rgb" => PredefinedSpace::A98Rgb,
            "prophoto-rgb" => PredefinedSpace::ProphotoRgb,
            "rec2020" => PredefinedSpace::Rec2020,
            "xyz-d50" => PredefinedSpace::XyzD50,
            // Plain `xyz` is an alias for D65.
            "xyz" | "xyz-d65" => PredefinedSpace::XyzD65,
            _ => return Err(RenderError::UnknownColorSpace(space.to_owned())),
        };
        Ok(space)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_forms() {
        assert_eq!(RgbColor::from_hex("f00"), Some(RgbColor::new(255.0, 0.0, 0.0)));
        assert_eq!(
            RgbColor::from_hex("00ff0080").map(|c| (c.g, (c.alpha * 100.0).round())),
            Some((255.0, 50.0))
        );
        assert_eq!(RgbColor::from_hex("ab"), None);
        assert_eq!(RgbColor::from_hex("zzz"), None);
    }

    #[test]
    fn predefined_space_lookup() {
        assert_eq!("Display-P3".parse::<PredefinedSpace>(), Ok(PredefinedSpace::DisplayP3));
        assert_eq!("xyz".parse::<PredefinedSpace>(), Ok(PredefinedSpace::XyzD65));
        assert_eq!(
            "cmyk".parse::<PredefinedSpace>(),
            Err(RenderError::UnknownColorSpace("cmyk".to_owned()))
        );
    }
}

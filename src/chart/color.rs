//! Colour helpers.

use std::fmt;

/// Alpha appended to a section's hex colour for the outer leaf circle.
pub const LEAF_ALPHA_SUFFIX: &str = "50";

/// Opacity equivalent of [`LEAF_ALPHA_SUFFIX`], for colours that are not hex.
const LEAF_ALPHA: f64 = 0x50 as f64 / 255.0;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLUE: Self = Self(0, 0, 255);

    /// Parse `#rgb` or `#rrggbb`.
    pub fn parse_hex(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i].repeat(2));
                Some(Self(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Some(Self(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Two-stop linear colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    pub from: Rgb,
    pub to: Rgb,
}

impl ColorScale {
    pub const fn new(from: Rgb, to: Rgb) -> Self {
        Self { from, to }
    }

    /// Colour at `t`, clamped to `0..=1`.
    pub fn at(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            // Rounded result stays within 0..=255
            (a + (b - a) * t).round() as u8
        };
        Rgb(
            lerp(self.from.0, self.to.0),
            lerp(self.from.1, self.to.1),
            lerp(self.from.2, self.to.2),
        )
    }
}

/// A fill colour with optional opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: String,
    pub opacity: Option<f64>,
}

impl Fill {
    /// Low-opacity variant of `color`.
    ///
    /// Hex colours get [`LEAF_ALPHA_SUFFIX`] appended (`#rgb` is expanded
    /// first); anything else keeps its value and carries the opacity.
    pub fn translucent(color: &str) -> Self {
        match Rgb::parse_hex(color) {
            Some(rgb) => Self {
                color: format!("{rgb}{LEAF_ALPHA_SUFFIX}"),
                opacity: None,
            },
            None => Self {
                color: color.to_owned(),
                opacity: Some(LEAF_ALPHA),
            },
        }
    }
}

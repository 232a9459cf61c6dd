//! Color representations and the conversions between them
//!
//! HSL uses degrees for hue and percent for saturation/lightness, matching the
//! picker strips. RGB is 8 bits per channel. Hex is six lowercase digits with no
//! leading `#`.

use serde::{Deserialize, Serialize};

use crate::error::HexParseError;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack into RGBA bytes with the given alpha
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }

    /// Lowercase six-digit hex, no `#`
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color with integer-valued components
///
/// `h` in [0, 360], `s` and `l` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h as f32, self.s as f32, self.l as f32)
    }

    /// Round a continuous HSL triple into storage form
    pub fn from_f32(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: h.round().clamp(0.0, 360.0) as u16,
            s: s.round().clamp(0.0, 100.0) as u8,
            l: l.round().clamp(0.0, 100.0) as u8,
        }
    }
}

/// Convert HSL (degrees, percent, percent) to 8-bit RGB, rounding to nearest
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = (s / 100.0).clamp(0.0, 1.0);
    let l = (l / 100.0).clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_byte(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert 8-bit RGB to continuous HSL (degrees, percent, percent)
///
/// Achromatic colors report hue 0.
pub fn rgb_to_hsl(rgb: Rgb) -> (f32, f32, f32) {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l * 100.0);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h * 60.0, s * 100.0, l * 100.0)
}

/// Parse `rrggbb` or `rrggbbaa` (optional `#`, any case)
///
/// Returns the color and the alpha byte when one was given.
pub fn parse_hex(text: &str) -> Result<(Rgb, Option<u8>), HexParseError> {
    let digits = text.trim().trim_start_matches('#');
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(HexParseError::InvalidDigit(digits.to_string()));
    }

    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    match digits.len() {
        6 => Ok((Rgb::new(byte(0)?, byte(2)?, byte(4)?), None)),
        8 => Ok((Rgb::new(byte(0)?, byte(2)?, byte(4)?), Some(byte(6)?))),
        n => Err(HexParseError::Length(n)),
    }
}

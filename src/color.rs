//! Color values and the built-in effect palettes

use std::fmt;
use std::str::FromStr;

use femtovg::Color;
use serde::{Deserialize, Serialize};

use crate::error::FxError;

/// An 8-bit straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque color from a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Same color with its alpha multiplied by `factor` (clamped to 0.0-1.0)
    pub fn faded(self, factor: f32) -> Self {
        let alpha = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }

    pub fn to_femtovg(self) -> Color {
        Color::rgba(self.r, self.g, self.b, self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

impl TryFrom<String> for Rgba {
    type Error = FxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Rgba {
    type Err = FxError;

    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` and `transparent`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || FxError::InvalidColor(s.to_string());

        if trimmed.eq_ignore_ascii_case("transparent") {
            return Ok(Rgba::TRANSPARENT);
        }

        if let Some(digits) = trimmed.strip_prefix('#') {
            return parse_hex(digits).ok_or_else(invalid);
        }

        let lower = trimmed.to_ascii_lowercase();
        let args = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        parse_functional(args).ok_or_else(invalid)
    }
}

fn parse_hex(digits: &str) -> Option<Rgba> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

    match digits.len() {
        3 => Some(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Rgba::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Rgba::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |part: &str| -> Option<u8> {
        let value: f32 = part.parse().ok()?;
        value.is_finite().then(|| value.clamp(0.0, 255.0).round() as u8)
    };

    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => {
            let value: f32 = alpha.parse().ok()?;
            if !value.is_finite() {
                return None;
            }
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        None => 255,
    };
    Some(Rgba::new(r, g, b, a))
}

/// Default theme colors of an invitation without custom styles
pub const DEFAULT_PRIMARY: Rgba = Rgba::hex(0x667eea);
pub const DEFAULT_ACCENT: Rgba = Rgba::hex(0x764ba2);

/// Confetti colors, also used for firework bursts
pub const CONFETTI_PALETTE: [Rgba; 7] = [
    Rgba::hex(0xff6b6b),
    Rgba::hex(0xffd93d),
    Rgba::hex(0x6bcb77),
    Rgba::hex(0x4d96ff),
    Rgba::hex(0xff6bb5),
    Rgba::hex(0xa855f7),
    Rgba::hex(0x06b6d4),
];

/// Pink and red shades for hearts
pub const HEART_PALETTE: [Rgba; 6] = [
    Rgba::hex(0xff6b6b),
    Rgba::hex(0xe91e63),
    Rgba::hex(0xff1744),
    Rgba::hex(0xf50057),
    Rgba::hex(0xff4081),
    Rgba::hex(0xec407a),
];

pub const BALLOON_PALETTE: [Rgba; 6] = [
    Rgba::hex(0xff6b6b),
    Rgba::hex(0xffd93d),
    Rgba::hex(0x6bcb77),
    Rgba::hex(0x4d96ff),
    Rgba::hex(0xff6bb5),
    Rgba::hex(0xa855f7),
];

pub const GOLD: Rgba = Rgba::hex(0xffd700);
pub const AMBER: Rgba = Rgba::hex(0xffaa00);
pub const DARK_ORANGE: Rgba = Rgba::hex(0xff8c00);
pub const BALLOON_STRING: Rgba = Rgba::hex(0x666666);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!("#667eea".parse::<Rgba>().unwrap(), Rgba::hex(0x667eea));
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::WHITE);
        assert_eq!("#0008".parse::<Rgba>().unwrap(), Rgba::new(0, 0, 0, 0x88));
        assert_eq!(
            "#ff000080".parse::<Rgba>().unwrap(),
            Rgba::new(255, 0, 0, 0x80)
        );
    }

    #[test]
    fn test_parse_functional_forms() {
        assert_eq!(
            "rgb(255, 107, 107)".parse::<Rgba>().unwrap(),
            Rgba::hex(0xff6b6b)
        );
        assert_eq!(
            "RGBA(255,255,255,0.4)".parse::<Rgba>().unwrap(),
            Rgba::new(255, 255, 255, 102)
        );
        assert_eq!("transparent".parse::<Rgba>().unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Rgba>().is_err());
        assert!("#12".parse::<Rgba>().is_err());
        assert!("#gggggg".parse::<Rgba>().is_err());
        assert!("rgb(1, 2)".parse::<Rgba>().is_err());
        assert!("hsl(0, 50%, 50%)".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display_matches_input() {
        assert_eq!(DEFAULT_PRIMARY.to_string(), "#667eea");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#01020304");
    }

    #[test]
    fn test_faded_scales_alpha() {
        assert_eq!(Rgba::WHITE.faded(0.5).a, 128);
        assert_eq!(Rgba::WHITE.faded(2.0).a, 255);
        assert_eq!(Rgba::WHITE.faded(-1.0).a, 0);
    }
}

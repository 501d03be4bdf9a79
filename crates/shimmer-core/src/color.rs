//! Tagged color values and palette conversions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// First index of the ANSI-256 grayscale ramp (232-255).
const GRAY_RAMP_START: u8 = 232;

/// Mid-gray fallback for palette indices outside the grayscale ramp.
const FALLBACK_GRAY: u8 = 128;

/// A color endpoint for the glow interpolation.
///
/// The variant is fixed at parse time, so malformed values are
/// rejected when the configuration is built, never during rendering.
/// Conversions between the two representations are lossy and only
/// applied where the render mode requires the other form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorValue {
    /// 256-color palette index.
    Indexed(u8),
    /// 24-bit RGB triple.
    Rgb(u8, u8, u8),
}

/// Failure to parse a color value from its string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("malformed hex color {0:?} (expected #RRGGBB)")]
    MalformedHex(String),
    #[error("color channel out of range in {0:?} (channels are 0-255)")]
    ChannelOutOfRange(String),
    #[error("palette index out of range in {0:?} (indices are 0-255)")]
    IndexOutOfRange(String),
    #[error("unrecognized color value {0:?} (expected a palette index, #RRGGBB, or r,g,b)")]
    Unrecognized(String),
}

impl ColorValue {
    /// Resolve to an RGB triple for true-color rendering.
    ///
    /// Palette indices in the grayscale ramp map to their real gray
    /// value; every other index degrades to mid-gray. The fallback is
    /// deliberately lossy and matches the behavior the animation was
    /// written with (no full palette table).
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rgb(r, g, b) => (r, g, b),
            Self::Indexed(i) if i >= GRAY_RAMP_START => {
                let gray = 8 + (i - GRAY_RAMP_START) * 10;
                (gray, gray, gray)
            }
            Self::Indexed(_) => (FALLBACK_GRAY, FALLBACK_GRAY, FALLBACK_GRAY),
        }
    }

    /// Resolve to a palette index for indexed-mode rendering.
    ///
    /// RGB triples map to the nearest ANSI-256 entry: the grayscale
    /// ramp for near-gray colors, the 6x6x6 cube otherwise.
    pub fn to_index(self) -> u8 {
        match self {
            Self::Indexed(i) => i,
            Self::Rgb(r, g, b) => nearest_index(r, g, b),
        }
    }
}

fn nearest_index(r: u8, g: u8, b: u8) -> u8 {
    let avg = ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8;
    let max_diff = r.abs_diff(avg).max(g.abs_diff(avg)).max(b.abs_diff(avg));

    if max_diff < 10 {
        // Near-gray: use the grayscale ramp, with the cube's pure
        // black/white for values past the ramp ends.
        if avg < 8 {
            16
        } else if avg > 248 {
            231
        } else {
            GRAY_RAMP_START + ((avg - 8) / 10).min(23)
        }
    } else {
        16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
    }
}

/// Map one channel to its 6-level color-cube index.
fn cube_index(value: u8) -> u8 {
    // Cube levels sit at 0, 95, 135, 175, 215, 255.
    match value {
        0..=47 => 0,
        48..=114 => 1,
        115..=154 => 2,
        155..=194 => 3,
        195..=234 => 4,
        _ => 5,
    }
}

impl FromStr for ColorValue {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ColorParseError::MalformedHex(trimmed.to_string()));
            }
            let channel = |range: std::ops::Range<usize>| {
                u8::from_str_radix(&hex[range], 16)
                    .map_err(|_| ColorParseError::MalformedHex(trimmed.to_string()))
            };
            return Ok(Self::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?));
        }

        let triple = Regex::new(r"^(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})$").unwrap();
        if let Some(caps) = triple.captures(trimmed) {
            let channel = |i: usize| {
                caps[i]
                    .parse::<u8>()
                    .map_err(|_| ColorParseError::ChannelOutOfRange(trimmed.to_string()))
            };
            return Ok(Self::Rgb(channel(1)?, channel(2)?, channel(3)?));
        }

        if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            return trimmed
                .parse::<u8>()
                .map(Self::Indexed)
                .map_err(|_| ColorParseError::IndexOutOfRange(trimmed.to_string()));
        }

        Err(ColorParseError::Unrecognized(trimmed.to_string()))
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed(i) => write!(f, "{i}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02X}{g:02X}{b:02X}"),
        }
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ColorValue> for String {
    fn from(color: ColorValue) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_palette_index() {
        assert_eq!("213".parse::<ColorValue>().unwrap(), ColorValue::Indexed(213));
        assert_eq!("0".parse::<ColorValue>().unwrap(), ColorValue::Indexed(0));
        assert_eq!(" 255 ".parse::<ColorValue>().unwrap(), ColorValue::Indexed(255));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            "#102030".parse::<ColorValue>().unwrap(),
            ColorValue::Rgb(0x10, 0x20, 0x30)
        );
        assert_eq!(
            "#FFffFF".parse::<ColorValue>().unwrap(),
            ColorValue::Rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_parse_triple() {
        assert_eq!(
            "16, 32,48".parse::<ColorValue>().unwrap(),
            ColorValue::Rgb(16, 32, 48)
        );
        assert_eq!(
            "0,0,0".parse::<ColorValue>().unwrap(),
            ColorValue::Rgb(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            "#12345".parse::<ColorValue>(),
            Err(ColorParseError::MalformedHex(_))
        ));
        assert!(matches!(
            "#12345G".parse::<ColorValue>(),
            Err(ColorParseError::MalformedHex(_))
        ));
        assert!(matches!(
            "300,0,0".parse::<ColorValue>(),
            Err(ColorParseError::ChannelOutOfRange(_))
        ));
        assert!(matches!(
            "256".parse::<ColorValue>(),
            Err(ColorParseError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            "notacolor".parse::<ColorValue>(),
            Err(ColorParseError::Unrecognized(_))
        ));
        assert!(matches!(
            "".parse::<ColorValue>(),
            Err(ColorParseError::Unrecognized(_))
        ));
    }

    #[test]
    fn test_gray_ramp_to_rgb() {
        assert_eq!(ColorValue::Indexed(232).to_rgb(), (8, 8, 8));
        assert_eq!(ColorValue::Indexed(244).to_rgb(), (128, 128, 128));
        assert_eq!(ColorValue::Indexed(255).to_rgb(), (238, 238, 238));
    }

    #[test]
    fn test_non_ramp_index_falls_back_to_mid_gray() {
        // Lossy by design: named colors and the cube all collapse.
        assert_eq!(ColorValue::Indexed(0).to_rgb(), (128, 128, 128));
        assert_eq!(ColorValue::Indexed(15).to_rgb(), (128, 128, 128));
        assert_eq!(ColorValue::Indexed(196).to_rgb(), (128, 128, 128));
    }

    #[test]
    fn test_rgb_to_rgb_is_identity() {
        assert_eq!(ColorValue::Rgb(1, 2, 3).to_rgb(), (1, 2, 3));
    }

    #[test]
    fn test_to_index_gray_ramp() {
        assert_eq!(ColorValue::Rgb(8, 8, 8).to_index(), 232);
        assert_eq!(ColorValue::Rgb(238, 238, 238).to_index(), 255);
        // Past the ramp ends the cube's black/white corners win.
        assert_eq!(ColorValue::Rgb(0, 0, 0).to_index(), 16);
        assert_eq!(ColorValue::Rgb(255, 255, 255).to_index(), 231);
    }

    #[test]
    fn test_to_index_color_cube() {
        // Pure red maps into the cube, not the ramp.
        let idx = ColorValue::Rgb(255, 0, 0).to_index();
        assert_eq!(idx, 16 + 36 * 5);
    }

    #[test]
    fn test_to_index_identity_for_indexed() {
        assert_eq!(ColorValue::Indexed(42).to_index(), 42);
    }

    #[test]
    fn test_display_round_trips() {
        for color in [ColorValue::Indexed(213), ColorValue::Rgb(16, 32, 48)] {
            let parsed: ColorValue = color.to_string().parse().unwrap();
            assert_eq!(parsed, color);
        }
    }

    #[test]
    fn test_serde_string_form() {
        let json = serde_json::to_string(&ColorValue::Rgb(16, 32, 48)).unwrap();
        assert_eq!(json, "\"#102030\"");

        let parsed: ColorValue = serde_json::from_str("\"213\"").unwrap();
        assert_eq!(parsed, ColorValue::Indexed(213));

        assert!(serde_json::from_str::<ColorValue>("\"nope\"").is_err());
    }
}

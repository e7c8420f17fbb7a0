//! Color mapping - `#RRGGBB` strings to RGB bytes
//!
//! Malformed input maps to black. Callers rely on that: a bad color picker
//! value paints black sand instead of failing the frame.

use serde::{Deserialize, Serialize};

/// Gold, the brush color the demo starts with
pub const DEFAULT_SAND_COLOR: &str = "#FFD700";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same as [`hex_to_rgb`]
    pub fn from_hex(hex: &str) -> Self {
        hex_to_rgb(hex)
    }

    /// RGBA bytes in canvas `ImageData` order
    #[inline]
    pub fn to_rgba(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Parse `#RRGGBB` (hex digits in either case). Anything else is black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(Rgb::BLACK)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

//! Hex colour parsing and percentage shading
//!
//! Gallery previews draw a three-stop gradient from a single base colour.
//! Shading adds (or subtracts) `round(2.55 * percent)` to every channel and
//! clamps each channel on its own before reassembling the colour.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value (upper byte ignored)
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Lighten every channel by `percent` of full scale
    pub fn lighten(self, percent: f64) -> Self {
        self.offset(shade_amount(percent))
    }

    /// Darken every channel by `percent` of full scale
    pub fn darken(self, percent: f64) -> Self {
        self.offset(-shade_amount(percent))
    }

    /// Gradient stops used by the gallery preview: light, base, dark
    pub fn shade_gradient(self) -> [Rgb; 3] {
        [self.lighten(20.0), self, self.darken(30.0)]
    }

    fn offset(self, amount: i32) -> Self {
        let channel = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
        Self {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

/// `round(2.55 * percent)` with half-up rounding (ties go toward +inf)
#[inline]
pub fn shade_amount(percent: f64) -> i32 {
    (2.55 * percent + 0.5).floor() as i32
}

/// Error parsing a `#rrggbb` string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex colour: {0:?}")]
pub struct ParseColorError(pub String);

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `#rrggbb` or `rrggbb`, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::from_u32)
            .map_err(|_| ParseColorError(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

//! Color types used for payline styling.
//!
//! - `Rgba`: f64 components in `[0, 1]`, the working space for random colors
//! - `Rgba8`: u8 components, the form handed to line renderers and stored
//!   in configuration files (`"#rrggbb"` / `"#rrggbbaa"` strings)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PaylineError;

/// Round a non-negative double to the nearest unsigned integer (round half up).
#[inline]
fn uround(v: f64) -> u32 {
    (v + 0.5) as u32
}

// ============================================================================
// Rgba (f64 precision color)
// ============================================================================

/// RGBA color with f64 components in range [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn new_rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_MASK: u32 = 255;

    pub const RED: Rgba8 = Rgba8 { r: 255, g: 0, b: 0, a: 255 };
    pub const BLUE: Rgba8 = Rgba8 { r: 0, g: 0, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn new_opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Convert from `Rgba` (f64) to `Rgba8` (u8). Components are clamped.
    pub fn from_rgba(c: &Rgba) -> Self {
        let q = |v: f64| uround(v.clamp(0.0, 1.0) * Self::BASE_MASK as f64) as u8;
        Self {
            r: q(c.r),
            g: q(c.g),
            b: q(c.b),
            a: q(c.a),
        }
    }

    /// Convert to `Rgba` (f64).
    pub fn to_rgba(&self) -> Rgba {
        let m = Self::BASE_MASK as f64;
        Rgba {
            r: self.r as f64 / m,
            g: self.g as f64 / m,
            b: self.b as f64 / m,
            a: self.a as f64 / m,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// `#rrggbb` for opaque colors, `#rrggbbaa` otherwise.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::RED
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba8 {
    type Err = PaylineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PaylineError::InvalidConfiguration(format!("invalid color {s:?}"));
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Rgba8::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(bad()),
        }
    }
}

impl Serialize for Rgba8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_from_rgba_roundtrip() {
        let c = Rgba8::new(12, 128, 200, 255);
        assert_eq!(Rgba8::from_rgba(&c.to_rgba()), c);
        let clamped = Rgba8::from_rgba(&Rgba::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(clamped, Rgba8::new(255, 0, 128, 255));
    }

    #[test]
    fn test_hex_parse_and_format() {
        assert_eq!("#ff0000".parse::<Rgba8>().unwrap(), Rgba8::RED);
        assert_eq!(
            "#10203040".parse::<Rgba8>().unwrap(),
            Rgba8::new(0x10, 0x20, 0x30, 0x40)
        );
        assert_eq!(Rgba8::RED.to_hex(), "#ff0000");
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
        assert!("ff0000".parse::<Rgba8>().is_err());
        assert!("#ff00".parse::<Rgba8>().is_err());
        assert!("#gg0000".parse::<Rgba8>().is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgba8::BLUE).unwrap();
        assert_eq!(json, "\"#0000ff\"");
        let back: Rgba8 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba8::BLUE);
        assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
    }
}

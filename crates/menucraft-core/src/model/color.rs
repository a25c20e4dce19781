//! Color values used by design objects.

use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Serializable color representation (RGBA8).
///
/// Designs store colors as CSS strings (`#e2e2e2`, `rgb(0, 0, 0)`, `white`);
/// this type keeps the parsed channels and writes back a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse a CSS color string.
    ///
    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with `a` in 0..=1, and a handful of named colors.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
        {
            return parse_rgb_function(body.strip_suffix(')')?);
        }

        named_color(&lower)
    }

    /// Parse a CSS color, falling back to black for anything unrecognized.
    pub fn parse_or_black(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::warn!("Unrecognized color {:?}, using black", s);
            Self::black()
        })
    }

    /// Hex string form (`#rrggbb`, or `#rrggbbaa` when not opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Scale the alpha channel by an opacity factor in `0.0..=1.0`.
    pub fn with_opacity(self, opacity: f64) -> Self {
        let a = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

impl Serialize for SerializableColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SerializableColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse_or_black(&s))
    }
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    let hex = hex.trim();
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            // #rgb -> #rrggbb
            let r = channel(0..1)? * 17;
            let g = channel(1..2)? * 17;
            let b = channel(2..3)? * 17;
            Some(SerializableColor::rgb(r, g, b))
        }
        6 => Some(SerializableColor::rgb(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
        )),
        8 => Some(SerializableColor::new(
            channel(0..2)?,
            channel(2..4)?,
            channel(4..6)?,
            channel(6..8)?,
        )),
        _ => None,
    }
}

fn parse_rgb_function(body: &str) -> Option<SerializableColor> {
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    let r = channel(parts[0])?;
    let g = channel(parts[1])?;
    let b = channel(parts[2])?;
    let a = match parts.get(3) {
        Some(alpha) => (alpha.parse::<f64>().ok()?.clamp(0.0, 1.0) * 255.0).round() as u8,
        None => 255,
    };
    Some(SerializableColor::new(r, g, b, a))
}

fn named_color(name: &str) -> Option<SerializableColor> {
    let color = match name {
        "transparent" => SerializableColor::transparent(),
        "black" => SerializableColor::black(),
        "white" => SerializableColor::white(),
        "red" => SerializableColor::rgb(255, 0, 0),
        "green" => SerializableColor::rgb(0, 128, 0),
        "blue" => SerializableColor::rgb(0, 0, 255),
        "gray" | "grey" => SerializableColor::rgb(128, 128, 128),
        "lightgray" | "lightgrey" => SerializableColor::rgb(211, 211, 211),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(
            SerializableColor::parse("#e2e2e2"),
            Some(SerializableColor::rgb(0xe2, 0xe2, 0xe2))
        );
        assert_eq!(SerializableColor::parse("#fff"), Some(SerializableColor::white()));
        assert_eq!(
            SerializableColor::parse("#00000080"),
            Some(SerializableColor::new(0, 0, 0, 0x80))
        );
        assert_eq!(SerializableColor::parse("#12345"), None);
        assert_eq!(SerializableColor::parse("#gggggg"), None);
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(
            SerializableColor::parse("rgb(10, 20, 30)"),
            Some(SerializableColor::rgb(10, 20, 30))
        );
        assert_eq!(
            SerializableColor::parse("rgba(255, 255, 255, 0.5)"),
            Some(SerializableColor::new(255, 255, 255, 128))
        );
    }

    #[test]
    fn test_named_and_fallback() {
        assert_eq!(SerializableColor::parse("White"), Some(SerializableColor::white()));
        assert!(SerializableColor::parse("transparent").is_some_and(|c| c.is_transparent()));
        assert_eq!(SerializableColor::parse_or_black("nonsense"), SerializableColor::black());
    }

    #[test]
    fn test_hex_round_trip_through_serde() {
        let color = SerializableColor::rgb(0x66, 0x66, 0x66);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#666666\"");
        let back: SerializableColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }

    #[test]
    fn test_with_opacity() {
        let c = SerializableColor::black().with_opacity(0.5);
        assert_eq!(c.a, 128);
        let c = SerializableColor::black().with_opacity(2.0);
        assert_eq!(c.a, 255);
    }

    #[test]
    fn test_peniko_conversion() {
        let c = SerializableColor::rgb(1, 2, 3);
        let color: Color = c.into();
        assert_eq!(SerializableColor::from(color), c);
    }
}

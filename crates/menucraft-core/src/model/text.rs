//! Text object properties.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;
/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";
/// Default line height multiplier.
pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

/// Horizontal text alignment inside the object's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font weight using CSS keyword names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// Numeric CSS weight.
    pub fn value(self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }

    pub fn is_bold(self) -> bool {
        self.value() >= 600
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Text-specific fields of an editor object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// Content, may contain explicit line breaks.
    pub text: String,
    /// Font size in canvas pixels.
    pub font_size: f64,
    /// Font family, possibly a CSS fallback list ("Inter, sans-serif").
    pub font_family: String,
    #[serde(default)]
    pub font_weight: FontWeight,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub text_align: TextAlign,
    pub color: SerializableColor,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
}

impl Default for TextProps {
    fn default() -> Self {
        Self {
            text: "Text".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeight::Normal,
            font_style: FontStyle::Normal,
            text_align: TextAlign::Left,
            color: SerializableColor::black(),
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

impl TextProps {
    /// Create text properties with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// The first family in the CSS font list, without quotes.
    pub fn primary_family(&self) -> &str {
        self.font_family
            .split(',')
            .next()
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .unwrap_or("")
    }

    /// Distance between consecutive baselines.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }
}

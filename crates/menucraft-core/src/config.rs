//! Editor configuration.

use crate::model::CanvasSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for an editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas used when the editor opens without a template.
    pub default_canvas: CanvasSize,
    /// Maximum undo depth; `None` keeps every step.
    pub history_limit: Option<usize>,
    /// Offset applied to both axes when duplicating.
    pub duplicate_offset: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Smallest width/height an object may be given.
    pub min_object_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_canvas: CanvasSize::default(),
            history_limit: None,
            duplicate_offset: 20.0,
            min_zoom: 0.4,
            max_zoom: 3.0,
            min_object_size: 1.0,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_zoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.min_object_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_object_size must be positive, got {}",
                self.min_object_size
            )));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Clamp a zoom level into the configured range.
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            1.0_f64.clamp(self.min_zoom, self.max_zoom)
        }
    }
}

//! Design background.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Background-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundProps {
    pub fill: SerializableColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Default for BackgroundProps {
    fn default() -> Self {
        Self {
            fill: SerializableColor::white(),
            image: None,
        }
    }
}

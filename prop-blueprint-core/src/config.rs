use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{ANNOTATION_MARGIN_MM, FIT_FRACTION, LABEL_OFFSET_MM, MAX_FIT_SCALE};
use crate::error::ConfigError;
use crate::viewport::ViewportSize;

/// Layout knobs for the synthesis pipeline. Every field is optional in the
/// JSON form and falls back to the built-in value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintConfig {
    pub viewport: ViewportSize,
    pub annotation_margin: f64,
    pub label_offset: f64,
    pub fill_fraction: f64,
    pub max_scale: f64,
}

impl Default for BlueprintConfig {
    fn default() -> Self {
        BlueprintConfig {
            viewport: ViewportSize::default(),
            annotation_margin: ANNOTATION_MARGIN_MM,
            label_offset: LABEL_OFFSET_MM,
            fill_fraction: FIT_FRACTION,
            max_scale: MAX_FIT_SCALE,
        }
    }
}

impl BlueprintConfig {
    pub fn from_json(txt: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(txt)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let txt = fs::read_to_string(path)?;
        Self::from_json(&txt)
    }

    /// Reject viewport sizes and fit factors that cannot produce a drawing.
    /// Margins only need to be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("fill_fraction", self.fill_fraction),
            ("max_scale", self.max_scale),
        ];
        if let Some(&(field, value)) = positive
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            return Err(ConfigError::Invalid { field, value });
        }
        let finite = [
            ("annotation_margin", self.annotation_margin),
            ("label_offset", self.label_offset),
        ];
        if let Some(&(field, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid { field, value });
        }
        Ok(())
    }
}

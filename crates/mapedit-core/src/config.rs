//! Editor configuration.

use crate::camera::Camera;
use crate::gesture::CLICK_THRESHOLD;
use crate::modes::ModeId;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Screen-space radius within which an entity counts as under the cursor.
pub const PROXIMITY_THRESHOLD: f64 = 8.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the editor core. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Max displacement (scene units) of a click.
    pub click_threshold: f64,
    /// Selection radius in screen units.
    pub proximity_threshold: f64,
    pub initial_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Mode active at startup.
    pub initial_mode: ModeId,
    /// Material new entities are created with.
    pub active_material: String,
    /// Scale new entities are created with.
    pub active_scale: Vec2,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            click_threshold: CLICK_THRESHOLD,
            proximity_threshold: PROXIMITY_THRESHOLD,
            initial_zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 64.0,
            initial_mode: ModeId::LOOK,
            active_material: "crate".to_string(),
            active_scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("Loaded editor config from {}", path.display());
        Self::from_json(&json)
    }

    /// Reject values the editor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Camera::valid_limits(self.min_zoom, self.max_zoom) {
            return Err(ConfigError::Invalid(format!(
                "zoom limits {}..{} must be finite with 0 < min_zoom <= max_zoom",
                self.min_zoom, self.max_zoom
            )));
        }
        if !self.initial_zoom.is_finite() || self.initial_zoom <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_zoom {} must be finite and positive",
                self.initial_zoom
            )));
        }
        for (name, value) in [
            ("click_threshold", self.click_threshold),
            ("proximity_threshold", self.proximity_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} must be finite and non-negative"
                )));
            }
        }
        Ok(())
    }
}

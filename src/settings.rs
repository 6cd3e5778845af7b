//! Driver settings
//!
//! Native builds read a JSON file (path from the command line or
//! `GAP_RUNNER_SETTINGS`); the web build takes a JSON string from the page.
//! Missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::tuning::Tuning;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "GAP_RUNNER_SETTINGS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle RNG seed; random when absent
    pub seed: Option<u64>,
    /// Viewport for the headless driver
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Simulated display refresh rate of the headless driver
    pub frame_rate: u32,
    /// Clamp on a single frame delta (seconds). Off by default.
    pub max_frame_dt: Option<f32>,
    /// Sessions the headless driver plays before exiting
    pub sessions: u32,
    /// Frames after which a headless session is abandoned
    pub max_frames_per_session: u64,
    /// Let the autopilot play
    pub autopilot: bool,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            viewport_width: 800.0,
            viewport_height: 600.0,
            frame_rate: 60,
            max_frame_dt: None,
            sessions: 3,
            max_frames_per_session: 60 * 60 * 5,
            autopilot: true,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Settings handed over by the browser page.
    ///
    /// A player is at the keyboard there, so the autopilot stays off unless
    /// the JSON turns it on. An empty string means all defaults.
    pub fn for_page(json: &str) -> Result<Self, SettingsError> {
        let mut value: serde_json::Value = if json.trim().is_empty() {
            serde_json::Value::Object(Default::default())
        } else {
            serde_json::from_str(json)?
        };
        if let Some(fields) = value.as_object_mut() {
            fields
                .entry("autopilot")
                .or_insert(serde_json::Value::Bool(false));
        }
        let settings: Settings = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings file named by `GAP_RUNNER_SETTINGS`, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, SettingsError> {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => Self::load_from_path(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(
                    field,
                    format!("must be a positive number, got {value}"),
                ));
            }
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::invalid("frame_rate", "must be at least 1"));
        }
        match self.max_frame_dt {
            Some(max) if !(max.is_finite() && max > 0.0) => {
                return Err(SettingsError::invalid(
                    "max_frame_dt",
                    format!("must be a positive number of seconds, got {max}"),
                ));
            }
            _ => {}
        }
        self.tuning.validate()
    }

    /// Length of one simulated frame (seconds)
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }
}

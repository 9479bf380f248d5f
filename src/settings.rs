//! Runner settings
//!
//! Read from a JSON file. Every field has a default, so a partial file (or
//! none at all) is fine. Gameplay tuning is fixed in `consts`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::RUNTIME_SECS;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Runner settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run ===
    /// RNG seed for the game
    pub seed: u64,
    /// Length of the game in seconds of game ticks
    pub runtime_secs: f32,
    /// Pace the loop to wall-clock time instead of running flat out
    pub realtime: bool,
    /// Let the demo player drive the touchscreen
    pub autopilot: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 1,
            runtime_secs: RUNTIME_SECS,
            realtime: false,
            autopilot: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

fn check_volume(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("{value} is outside 0.0 - 1.0"),
        })
    }
}

impl Settings {
    /// Settings file picked up when none is given explicitly
    pub const DEFAULT_PATH: &'static str = "missile-command.json";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.runtime_secs.is_nan() || self.runtime_secs <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "runtime_secs",
                reason: format!("{} is not a positive duration", self.runtime_secs),
            });
        }
        check_volume("master_volume", self.master_volume)?;
        check_volume("sfx_volume", self.sfx_volume)
    }

    /// Read settings from `path`
    pub fn read(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from `path`, falling back to defaults on any error.
    /// A missing file is not worth a warning.
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Number of game ticks the run lasts
    pub fn runtime_ticks(&self) -> u64 {
        u64::from(crate::secs_to_ticks(self.runtime_secs))
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

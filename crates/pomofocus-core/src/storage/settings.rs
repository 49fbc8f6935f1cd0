//! TOML-based timer settings.
//!
//! Minute-denominated durations stored at `<data_dir>/config.toml`. Every
//! field has a documented default; a missing or malformed file and invalid
//! numeric input both fall back to those defaults rather than failing.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::SettingsError;
use crate::timer::{
    TimerConfig, DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_LONG_BREAK_MIN, DEFAULT_SHORT_BREAK_MIN,
    DEFAULT_WORK_MIN,
};

/// User-facing timer settings.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u32,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: u32,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
}

// Default functions
fn default_work_minutes() -> u32 {
    DEFAULT_WORK_MIN
}
fn default_break_minutes() -> u32 {
    DEFAULT_SHORT_BREAK_MIN
}
fn default_long_break_minutes() -> u32 {
    DEFAULT_LONG_BREAK_MIN
}
fn default_long_break_interval() -> u32 {
    DEFAULT_LONG_BREAK_INTERVAL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Settings {
    fn path() -> Result<PathBuf, SettingsError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, or defaults when the file is missing or malformed.
    /// A malformed file is logged and replaced on the next save.
    pub fn load() -> Self {
        let path = match Self::path() {
            Ok(path) => path,
            Err(err) => {
                tracing::warn!(error = %err, "settings path unavailable, using defaults");
                return Self::default();
            }
        };
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => settings,
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "malformed settings file, using defaults"
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| SettingsError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| SettingsError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a field from user input.
    ///
    /// Non-numeric or non-positive input falls back to the field's default
    /// instead of rejecting the save. Unknown field names are an error.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), SettingsError> {
        let parsed = value.parse::<u32>().unwrap_or(0);
        match field {
            "work" => self.work_minutes = or_default(parsed, default_work_minutes()),
            "break" => self.break_minutes = or_default(parsed, default_break_minutes()),
            "long-break" => {
                self.long_break_minutes = or_default(parsed, default_long_break_minutes())
            }
            "interval" => {
                self.long_break_interval = or_default(parsed, default_long_break_interval())
            }
            other => return Err(SettingsError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    /// Second-denominated configuration for the timer engine.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::from_minutes(
            self.work_minutes,
            self.break_minutes,
            self.long_break_minutes,
            self.long_break_interval,
        )
    }
}

fn or_default(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}

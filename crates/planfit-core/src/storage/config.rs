//! TOML-based application configuration.
//!
//! Stores CLI preferences:
//! - the default team to operate on when no id is passed
//! - forecast display defaults (window count, first window label)
//!
//! Configuration is stored at `~/.config/planfit/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Forecast display defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastConfig {
    /// Windows shown by `forecast` when `--windows` is not passed.
    #[serde(default = "default_window_count")]
    pub window_count: usize,
    /// Label of the first window, e.g. "Q3 2026". Empty means unlabeled.
    #[serde(default)]
    pub start_label: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_count: default_window_count(),
            start_label: String::new(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Team used when commands are invoked without `--team`.
    #[serde(default)]
    pub default_team_id: Option<String>,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/planfit"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when the file does
    /// not exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Save the configuration.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }
}

fn default_window_count() -> usize {
    1
}

//! User settings file.
//!
//! Settings are the persisted defaults; [`crate::config::Config::resolve`]
//! layers environment overrides on top of them. Every field has a default, so
//! a missing file or a partial file is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
    pub report: ReportSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Seed the store at startup.
    pub seed: bool,
    /// Fixture file to seed from instead of the bundled data.
    pub fixtures_path: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed: true,
            fixtures_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "casedesk=info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub default_period: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            default_period: "current-month".to_string(),
        }
    }
}

impl Settings {
    /// `~/.casedesk/settings.toml`, when a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".casedesk").join("settings.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::SettingsParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file; using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }
}

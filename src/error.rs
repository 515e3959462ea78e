//! Error types for casedesk.
//!
//! Domain operations on the store never fail: unknown ids are ignored and
//! dangling references render as placeholders. The errors here cover the
//! ambient surfaces: configuration and fixture loading.

use std::path::PathBuf;

/// Configuration resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read settings file {path:?}: {reason}")]
    SettingsRead { path: PathBuf, reason: String },

    #[error("Failed to parse settings file {path:?}: {reason}")]
    SettingsParse { path: PathBuf, reason: String },
}

/// Fixture loading errors.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid fixture data: {0}")]
    Parse(String),
}

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

pub type Result<T> = std::result::Result<T, Error>;

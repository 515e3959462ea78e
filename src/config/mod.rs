//! Resolved runtime configuration.
//!
//! Values come from [`Settings`] with environment overrides on top. A bad
//! value is reported under the variable name when it came from the
//! environment, and under the settings key (`report.default_period`) when it
//! came from the file.
//!
//! | Variable | Effect |
//! |---|---|
//! | `CASEDESK_SEED` | seed the store at startup |
//! | `CASEDESK_FIXTURES` | fixture file used for seeding |
//! | `CASEDESK_LOG` | log filter directive |
//! | `CASEDESK_LOG_JSON` | emit logs as JSON |
//! | `CASEDESK_REPORT_PERIOD` | default report period |

pub(crate) mod helpers;

use std::path::PathBuf;

use crate::config::helpers::{Sourced, optional_string_env, parse_bool_env, parse_string_env};
use crate::error::ConfigError;
use crate::query::ReportPeriod;
use crate::settings::Settings;

/// How the store is populated at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub seed: bool,
    /// Seed from this file instead of the bundled fixtures.
    pub fixtures_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub default_period: ReportPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub store: StoreConfig,
    pub logging: LoggingConfig,
    pub report: ReportConfig,
}

fn validate_fixtures_path(
    raw: Option<Sourced<String>>,
) -> Result<Option<PathBuf>, ConfigError> {
    let Some(Sourced { value, key }) = raw else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "fixture path must not be empty".to_string(),
        });
    }
    if !trimmed.ends_with(".toml") {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("fixture file must be TOML, got '{trimmed}'"),
        });
    }
    Ok(Some(PathBuf::from(trimmed)))
}

fn parse_report_period(raw: &Sourced<String>) -> Result<ReportPeriod, ConfigError> {
    let label = raw.value.trim();
    ReportPeriod::from_label(label).ok_or_else(|| ConfigError::InvalidValue {
        key: raw.key.to_string(),
        message: format!(
            "unsupported period '{label}' (expected current-month, last-month or last-3-months)"
        ),
    })
}

fn validate_log_filter(raw: Sourced<String>) -> Result<String, ConfigError> {
    let filter = raw.value.trim();
    if filter.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: raw.key.to_string(),
            message: "log filter must not be empty".to_string(),
        });
    }
    Ok(filter.to_string())
}

impl StoreConfig {
    /// Apply command-line choices. An explicit fixture file turns seeding on
    /// even when settings or the environment turned it off; `empty` wins over
    /// everything.
    pub fn with_overrides(mut self, fixtures: Option<PathBuf>, empty: bool) -> Self {
        if let Some(path) = fixtures {
            self.fixtures_path = Some(path);
            self.seed = true;
        }
        if empty {
            self.seed = false;
        }
        self
    }
}

impl Config {
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let fixtures_path = validate_fixtures_path(optional_string_env(
            "CASEDESK_FIXTURES",
            "store.fixtures_path",
            settings.store.fixtures_path.clone(),
        )?)?;

        Ok(Self {
            store: StoreConfig {
                seed: parse_bool_env("CASEDESK_SEED", settings.store.seed)?,
                fixtures_path,
            },
            logging: LoggingConfig {
                filter: validate_log_filter(parse_string_env(
                    "CASEDESK_LOG",
                    "logging.filter",
                    settings.logging.filter.clone(),
                )?)?,
                json: parse_bool_env("CASEDESK_LOG_JSON", settings.logging.json)?,
            },
            report: ReportConfig {
                default_period: parse_report_period(&parse_string_env(
                    "CASEDESK_REPORT_PERIOD",
                    "report.default_period",
                    settings.report.default_period.clone(),
                )?)?,
            },
        })
    }
}

use crate::error::ConfigError;

/// Read an environment variable, treating unset and blank as absent.
pub(crate) fn optional_env(key: &str) -> Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value is not valid UTF-8".to_string(),
        }),
    }
}

pub(crate) fn parse_bool_env(key: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(key)? {
        Some(raw) => parse_bool(key, &raw),
        None => Ok(default),
    }
}

/// A resolved value and the name of the place it came from: the environment
/// variable when set, otherwise the settings-file key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sourced<T> {
    pub value: T,
    pub key: &'static str,
}

pub(crate) fn parse_string_env(
    key: &'static str,
    setting_key: &'static str,
    default: String,
) -> Result<Sourced<String>, ConfigError> {
    Ok(match optional_env(key)? {
        Some(value) => Sourced { value, key },
        None => Sourced {
            value: default,
            key: setting_key,
        },
    })
}

pub(crate) fn optional_string_env(
    key: &'static str,
    setting_key: &'static str,
    default: Option<String>,
) -> Result<Option<Sourced<String>>, ConfigError> {
    Ok(match optional_env(key)? {
        Some(value) => Some(Sourced { value, key }),
        None => default.map(|value| Sourced {
            value,
            key: setting_key,
        }),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

//! Environment-driven server configuration.
//!
//! Values come from the process environment. `main` loads a `.env` file
//! first when one is present.

use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use jotpad_core::default_log_level;
use thiserror::Error;

pub const PORT_VAR: &str = "PORT";
pub const ALLOWED_ORIGIN_VAR: &str = "ALLOWED_ORIGIN";
pub const DB_PATH_VAR: &str = "JOTPAD_DB_PATH";
pub const LOG_LEVEL_VAR: &str = "JOTPAD_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "JOTPAD_LOG_DIR";

const DEFAULT_PORT: &str = "5000";
const DEFAULT_DB_PATH: &str = "jotpad.sqlite3";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {key} value `{value}`: {message}")]
    InvalidValue {
        key: &'static str,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub db_path: PathBuf,
    /// CORS origin; `None` allows any origin.
    pub allowed_origin: Option<String>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            port: try_parse(PORT_VAR, var(PORT_VAR).as_deref().unwrap_or(DEFAULT_PORT))?,
            db_path: PathBuf::from(var(DB_PATH_VAR).unwrap_or_else(|| DEFAULT_DB_PATH.to_string())),
            allowed_origin: var(ALLOWED_ORIGIN_VAR),
            log_level: var(LOG_LEVEL_VAR).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: var(LOG_DIR_VAR),
        })
    }
}

fn try_parse<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
        message: err.to_string(),
    })
}

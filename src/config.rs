//! Layered application configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `TASKDECK_`-prefixed environment variables, later sources winning.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Environment variable prefix, e.g. `TASKDECK_DATA_FILE`.
pub const ENV_PREFIX: &str = "TASKDECK";

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_NAME: &str = "taskdeck";

const DEFAULT_DATA_FILE: &str = "data/tasks.json";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Largest accepted undo history length.
pub const MAX_HISTORY_LIMIT: usize = 1000;
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialised.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value is present but unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Path of the JSON task file.
    pub data_file: String,
    /// Default tracing filter when no `-v` flag is given.
    pub log_level: String,
    /// Maximum number of undo actions kept.
    pub history_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: DEFAULT_DATA_FILE.to_owned(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl AppConfig {
    /// Loads configuration from defaults, the config file, and the process
    /// environment.
    ///
    /// With `path` set, that file must exist. Otherwise `taskdeck.toml` in
    /// the working directory is read when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source is unreadable or a value
    /// has the wrong type, and [`ConfigError::Invalid`] when validation
    /// fails.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`AppConfig::load`], reading environment variables from `env`
    /// instead of the process environment when it is given.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::load`].
    #[expect(
        clippy::implicit_hasher,
        reason = "the config crate only accepts its own map type"
    )]
    pub fn load_with_env(
        path: Option<&str>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let loaded: Self = config::Config::builder()
            .set_default("data_file", DEFAULT_DATA_FILE)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default(
                "history_limit",
                i64::try_from(DEFAULT_HISTORY_LIMIT).unwrap_or(i64::MAX),
            )?
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for an empty data file path, a
    /// history limit outside `1..=MAX_HISTORY_LIMIT`, or an unknown log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_file.trim().is_empty() {
            return Err(ConfigError::Invalid("data_file must not be empty".to_owned()));
        }
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            return Err(ConfigError::Invalid(format!(
                "history_limit must be between 1 and {MAX_HISTORY_LIMIT}"
            )));
        }
        let level = self.log_level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level '{}' (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

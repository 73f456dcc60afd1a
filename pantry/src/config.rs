//! Configuration loading and merging.
//!
//! Configuration is merged from three sources with increasing
//! precedence: built-in defaults, a YAML file in the data directory,
//! and environment variables.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::quantity::QuantityUnit;

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "PANTRY_DATA_DIR";

/// Environment variable overriding the maximum lock wait, in seconds.
pub const ENV_MAX_LOCK_WAIT: &str = "PANTRY_MAX_LOCK_WAIT";

/// Environment variable overriding the default unit of measure.
pub const ENV_DEFAULT_UNIT: &str = "PANTRY_DEFAULT_UNIT";

/// Complete configuration structure.
///
/// All fields are optional; absent fields fall back to built-in
/// defaults at the point of use.
///
/// # Examples
///
/// ```
/// use pantry::config::Config;
///
/// let config = Config {
///     maximum_lock_wait_seconds: Some(10),
///     ..Default::default()
/// };
/// assert_eq!(config.maximum_lock_wait_seconds, Some(10));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the database file.
    pub data_dir: Option<PathBuf>,

    /// Maximum time to wait for database lock acquisition (seconds).
    pub maximum_lock_wait_seconds: Option<u64>,

    /// Default unit of measure for new items.
    pub default_unit: Option<QuantityUnit>,
}

/// Builder that merges configuration sources.
///
/// # Examples
///
/// ```
/// use pantry::ConfigBuilder;
///
/// let config = ConfigBuilder::new().build().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    file: Option<PathBuf>,
    skip_environment: bool,
}

impl ConfigBuilder {
    /// Creates a new builder with no explicit file source.
    ///
    /// When no file is set, `config.yaml` inside the default data
    /// directory is used if it exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an explicit configuration file path.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Disables the environment-variable layer.
    ///
    /// Used by tests that must not observe the ambient environment.
    #[must_use]
    pub const fn without_environment(mut self) -> Self {
        self.skip_environment = true;
        self
    }

    /// Builds the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly provided file cannot be read,
    /// if YAML parsing fails, or if an environment override holds an
    /// unparseable value.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        // File layer. An explicit file must exist; the implicit
        // default location is allowed to be absent.
        if let Some(path) = self.file {
            config = merge(config, load_file(&path)?);
        } else if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                config = merge(config, load_file(&default_path)?);
            }
        }

        // Environment layer, highest precedence.
        if !self.skip_environment {
            config = merge(config, from_environment()?);
        }

        Ok(config)
    }
}

/// Returns the default config file location (`<data dir>/config.yaml`).
fn default_config_path() -> Option<PathBuf> {
    crate::database::default_data_dir().map(|dir| dir.join("config.yaml"))
}

fn load_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

fn from_environment() -> Result<Config> {
    let data_dir = env::var_os(ENV_DATA_DIR).map(PathBuf::from);

    let maximum_lock_wait_seconds = match env::var(ENV_MAX_LOCK_WAIT) {
        Ok(raw) => Some(raw.parse::<u64>().map_err(|e| Error::Validation {
            field: ENV_MAX_LOCK_WAIT.into(),
            message: format!("expected a number of seconds: {e}"),
        })?),
        Err(_) => None,
    };

    let default_unit = match env::var(ENV_DEFAULT_UNIT) {
        Ok(raw) => Some(raw.parse::<QuantityUnit>().map_err(|e| Error::Validation {
            field: ENV_DEFAULT_UNIT.into(),
            message: e,
        })?),
        Err(_) => None,
    };

    Ok(Config {
        data_dir,
        maximum_lock_wait_seconds,
        default_unit,
    })
}

/// Merges two configurations; fields set in `overlay` win.
fn merge(base: Config, overlay: Config) -> Config {
    Config {
        data_dir: overlay.data_dir.or(base.data_dir),
        maximum_lock_wait_seconds: overlay
            .maximum_lock_wait_seconds
            .or(base.maximum_lock_wait_seconds),
        default_unit: overlay.default_unit.or(base.default_unit),
    }
}

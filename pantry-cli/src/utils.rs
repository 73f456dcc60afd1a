//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI
//! commands: identity resolution, configuration loading, database
//! management, and output formatting.

use std::path::PathBuf;

use pantry::{Config, ConfigBuilder, Database, DatabaseConfig, UserRef};

use crate::error::CliError;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Identifier of the acting user.
    pub user: Option<String>,

    /// Display name of the acting user.
    pub user_name: Option<String>,

    /// Override the default busy timeout (in seconds).
    pub busy_timeout: Option<u32>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration file
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(_global: &GlobalOptions) -> Result<Config, CliError> {
    ConfigBuilder::new()
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Resolve the database path from global options and configuration.
fn resolve_database_path(global: &GlobalOptions, config: &Config) -> Result<PathBuf, CliError> {
    let data_dir = global.data_dir.as_deref().or(config.data_dir.as_deref());
    pantry::database::resolve_database_path(data_dir)
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Open database with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` if the database doesn't exist and
/// auto-init is disabled.
pub fn open_database(global: &GlobalOptions, config: &Config) -> Result<Database, CliError> {
    let db_path = resolve_database_path(global, config)?;

    if !db_path.exists() && global.disable_autoinit {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    // Set busy timeout if specified
    if let Some(timeout_seconds) = global.busy_timeout {
        db_config =
            db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds.into()));
    } else if let Some(timeout_seconds) = config.maximum_lock_wait_seconds {
        db_config = db_config.with_busy_timeout(std::time::Duration::from_secs(timeout_seconds));
    }

    Database::open(db_config).map_err(CliError::from)
}

/// Resolve the acting user from global options.
///
/// The identifier comes from `--user` (or `PANTRY_USER`); the display
/// name falls back to the identifier when not given.
pub fn require_user(global: &GlobalOptions) -> Result<UserRef, CliError> {
    let id = global.user.clone().ok_or_else(|| {
        CliError::InvalidArguments("no user set (use --user or PANTRY_USER)".to_string())
    })?;
    let name = global.user_name.clone().unwrap_or_else(|| id.clone());
    UserRef::new(id, name).map_err(|e| CliError::InvalidArguments(e.to_string()))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: std::time::SystemTime) -> String {
    use chrono::{DateTime, Utc};
    let dt: DateTime<Utc> = ts.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

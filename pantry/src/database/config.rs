//! Database configuration and connection parameters.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use pantry::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/pantry.db")
///     .with_busy_timeout(Duration::from_secs(10));
/// assert_eq!(config.busy_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// Busy timeout for database lock contention.
    ///
    /// This window is the coordinator's transparent retry budget:
    /// conflicting transactions wait up to this long before failing
    /// with a transaction conflict.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Sets the busy timeout duration.
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically
    /// disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::database::DatabaseConfig;
    ///
    /// let config = DatabaseConfig::new("/tmp/pantry.db").read_only();
    /// assert!(config.read_only);
    /// assert!(!config.auto_create);
    /// ```
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory (`~/.pantry`).
///
/// Returns `None` when the home directory cannot be determined.
#[must_use]
pub fn default_data_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(".pantry"))
}

/// Resolves the database file path from an optional data directory
/// override.
///
/// Priority: explicit override, then `~/.pantry/pantry.db`.
///
/// # Errors
///
/// Returns a validation error when no override is given and the home
/// directory cannot be determined.
pub fn resolve_database_path(data_dir: Option<&Path>) -> crate::error::Result<PathBuf> {
    if let Some(dir) = data_dir {
        return Ok(dir.join("pantry.db"));
    }

    default_data_dir()
        .map(|dir| dir.join("pantry.db"))
        .ok_or_else(|| crate::error::Error::Validation {
            field: "data_dir".into(),
            message: "could not determine home directory".into(),
        })
}

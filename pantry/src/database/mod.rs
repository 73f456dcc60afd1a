//! Database layer for persistent storage of items and reservations.
//!
//! This module provides a SQLite-based storage layer: connection
//! management, schema versioning, item and reservation CRUD, and the
//! transaction-scoped inventory ledger used by the reservation
//! protocol.
//!
//! # Examples
//!
//! ```no_run
//! use pantry::database::{Database, DatabaseConfig};
//! use pantry::{Item, Quantity, QuantityUnit, UserRef};
//!
//! let config = DatabaseConfig::new("/tmp/pantry.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let owner = UserRef::new("u_1", "Dana").unwrap();
//! let item = Item::builder(owner, "Apples", Quantity::try_from(10).unwrap(), QuantityUnit::Pieces)
//!     .build()
//!     .unwrap();
//! db.create_item(&item).unwrap();
//!
//! for item in db.list_available_items().unwrap() {
//!     println!("{} x{}", item.name(), item.quantity());
//! }
//! ```

use std::time::{Duration, SystemTime};

mod config;
mod connection;
mod items;
pub mod ledger;
pub mod migrations;
mod reservations;
mod schema;
#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

// Transaction-scoped record access for the reservation protocol.
pub(crate) use items::select_item;
pub(crate) use reservations::{delete_reservation, select_reservation, upsert_reservation};

/// Converts a `SystemTime` to Unix epoch seconds for database storage.
///
/// # Errors
///
/// Returns an error if the time is before the Unix epoch.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn systemtime_to_unix_secs(time: SystemTime) -> crate::error::Result<i64> {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| crate::error::Error::Validation {
            field: "timestamp".into(),
            message: format!("invalid timestamp: {e}"),
        })
        .map(|d| d.as_secs() as i64)
}

/// Converts Unix epoch seconds from the database to a `SystemTime`.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn unix_secs_to_systemtime(secs: i64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs as u64)
}

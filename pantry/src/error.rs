//! Error types for the pantry library.
//!
//! This module provides the error hierarchy for all operations in the
//! pantry library, using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Result type alias for operations that may fail with a pantry error.
///
/// # Examples
///
/// ```
/// use pantry::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pantry library.
///
/// This enum encompasses all possible error conditions that can occur
/// during item and reservation operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced item does not exist (or no longer exists).
    #[error("item not found: {item_id}")]
    ItemNotFound {
        /// The identifier of the missing item.
        item_id: String,
    },

    /// The referenced reservation does not exist.
    #[error("reservation not found for item {item_id} and user {user_id}")]
    ReservationNotFound {
        /// The item the reservation would have referenced.
        item_id: String,
        /// The reserving user.
        user_id: String,
    },

    /// The requested amount exceeds the item's remaining quantity.
    #[error(
        "insufficient quantity for item {item_id}: requested {requested}, available {available}"
    )]
    InsufficientQuantity {
        /// The item that could not satisfy the request.
        item_id: String,
        /// The amount that was requested.
        requested: u32,
        /// The amount that was actually available.
        available: u32,
    },

    /// A user attempted to reserve an item they own.
    #[error("cannot reserve own item {item_id}")]
    OwnItemReservation {
        /// The item owned by the requesting user.
        item_id: String,
    },

    /// The storage layer could not serialize a conflicting transaction
    /// within the configured busy timeout.
    ///
    /// This is a transient infrastructure failure: no writes took
    /// effect and the caller may retry the whole operation.
    #[error("transaction conflict: could not acquire database lock within the busy timeout")]
    TransactionConflict,

    /// An invalid quantity was provided.
    #[error("invalid quantity {value}: {reason}")]
    InvalidQuantity {
        /// The invalid quantity value.
        value: u32,
        /// The reason the quantity is invalid.
        reason: String,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for Error {
    /// Busy and locked failures mean the coordinator exhausted its
    /// busy-timeout window without serializing the transaction; they
    /// surface as [`Error::TransactionConflict`] rather than a raw
    /// database error.
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = err {
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ) {
                return Self::TransactionConflict;
            }
        }
        Self::Database(err)
    }
}

impl From<crate::quantity::InvalidQuantityError> for Error {
    fn from(err: crate::quantity::InvalidQuantityError) -> Self {
        Self::InvalidQuantity {
            value: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::item::ValidationError> for Error {
    fn from(err: crate::item::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if this error indicates a missing item or reservation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::Error;
    ///
    /// let err = Error::ItemNotFound { item_id: "it_1".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ItemNotFound { .. } | Self::ReservationNotFound { .. }
        )
    }

    /// Check if this error is a transient conflict that is safe to
    /// retry after inspecting the resulting state.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TransactionConflict)
    }
}

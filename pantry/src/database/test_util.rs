//! Shared test utilities for database and protocol unit tests.
//!
//! This module provides helper functions used across multiple test modules.

use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::item::Item;
use crate::quantity::{Quantity, QuantityUnit};
use crate::reservation::{Reservation, ReservationKey};
use crate::user::UserRef;

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let db = Database::open(DatabaseConfig::new(path)).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Creates and stores an item with the given quantity, owned by `u_owner`.
///
/// # Panics
///
/// Panics if the item cannot be built or stored.
#[must_use]
pub fn create_test_item(db: &Database, quantity: u32) -> Item {
    let owner = UserRef::new("u_owner", "Dana").unwrap();
    let item = Item::builder(owner, "Apples", qty(quantity), QuantityUnit::Pieces)
        .build()
        .unwrap();
    db.create_item(&item).unwrap();
    item
}

/// Creates a reservation record for the given pair, not yet stored.
///
/// # Panics
///
/// Panics if the key or reservation cannot be built.
#[must_use]
pub fn create_test_reservation(item_id: &str, user_id: &str, quantity: u32) -> Reservation {
    let key = ReservationKey::new(item_id, user_id).unwrap();
    Reservation::builder(key, qty(quantity))
        .user_name("Alex")
        .item_name("Apples")
        .unit(QuantityUnit::Pieces)
        .build()
        .unwrap()
}

/// Creates a user reference with a fixed display name.
///
/// # Panics
///
/// Panics if the id is empty.
#[must_use]
pub fn test_user(id: &str) -> UserRef {
    UserRef::new(id, "Alex").unwrap()
}

/// Shorthand for a validated quantity.
///
/// # Panics
///
/// Panics on zero.
#[must_use]
pub fn qty(n: u32) -> Quantity {
    Quantity::try_from(n).unwrap()
}

//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for
//! testing the pantry library.

use std::time::SystemTime;

use pantry::{Database, DatabaseConfig, Item, ItemStatus, Quantity, QuantityUnit, UserRef};
use tempfile::TempDir;

/// A test database together with the directory that holds it.
///
/// Keeping the `TempDir` alive ties the database file's lifetime to
/// the fixture, so tests can reopen the same path in other threads.
pub struct TestDatabase {
    pub db: Database,
    pub dir: TempDir,
}

/// Creates an initialized database in a fresh temporary directory.
pub fn create_test_database() -> TestDatabase {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("pantry.db");
    let db = Database::open(DatabaseConfig::new(path)).expect("should open database");
    TestDatabase { db, dir }
}

/// Opens a second handle to the fixture's database file.
///
/// Used by concurrency tests that need independent connections to the
/// same store.
#[allow(dead_code)]
pub fn reopen(dir: &TempDir) -> Database {
    let path = dir.path().join("pantry.db");
    Database::open(DatabaseConfig::new(path)).expect("should reopen database")
}

/// Builder for creating test items with sensible defaults.
///
/// Defaults: owner "u_owner" (Dana), name "Apples", quantity 10,
/// unit pieces, status available.
#[allow(dead_code)]
pub struct ItemFixture {
    owner_id: String,
    owner_name: String,
    name: String,
    quantity: u32,
    unit: QuantityUnit,
    status: ItemStatus,
    created_at: Option<SystemTime>,
}

#[allow(dead_code)]
impl ItemFixture {
    pub fn new() -> Self {
        Self {
            owner_id: "u_owner".to_string(),
            owner_name: "Dana".to_string(),
            name: "Apples".to_string(),
            quantity: 10,
            unit: QuantityUnit::Pieces,
            status: ItemStatus::Available,
            created_at: None,
        }
    }

    pub fn with_owner(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.owner_id = id.into();
        self.owner_name = name.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_unit(mut self, unit: QuantityUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the item.
    ///
    /// # Panics
    ///
    /// Panics on invalid fixture values. Failing fast is acceptable in
    /// test code.
    pub fn build(self) -> Item {
        let owner = UserRef::new(self.owner_id, self.owner_name)
            .expect("fixture should have valid owner");
        let quantity =
            Quantity::try_from(self.quantity).expect("fixture should have positive quantity");

        let mut builder = Item::builder(owner, self.name, quantity, self.unit).status(self.status);
        if let Some(created_at) = self.created_at {
            builder = builder.created_at(created_at);
        }
        builder.build().expect("fixture should build valid item")
    }

    /// Builds the item and inserts it into the database.
    pub fn create(self, db: &Database) -> Item {
        let item = self.build();
        db.create_item(&item).expect("should create fixture item");
        item
    }
}

impl Default for ItemFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a user reference for tests.
#[allow(dead_code)]
pub fn user(id: &str, name: &str) -> UserRef {
    UserRef::new(id, name).expect("fixture should have valid user")
}

/// Creates a positive quantity for tests.
#[allow(dead_code)]
pub fn qty(n: u32) -> Quantity {
    Quantity::try_from(n).expect("fixture quantity should be positive")
}

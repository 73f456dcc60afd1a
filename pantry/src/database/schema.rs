//! Database schema definitions and SQL constants.
//!
//! This module contains all SQL table definitions, indices, and
//! constants related to the schema for the pantry reservation system.

/// Current schema version for the database.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database
/// configuration and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the items table.
///
/// The `quantity` column is the authoritative remaining quantity; the
/// CHECK constraint is the last line of defense against it ever going
/// negative.
pub const CREATE_ITEMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS items (
        id TEXT PRIMARY KEY NOT NULL,
        owner_id TEXT NOT NULL,
        owner_name TEXT NOT NULL,
        name TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity >= 0),
        unit TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// The primary key `(item_id, user_id)` enforces at most one active
/// reservation per user per item; repeated requests accrue into the
/// existing row. `item_name` and `unit` are snapshots taken at
/// reservation time so the record stays presentable after the item is
/// deleted.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        item_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        user_name TEXT NOT NULL,
        item_name TEXT NOT NULL,
        quantity INTEGER NOT NULL CHECK (quantity > 0),
        unit TEXT NOT NULL,
        created_at INTEGER NOT NULL,
        updated_at INTEGER NOT NULL,
        PRIMARY KEY (item_id, user_id)
    )";

/// SQL statement to create an index on the items owner column.
///
/// This index speeds up the "my pantry" listing.
pub const CREATE_ITEMS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_items_owner ON items(owner_id)";

/// SQL statement to create an index on the items status column.
///
/// This index speeds up availability filtering.
pub const CREATE_ITEMS_STATUS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_items_status ON items(status)";

/// SQL statement to create an index on the reservations user column.
///
/// This index speeds up the "my reservations" listing.
pub const CREATE_RESERVATIONS_USER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_user ON reservations(user_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the
/// metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

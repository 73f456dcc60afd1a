//! Item CRUD operations and read-side queries.

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::item::{Item, ItemStatus};
use crate::quantity::QuantityUnit;
use crate::user::UserRef;

use super::connection::Database;
use super::{systemtime_to_unix_secs, unix_secs_to_systemtime};

const INSERT_ITEM: &str = r"
    INSERT INTO items (id, owner_id, owner_name, name, quantity, unit, status, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_ITEM: &str = r"
    SELECT id, owner_id, owner_name, name, quantity, unit, status, created_at
    FROM items
    WHERE id = ?
";

const UPDATE_ITEM: &str = r"
    UPDATE items
    SET name = ?, quantity = ?, unit = ?, status = ?
    WHERE id = ?
";

const DELETE_ITEM: &str = r"
    DELETE FROM items
    WHERE id = ?
";

const LIST_AVAILABLE_ITEMS: &str = r"
    SELECT id, owner_id, owner_name, name, quantity, unit, status, created_at
    FROM items
    WHERE quantity > 0 AND status = 'available'
    ORDER BY created_at DESC, id
";

const LIST_ITEMS_BY_OWNER: &str = r"
    SELECT id, owner_id, owner_name, name, quantity, unit, status, created_at
    FROM items
    WHERE owner_id = ?
    ORDER BY created_at DESC, id
";

/// Deserializes an item from a database row.
///
/// Expects row fields in this order: id, `owner_id`, `owner_name`,
/// name, quantity, unit, status, `created_at`.
fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    let id: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let owner_name: String = row.get(2)?;
    let name: String = row.get(3)?;
    let quantity: u32 = row.get(4)?;
    let unit: String = row.get(5)?;
    let status: String = row.get(6)?;
    let created_secs: i64 = row.get(7)?;

    let owner = UserRef::new(owner_id, owner_name)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let unit: QuantityUnit = unit
        .parse()
        .map_err(|e: String| rusqlite::Error::InvalidColumnType(5, e, rusqlite::types::Type::Text))?;

    let status: ItemStatus = status
        .parse()
        .map_err(|e: String| rusqlite::Error::InvalidColumnType(6, e, rusqlite::types::Type::Text))?;

    // Fields were validated on the way in; a fully reserved row keeps
    // a raw quantity of zero, which the builder cannot express.
    Ok(Item::from_storage(
        id,
        owner,
        name,
        quantity,
        unit,
        status,
        unix_secs_to_systemtime(created_secs),
    ))
}

/// Point read of an item by id, usable both on a plain connection and
/// inside a transaction.
pub(crate) fn select_item(conn: &Connection, item_id: &str) -> Result<Option<Item>> {
    match conn.query_row(SELECT_ITEM, [item_id], row_to_item) {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Creates a new item.
    ///
    /// # Errors
    ///
    /// Returns an error if an item with the same id already exists or
    /// the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use pantry::database::{Database, DatabaseConfig};
    /// use pantry::{Item, Quantity, QuantityUnit, UserRef};
    ///
    /// let db = Database::open(DatabaseConfig::new("/tmp/pantry.db")).unwrap();
    /// let owner = UserRef::new("u_1", "Dana").unwrap();
    /// let item = Item::builder(owner, "Apples", Quantity::try_from(10).unwrap(), QuantityUnit::Pieces)
    ///     .build()
    ///     .unwrap();
    /// db.create_item(&item).unwrap();
    /// ```
    pub fn create_item(&self, item: &Item) -> Result<()> {
        self.conn.execute(
            INSERT_ITEM,
            params![
                item.id(),
                item.owner().id(),
                item.owner().display_name(),
                item.name(),
                item.quantity(),
                item.unit().as_str(),
                item.status().as_str(),
                systemtime_to_unix_secs(item.created_at())?,
            ],
        )?;
        Ok(())
    }

    /// Reads an item by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_item(&self, item_id: &str) -> Result<Option<Item>> {
        select_item(&self.conn, item_id)
    }

    /// Updates an item's mutable fields (name, quantity, unit,
    /// status).
    ///
    /// This is the direct owner-edit path; it does not consult
    /// reservations. Returns `false` if the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_item(&self, item: &Item) -> Result<bool> {
        let updated = self.conn.execute(
            UPDATE_ITEM,
            params![
                item.name(),
                item.quantity(),
                item.unit().as_str(),
                item.status().as_str(),
                item.id(),
            ],
        )?;
        Ok(updated > 0)
    }

    /// Deletes an item by id.
    ///
    /// Deletion is allowed while reservations still reference the
    /// item; such reservations become orphaned and are resolved on
    /// cancellation. Returns `false` if the item did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_item(&self, item_id: &str) -> Result<bool> {
        let deleted = self.conn.execute(DELETE_ITEM, [item_id])?;
        Ok(deleted > 0)
    }

    /// Lists items that can currently be reserved, newest first.
    ///
    /// The filter `quantity > 0 AND status = 'available'` is the
    /// read-side rendering of availability; fully reserved items are
    /// excluded without being deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_available_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(LIST_AVAILABLE_ITEMS)?;
        let items = stmt
            .query_map([], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }

    /// Lists all items owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_items_by_owner(&self, owner_id: &str) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(LIST_ITEMS_BY_OWNER)?;
        let items = stmt
            .query_map([owner_id], row_to_item)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::create_test_database;
    use crate::quantity::Quantity;
    use std::time::{Duration, SystemTime};

    fn test_item(name: &str, quantity: u32) -> Item {
        let owner = UserRef::new("u_owner", "Dana").unwrap();
        Item::builder(
            owner,
            name,
            Quantity::try_from(quantity).unwrap(),
            QuantityUnit::Pieces,
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_create_and_get_item() {
        let db = create_test_database();
        let item = test_item("Apples", 10);

        db.create_item(&item).unwrap();
        let fetched = db.get_item(item.id()).unwrap().unwrap();

        assert_eq!(fetched.id(), item.id());
        assert_eq!(fetched.name(), "Apples");
        assert_eq!(fetched.quantity(), 10);
        assert_eq!(fetched.owner().display_name(), "Dana");
        assert_eq!(fetched.status(), ItemStatus::Available);
    }

    #[test]
    fn test_get_missing_item() {
        let db = create_test_database();
        assert!(db.get_item("no-such-item").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_id_fails() {
        let db = create_test_database();
        let item = test_item("Apples", 10);
        db.create_item(&item).unwrap();
        assert!(db.create_item(&item).is_err());
    }

    #[test]
    fn test_update_item() {
        let db = create_test_database();
        let item = test_item("Apples", 10);
        db.create_item(&item).unwrap();

        let edited = item.clone().with_quantity(5);
        assert!(db.update_item(&edited).unwrap());

        let fetched = db.get_item(item.id()).unwrap().unwrap();
        assert_eq!(fetched.quantity(), 5);
    }

    #[test]
    fn test_update_missing_item() {
        let db = create_test_database();
        let item = test_item("Apples", 10);
        assert!(!db.update_item(&item).unwrap());
    }

    #[test]
    fn test_delete_item() {
        let db = create_test_database();
        let item = test_item("Apples", 10);
        db.create_item(&item).unwrap();

        assert!(db.delete_item(item.id()).unwrap());
        assert!(db.get_item(item.id()).unwrap().is_none());
        assert!(!db.delete_item(item.id()).unwrap());
    }

    #[test]
    fn test_list_available_filters_reserved_out() {
        let db = create_test_database();

        let available = test_item("Apples", 10);
        db.create_item(&available).unwrap();

        let taken = test_item("Bread", 2);
        db.create_item(&taken).unwrap();
        db.update_item(&taken.clone().with_status(ItemStatus::Taken))
            .unwrap();

        let listed = db.list_available_items().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), available.id());
    }

    #[test]
    fn test_list_available_orders_newest_first() {
        let db = create_test_database();
        let now = SystemTime::now();

        let owner = UserRef::new("u_owner", "Dana").unwrap();
        let older = Item::builder(
            owner.clone(),
            "Older",
            Quantity::try_from(1).unwrap(),
            QuantityUnit::Pieces,
        )
        .created_at(now - Duration::from_secs(60))
        .build()
        .unwrap();
        let newer = Item::builder(
            owner,
            "Newer",
            Quantity::try_from(1).unwrap(),
            QuantityUnit::Pieces,
        )
        .created_at(now)
        .build()
        .unwrap();

        db.create_item(&older).unwrap();
        db.create_item(&newer).unwrap();

        let listed = db.list_available_items().unwrap();
        assert_eq!(listed[0].name(), "Newer");
        assert_eq!(listed[1].name(), "Older");
    }

    #[test]
    fn test_list_items_by_owner() {
        let db = create_test_database();

        let mine = test_item("Apples", 10);
        db.create_item(&mine).unwrap();

        let other_owner = UserRef::new("u_other", "Sam").unwrap();
        let theirs = Item::builder(
            other_owner,
            "Bread",
            Quantity::try_from(2).unwrap(),
            QuantityUnit::Packs,
        )
        .build()
        .unwrap();
        db.create_item(&theirs).unwrap();

        let listed = db.list_items_by_owner("u_owner").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id(), mine.id());
    }

    #[test]
    fn test_zero_quantity_round_trip() {
        let db = create_test_database();
        let item = test_item("Apples", 10);
        db.create_item(&item).unwrap();

        db.update_item(&item.clone().with_quantity(0)).unwrap();
        let fetched = db.get_item(item.id()).unwrap().unwrap();
        assert_eq!(fetched.quantity(), 0);
        assert_eq!(fetched.name(), "Apples");
        assert_eq!(fetched.unit(), QuantityUnit::Pieces);
        assert_eq!(fetched.status(), ItemStatus::Available);
        assert_eq!(fetched.owner().id(), "u_owner");
    }
}

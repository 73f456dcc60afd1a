//! Reservation record storage.
//!
//! The write-side functions take a plain [`Connection`] so they can run
//! on a transaction handle inside the reservation protocol; the
//! read-side queries are exposed as [`Database`] methods.

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::quantity::QuantityUnit;
use crate::reservation::{Reservation, ReservationKey};

use super::connection::Database;
use super::{systemtime_to_unix_secs, unix_secs_to_systemtime};

const UPSERT_RESERVATION: &str = r"
    INSERT INTO reservations (item_id, user_id, user_name, item_name, quantity, unit, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
    ON CONFLICT (item_id, user_id) DO UPDATE SET
        user_name = excluded.user_name,
        item_name = excluded.item_name,
        quantity = excluded.quantity,
        unit = excluded.unit,
        updated_at = excluded.updated_at
";

const SELECT_RESERVATION: &str = r"
    SELECT item_id, user_id, user_name, item_name, quantity, unit, created_at, updated_at
    FROM reservations
    WHERE item_id = ? AND user_id = ?
";

const DELETE_RESERVATION: &str = r"
    DELETE FROM reservations
    WHERE item_id = ? AND user_id = ?
";

const LIST_RESERVATIONS_FOR_USER: &str = r"
    SELECT item_id, user_id, user_name, item_name, quantity, unit, created_at, updated_at
    FROM reservations
    WHERE user_id = ?
    ORDER BY created_at DESC, item_id
";

const LIST_RESERVATIONS_FOR_ITEM: &str = r"
    SELECT item_id, user_id, user_name, item_name, quantity, unit, created_at, updated_at
    FROM reservations
    WHERE item_id = ?
    ORDER BY created_at DESC, user_id
";

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let item_id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let user_name: String = row.get(2)?;
    let item_name: String = row.get(3)?;
    let quantity: u32 = row.get(4)?;
    let unit: String = row.get(5)?;
    let created_secs: i64 = row.get(6)?;
    let updated_secs: i64 = row.get(7)?;

    let key = ReservationKey::new(item_id, user_id)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let quantity = crate::quantity::Quantity::try_from(quantity)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    let unit: QuantityUnit = unit
        .parse()
        .map_err(|e: String| rusqlite::Error::InvalidColumnType(5, e, rusqlite::types::Type::Text))?;

    Reservation::builder(key, quantity)
        .user_name(user_name)
        .item_name(item_name)
        .unit(unit)
        .created_at(unix_secs_to_systemtime(created_secs))
        .updated_at(unix_secs_to_systemtime(updated_secs))
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Point read of a reservation by its deterministic key.
pub(crate) fn select_reservation(
    conn: &Connection,
    key: &ReservationKey,
) -> Result<Option<Reservation>> {
    match conn.query_row(
        SELECT_RESERVATION,
        [&key.item_id, &key.user_id],
        row_to_reservation,
    ) {
        Ok(reservation) => Ok(Some(reservation)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Inserts a reservation, or overwrites the record at the same key.
///
/// The upsert is what makes repeated reserve requests accrue: the
/// protocol reads the existing record, bumps its quantity, and writes
/// it back through here.
pub(crate) fn upsert_reservation(conn: &Connection, reservation: &Reservation) -> Result<()> {
    conn.execute(
        UPSERT_RESERVATION,
        params![
            reservation.item_id(),
            reservation.user_id(),
            reservation.user_name(),
            reservation.item_name(),
            reservation.quantity(),
            reservation.unit().as_str(),
            systemtime_to_unix_secs(reservation.created_at())?,
            systemtime_to_unix_secs(reservation.updated_at())?,
        ],
    )?;
    Ok(())
}

/// Removes a reservation. Returns `false` if no record existed.
pub(crate) fn delete_reservation(conn: &Connection, key: &ReservationKey) -> Result<bool> {
    let deleted = conn.execute(DELETE_RESERVATION, [&key.item_id, &key.user_id])?;
    Ok(deleted > 0)
}

impl Database {
    /// Reads a reservation by its `(item, user)` key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(&self, key: &ReservationKey) -> Result<Option<Reservation>> {
        select_reservation(&self.conn, key)
    }

    /// Lists all reservations held by `user_id`, newest first.
    ///
    /// Orphaned reservations (whose item has been deleted) are
    /// included; their snapshotted item name keeps them presentable.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_user(&self, user_id: &str) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(LIST_RESERVATIONS_FOR_USER)?;
        let reservations = stmt
            .query_map([user_id], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }

    /// Lists all reservations against `item_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reservations_for_item(&self, item_id: &str) -> Result<Vec<Reservation>> {
        let mut stmt = self.conn.prepare(LIST_RESERVATIONS_FOR_ITEM)?;
        let reservations = stmt
            .query_map([item_id], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, create_test_reservation};
    use crate::quantity::Quantity;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_upsert_and_select() {
        let db = create_test_database();
        let reservation = create_test_reservation("it_1", "u_2", 4);

        upsert_reservation(db.connection(), &reservation).unwrap();
        let fetched = db.get_reservation(reservation.key()).unwrap().unwrap();

        assert_eq!(fetched.quantity(), 4);
        assert_eq!(fetched.user_name(), "Alex");
        assert_eq!(fetched.item_name(), "Apples");
    }

    #[test]
    fn test_select_missing() {
        let db = create_test_database();
        let key = ReservationKey::new("it_1", "u_2").unwrap();
        assert!(db.get_reservation(&key).unwrap().is_none());
    }

    #[test]
    fn test_upsert_accrues_at_same_key() {
        let db = create_test_database();
        let reservation = create_test_reservation("it_1", "u_2", 4);
        upsert_reservation(db.connection(), &reservation).unwrap();

        let accrued = reservation.accrued(Quantity::try_from(3).unwrap());
        upsert_reservation(db.connection(), &accrued).unwrap();

        let fetched = db.get_reservation(reservation.key()).unwrap().unwrap();
        assert_eq!(fetched.quantity(), 7);

        // Still a single record for the key.
        let all = db.list_reservations_for_item("it_1").unwrap();
        assert_eq!(all.len(), 1);
    }

    #[test]
    fn test_upsert_preserves_created_at() {
        let db = create_test_database();
        let created = SystemTime::now() - Duration::from_secs(3600);
        let key = ReservationKey::new("it_1", "u_2").unwrap();
        let reservation = Reservation::builder(key, Quantity::try_from(4).unwrap())
            .user_name("Alex")
            .item_name("Apples")
            .created_at(created)
            .updated_at(created)
            .build()
            .unwrap();
        upsert_reservation(db.connection(), &reservation).unwrap();

        let accrued = reservation.accrued(Quantity::try_from(1).unwrap());
        upsert_reservation(db.connection(), &accrued).unwrap();

        let fetched = db.get_reservation(reservation.key()).unwrap().unwrap();
        assert!(fetched.updated_at() > fetched.created_at());
    }

    #[test]
    fn test_delete_reservation() {
        let db = create_test_database();
        let reservation = create_test_reservation("it_1", "u_2", 4);
        upsert_reservation(db.connection(), &reservation).unwrap();

        assert!(delete_reservation(db.connection(), reservation.key()).unwrap());
        assert!(db.get_reservation(reservation.key()).unwrap().is_none());
        assert!(!delete_reservation(db.connection(), reservation.key()).unwrap());
    }

    #[test]
    fn test_list_for_user_and_item() {
        let db = create_test_database();
        upsert_reservation(db.connection(), &create_test_reservation("it_1", "u_a", 1)).unwrap();
        upsert_reservation(db.connection(), &create_test_reservation("it_1", "u_b", 2)).unwrap();
        upsert_reservation(db.connection(), &create_test_reservation("it_2", "u_a", 3)).unwrap();

        let for_user = db.list_reservations_for_user("u_a").unwrap();
        assert_eq!(for_user.len(), 2);
        assert!(for_user.iter().all(|r| r.user_id() == "u_a"));

        let for_item = db.list_reservations_for_item("it_1").unwrap();
        assert_eq!(for_item.len(), 2);
        assert!(for_item.iter().all(|r| r.item_id() == "it_1"));
    }

    #[test]
    fn test_reservations_survive_in_transaction_scope() {
        let mut db = create_test_database();
        let reservation = create_test_reservation("it_1", "u_2", 4);

        let tx = db.immediate_transaction().unwrap();
        upsert_reservation(&tx, &reservation).unwrap();
        assert!(select_reservation(&tx, reservation.key()).unwrap().is_some());
        tx.commit().unwrap();

        assert!(db.get_reservation(reservation.key()).unwrap().is_some());
    }
}

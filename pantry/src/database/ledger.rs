//! The inventory ledger: atomic debit and credit of item quantity.
//!
//! Both functions take a plain [`Connection`] but are only meaningful
//! inside an immediate transaction, where the read-check-write sequence
//! is protected from concurrent writers. The reservation protocol in
//! [`crate::operations`] is the intended caller.

use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::item::ItemStatus;
use crate::quantity::Quantity;

const SELECT_QUANTITY_FOR_UPDATE: &str = r"
    SELECT quantity, status
    FROM items
    WHERE id = ?
";

const UPDATE_QUANTITY: &str = r"
    UPDATE items
    SET quantity = ?, status = ?
    WHERE id = ?
";

fn read_quantity(conn: &Connection, item_id: &str) -> Result<Option<(u32, ItemStatus)>> {
    let row = conn.query_row(SELECT_QUANTITY_FOR_UPDATE, [item_id], |row| {
        let quantity: u32 = row.get(0)?;
        let status: String = row.get(1)?;
        Ok((quantity, status))
    });
    match row {
        Ok((quantity, status)) => {
            let status: ItemStatus = status.parse().map_err(|e: String| {
                rusqlite::Error::InvalidColumnType(1, e, rusqlite::types::Type::Text)
            })?;
            Ok(Some((quantity, status)))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_quantity(
    conn: &Connection,
    item_id: &str,
    quantity: u32,
    status: ItemStatus,
) -> Result<()> {
    conn.execute(UPDATE_QUANTITY, params![quantity, status.as_str(), item_id])?;
    Ok(())
}

/// Subtracts `amount` from an item's remaining quantity.
///
/// Returns the remaining quantity after the debit. Debiting to zero
/// flips the item's status to `reserved`; the item row is never
/// deleted by the ledger.
///
/// # Errors
///
/// Returns [`Error::ItemNotFound`] if the item does not exist and
/// [`Error::InsufficientQuantity`] if less than `amount` remains. On
/// either error nothing is written, so the enclosing transaction can
/// be rolled back or continued untouched.
pub fn debit(conn: &Connection, item_id: &str, amount: Quantity) -> Result<u32> {
    let Some((current, status)) = read_quantity(conn, item_id)? else {
        return Err(Error::ItemNotFound {
            item_id: item_id.to_string(),
        });
    };

    let Some(remaining) = current.checked_sub(amount.value()) else {
        return Err(Error::InsufficientQuantity {
            item_id: item_id.to_string(),
            requested: amount.value(),
            available: current,
        });
    };

    let status = if remaining == 0 {
        ItemStatus::Reserved
    } else {
        status
    };
    write_quantity(conn, item_id, remaining, status)?;
    Ok(remaining)
}

/// Adds `amount` back to an item's remaining quantity.
///
/// Returns `Ok(Some(remaining))` with the quantity after the credit,
/// or `Ok(None)` if the item row no longer exists. The missing-row
/// case is deliberately not an error: cancelling an orphaned
/// reservation has no inventory to restore.
///
/// Crediting an item that was fully reserved flips its status back to
/// `available`. Other statuses (`taken`, `expired`, `cancelled`) are
/// left alone; the returned quantity still grows so the claim is
/// accounted for.
///
/// # Errors
///
/// Returns an error if the read or write fails.
pub fn credit(conn: &Connection, item_id: &str, amount: Quantity) -> Result<Option<u32>> {
    let Some((current, status)) = read_quantity(conn, item_id)? else {
        return Ok(None);
    };

    let remaining = current.saturating_add(amount.value());
    let status = if status == ItemStatus::Reserved {
        ItemStatus::Available
    } else {
        status
    };
    write_quantity(conn, item_id, remaining, status)?;
    Ok(Some(remaining))
}

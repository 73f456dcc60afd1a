//! The cancel operation.
//!
//! Cancelling removes the reservation record and credits its quantity
//! back to the item in one immediate transaction. The missing-item
//! case (an orphaned reservation) is surfaced as an outcome rather
//! than an error so the user can always free their claim.

use crate::database::{ledger, Database};
use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::reservation::ReservationKey;

/// The result of a successful cancel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The reserved quantity was credited back to the item.
    Restored {
        /// How much was returned to the item's remaining quantity.
        quantity: u32,
    },
    /// The item no longer exists; the reservation record was removed
    /// and there was no inventory to restore.
    Orphaned,
}

/// Cancels a reservation and restores its quantity to the item.
///
/// If the item has been deleted since the reservation was made, the
/// record is still removed and [`CancelOutcome::Orphaned`] is
/// returned. Cancellation must always succeed for an existing
/// reservation; a dangling record the user cannot clear would be
/// worse than the lost inventory it points at.
///
/// # Errors
///
/// Returns [`Error::ReservationNotFound`] if no reservation exists for
/// the key, and [`Error::TransactionConflict`] if the write lock could
/// not be taken within the busy timeout.
///
/// # Examples
///
/// ```no_run
/// use pantry::database::{Database, DatabaseConfig};
/// use pantry::operations::{cancel_reservation, CancelOutcome};
/// use pantry::ReservationKey;
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/pantry.db")).unwrap();
/// let key = ReservationKey::new("it_1", "u_2").unwrap();
/// match cancel_reservation(&mut db, &key).unwrap() {
///     CancelOutcome::Restored { quantity } => println!("{quantity} returned"),
///     CancelOutcome::Orphaned => println!("item no longer exists"),
/// }
/// ```
pub fn cancel_reservation(db: &mut Database, key: &ReservationKey) -> Result<CancelOutcome> {
    let tx = db.immediate_transaction()?;

    let Some(reservation) = crate::database::select_reservation(&tx, key)? else {
        return Err(Error::ReservationNotFound {
            item_id: key.item_id.clone(),
            user_id: key.user_id.clone(),
        });
    };

    crate::database::delete_reservation(&tx, key)?;

    // Reservation quantity is positive by construction.
    let amount = Quantity::try_from(reservation.quantity())?;
    let outcome = match ledger::credit(&tx, &key.item_id, amount)? {
        Some(_) => CancelOutcome::Restored {
            quantity: reservation.quantity(),
        },
        None => {
            log::warn!(
                "cancelled orphaned reservation {key}: item no longer exists, {} {} not restored",
                reservation.quantity(),
                reservation.unit()
            );
            CancelOutcome::Orphaned
        }
    };

    tx.commit()?;

    log::debug!("cancelled reservation {key}");
    Ok(outcome)
}

//! The reserve operation.
//!
//! Reserving debits the item's remaining quantity and upserts the
//! requester's reservation record in one immediate transaction. The
//! availability check and both writes are a single atomic unit, so
//! two concurrent requests can never claim the same quantity.

use crate::database::{ledger, Database};
use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::reservation::{Reservation, ReservationKey};
use crate::user::UserRef;

/// Options for a reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOptions {
    /// The user making the reservation.
    pub requester: UserRef,

    /// The item to reserve quantity from.
    pub item_id: String,

    /// How much to reserve.
    pub quantity: Quantity,
}

impl ReserveOptions {
    /// Creates reserve options for the given requester, item, and
    /// quantity.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::operations::ReserveOptions;
    /// use pantry::{Quantity, UserRef};
    ///
    /// let requester = UserRef::new("u_2", "Alex").unwrap();
    /// let options = ReserveOptions::new(requester, "it_1", Quantity::try_from(4).unwrap());
    /// assert_eq!(options.item_id, "it_1");
    /// ```
    #[must_use]
    pub fn new(requester: UserRef, item_id: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            requester,
            item_id: item_id.into(),
            quantity,
        }
    }
}

/// The result of a successful reserve operation.
#[derive(Debug, Clone)]
pub struct ReserveOutcome {
    /// The reservation record after the operation. For a repeat
    /// request this carries the accrued total, not just the increment.
    pub reservation: Reservation,

    /// The item's remaining quantity after the debit.
    pub remaining: u32,

    /// Whether the request accrued into an existing reservation
    /// instead of creating a new record.
    pub accrued: bool,
}

/// Reserves quantity from an item for the requesting user.
///
/// A repeat request by the same user against the same item accrues
/// into the existing reservation record; the `(item, user)` pair never
/// holds more than one record.
///
/// The ownership check runs before the transaction is entered: users
/// cannot reserve their own items, and rejecting that case early keeps
/// it from ever contending for the write lock.
///
/// # Errors
///
/// Returns [`Error::ItemNotFound`] if the item does not exist,
/// [`Error::OwnItemReservation`] if the requester owns the item,
/// [`Error::InsufficientQuantity`] if less quantity remains than was
/// requested, and [`Error::TransactionConflict`] if the write lock
/// could not be taken within the busy timeout.
///
/// # Examples
///
/// ```no_run
/// use pantry::database::{Database, DatabaseConfig};
/// use pantry::operations::{reserve_item, ReserveOptions};
/// use pantry::{Quantity, UserRef};
///
/// let mut db = Database::open(DatabaseConfig::new("/tmp/pantry.db")).unwrap();
/// let requester = UserRef::new("u_2", "Alex").unwrap();
/// let options = ReserveOptions::new(requester, "it_1", Quantity::try_from(4).unwrap());
/// let outcome = reserve_item(&mut db, &options).unwrap();
/// println!("{} left", outcome.remaining);
/// ```
pub fn reserve_item(db: &mut Database, options: &ReserveOptions) -> Result<ReserveOutcome> {
    // Ownership guard, outside the atomic scope.
    let item = db
        .get_item(&options.item_id)?
        .ok_or_else(|| Error::ItemNotFound {
            item_id: options.item_id.clone(),
        })?;
    if item.owner().id() == options.requester.id() {
        return Err(Error::OwnItemReservation {
            item_id: options.item_id.clone(),
        });
    }

    let key = ReservationKey::new(options.item_id.clone(), options.requester.id())?;

    let tx = db.immediate_transaction()?;

    // Re-read inside the transaction; the item may have been deleted
    // between the guard and the lock.
    let item = crate::database::select_item(&tx, &options.item_id)?.ok_or_else(|| {
        Error::ItemNotFound {
            item_id: options.item_id.clone(),
        }
    })?;

    let remaining = ledger::debit(&tx, &options.item_id, options.quantity)?;

    let (reservation, accrued) =
        match crate::database::select_reservation(&tx, &key)? {
            Some(existing) => (existing.accrued(options.quantity), true),
            None => {
                let reservation = Reservation::builder(key, options.quantity)
                    .user_name(options.requester.display_name())
                    .item_name(item.name())
                    .unit(item.unit())
                    .build()?;
                (reservation, false)
            }
        };
    crate::database::upsert_reservation(&tx, &reservation)?;

    tx.commit()?;

    log::debug!(
        "reserved {} of item {} for user {} ({} remaining)",
        options.quantity,
        options.item_id,
        options.requester.id(),
        remaining
    );

    Ok(ReserveOutcome {
        reservation,
        remaining,
        accrued,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, create_test_item, qty, test_user};
    use crate::item::ItemStatus;
    use crate::quantity::QuantityUnit;

    #[test]
    fn test_reserve_creates_record_and_debits() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 10);

        let options = ReserveOptions::new(test_user("u_a"), item.id(), qty(4));
        let outcome = reserve_item(&mut db, &options).unwrap();

        assert_eq!(outcome.remaining, 6);
        assert!(!outcome.accrued);
        assert_eq!(outcome.reservation.quantity(), 4);
        assert_eq!(outcome.reservation.item_name(), "Apples");
        assert_eq!(outcome.reservation.unit(), QuantityUnit::Pieces);

        assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), 6);
    }

    #[test]
    fn test_repeat_reserve_accrues() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 10);

        let first = ReserveOptions::new(test_user("u_a"), item.id(), qty(4));
        reserve_item(&mut db, &first).unwrap();

        let second = ReserveOptions::new(test_user("u_a"), item.id(), qty(3));
        let outcome = reserve_item(&mut db, &second).unwrap();

        assert!(outcome.accrued);
        assert_eq!(outcome.reservation.quantity(), 7);
        assert_eq!(outcome.remaining, 3);

        // Single record for the pair.
        let records = db.list_reservations_for_item(item.id()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].quantity(), 7);
    }

    #[test]
    fn test_reserve_more_than_available_fails() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 10);

        reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_a"), item.id(), qty(7)),
        )
        .unwrap();

        let err = reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_b"), item.id(), qty(5)),
        )
        .unwrap_err();

        match err {
            Error::InsufficientQuantity {
                requested,
                available,
                ..
            } => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other}"),
        }

        // The failed request left no partial state behind.
        assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), 3);
        let key = ReservationKey::new(item.id(), "u_b").unwrap();
        assert!(db.get_reservation(&key).unwrap().is_none());
    }

    #[test]
    fn test_reserve_to_zero_marks_item_reserved() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 4);

        let outcome = reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_a"), item.id(), qty(4)),
        )
        .unwrap();

        assert_eq!(outcome.remaining, 0);
        let fetched = db.get_item(item.id()).unwrap().unwrap();
        assert_eq!(fetched.status(), ItemStatus::Reserved);
        assert!(db.list_available_items().unwrap().is_empty());
    }

    #[test]
    fn test_reserve_own_item_rejected() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 10);

        let owner = UserRef::new("u_owner", "Dana").unwrap();
        let err = reserve_item(&mut db, &ReserveOptions::new(owner, item.id(), qty(1)))
            .unwrap_err();

        assert!(matches!(err, Error::OwnItemReservation { .. }));
        // Nothing was written.
        assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), 10);
    }

    #[test]
    fn test_reserve_missing_item() {
        let mut db = create_test_database();
        let err = reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_a"), "no-such-item", qty(1)),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ItemNotFound { .. }));
    }

    #[test]
    fn test_two_users_reserve_independently() {
        let mut db = create_test_database();
        let item = create_test_item(&db, 10);

        reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_a"), item.id(), qty(4)),
        )
        .unwrap();
        reserve_item(
            &mut db,
            &ReserveOptions::new(test_user("u_b"), item.id(), qty(3)),
        )
        .unwrap();

        assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), 3);
        assert_eq!(db.list_reservations_for_item(item.id()).unwrap().len(), 2);
    }
}

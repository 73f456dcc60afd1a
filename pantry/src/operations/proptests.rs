//! Property-based tests for the reservation protocol.
//!
//! These drive random sequences of reserve and cancel operations
//! against a single item and check the accounting invariants after
//! every step.

use proptest::prelude::*;

use crate::database::test_util::{create_test_database, create_test_item};
use crate::operations::{cancel_reservation, reserve_item, CancelOutcome, ReserveOptions};
use crate::quantity::Quantity;
use crate::reservation::ReservationKey;
use crate::user::UserRef;

#[derive(Debug, Clone)]
enum Step {
    Reserve { user: usize, quantity: u32 },
    Cancel { user: usize },
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..4, 1u32..=6).prop_map(|(user, quantity)| Step::Reserve { user, quantity }),
        (0usize..4).prop_map(|user| Step::Cancel { user }),
    ]
}

fn requester(user: usize) -> UserRef {
    UserRef::new(format!("u_{user}"), format!("User {user}")).unwrap()
}

proptest! {
    // Quantity is conserved: whatever reserves debit, the item's
    // remaining plus the sum of all reservation records equals the
    // initial quantity after every operation.
    #[test]
    fn prop_quantity_conserved(
        initial in 1u32..=20,
        steps in prop::collection::vec(step_strategy(), 1..30),
    ) {
        let mut db = create_test_database();
        let item = create_test_item(&db, initial);

        for step in steps {
            match step {
                Step::Reserve { user, quantity } => {
                    let options = ReserveOptions::new(
                        requester(user),
                        item.id(),
                        Quantity::try_from(quantity).unwrap(),
                    );
                    // InsufficientQuantity is a legal refusal; anything
                    // else here is a bug.
                    match reserve_item(&mut db, &options) {
                        Ok(_) | Err(crate::Error::InsufficientQuantity { .. }) => {}
                        Err(other) => return Err(TestCaseError::fail(format!(
                            "unexpected reserve error: {other}"
                        ))),
                    }
                }
                Step::Cancel { user } => {
                    let key = ReservationKey::new(item.id(), format!("u_{user}")).unwrap();
                    match cancel_reservation(&mut db, &key) {
                        Ok(CancelOutcome::Restored { .. })
                        | Err(crate::Error::ReservationNotFound { .. }) => {}
                        Ok(CancelOutcome::Orphaned) => return Err(TestCaseError::fail(
                            "orphaned outcome without item deletion".to_string(),
                        )),
                        Err(other) => return Err(TestCaseError::fail(format!(
                            "unexpected cancel error: {other}"
                        ))),
                    }
                }
            }

            let remaining = db.get_item(item.id()).unwrap().unwrap().quantity();
            let reserved: u32 = db
                .list_reservations_for_item(item.id())
                .unwrap()
                .iter()
                .map(crate::Reservation::quantity)
                .sum();

            prop_assert_eq!(
                remaining + reserved,
                initial,
                "conservation violated: {} remaining + {} reserved != {} initial",
                remaining, reserved, initial
            );
            prop_assert!(reserved <= initial, "oversell: {} reserved of {}", reserved, initial);
        }
    }

    // Reserve then cancel is a no-op on the item's remaining quantity.
    #[test]
    fn prop_reserve_cancel_round_trip(
        initial in 1u32..=20,
        request in 1u32..=20,
    ) {
        let mut db = create_test_database();
        let item = create_test_item(&db, initial);

        let options = ReserveOptions::new(
            requester(0),
            item.id(),
            Quantity::try_from(request).unwrap(),
        );

        if reserve_item(&mut db, &options).is_ok() {
            prop_assert!(request <= initial);
            let key = ReservationKey::new(item.id(), "u_0").unwrap();
            let outcome = cancel_reservation(&mut db, &key).unwrap();
            prop_assert_eq!(outcome, CancelOutcome::Restored { quantity: request });
        } else {
            prop_assert!(request > initial);
        }

        prop_assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), initial);
    }

    // Accrual keeps a single record per (item, user) pair whose
    // quantity is the sum of the granted requests.
    #[test]
    fn prop_accrual_single_record(
        requests in prop::collection::vec(1u32..=5, 1..8),
    ) {
        let total: u32 = requests.iter().sum();
        let mut db = create_test_database();
        let item = create_test_item(&db, total);

        for request in &requests {
            let options = ReserveOptions::new(
                requester(0),
                item.id(),
                Quantity::try_from(*request).unwrap(),
            );
            reserve_item(&mut db, &options).unwrap();
        }

        let records = db.list_reservations_for_item(item.id()).unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].quantity(), total);
        prop_assert_eq!(db.get_item(item.id()).unwrap().unwrap().quantity(), 0);
    }
}

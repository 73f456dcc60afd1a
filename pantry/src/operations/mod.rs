//! The reservation protocol.
//!
//! This module implements the two atomic operations that mutate
//! inventory and reservation records together: reserving quantity from
//! an item and cancelling a reservation. Each runs inside a single
//! immediate transaction so the inventory check and both writes commit
//! or roll back as one unit.

mod cancel;
mod reserve;

#[cfg(test)]
mod proptests;

pub use cancel::{cancel_reservation, CancelOutcome};
pub use reserve::{reserve_item, ReserveOptions, ReserveOutcome};

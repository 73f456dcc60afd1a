#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pantry
//!
//! A library for sharing surplus food items and reserving quantities
//! from them.
//!
//! Owners list items with a remaining quantity; other users claim
//! portions through an atomic reservation protocol that never hands
//! out more than remains, even under concurrent requests.
//!
//! ## Core Types
//!
//! - [`Item`] and [`ItemStatus`]: Shared items and their lifecycle
//! - [`Quantity`] and [`QuantityUnit`]: Validated amounts
//! - [`Reservation`] and [`ReservationKey`]: Quantity claims
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use pantry::{Quantity, QuantityUnit};
//!
//! // Quantities are always positive
//! let quantity = Quantity::try_from(4).unwrap();
//! assert_eq!(quantity.value(), 4);
//! assert!(Quantity::try_from(0).is_err());
//!
//! let unit: QuantityUnit = "pieces".parse().unwrap();
//! assert_eq!(unit, QuantityUnit::Pieces);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod item;
pub mod logging;
pub mod operations;
pub mod quantity;
pub mod reservation;
pub mod user;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use item::{Item, ItemBuilder, ItemStatus, ValidationError};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    cancel_reservation, reserve_item, CancelOutcome, ReserveOptions, ReserveOutcome,
};
pub use quantity::{InvalidQuantityError, Quantity, QuantityUnit};
pub use reservation::{Reservation, ReservationBuilder, ReservationKey};
pub use user::UserRef;

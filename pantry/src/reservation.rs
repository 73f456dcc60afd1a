//! Reservation types for tracking quantity claims against items.
//!
//! This module provides the reservation record, its deterministic key,
//! and a builder for validated construction.

use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::item::ValidationError;
use crate::quantity::{Quantity, QuantityUnit};

/// The deterministic identity of a reservation.
///
/// A reservation is keyed by the item and the reserving user: at most
/// one active reservation exists per `(item, user)` pair, and repeated
/// reserve requests accrue quantity into the existing record instead
/// of creating duplicates.
///
/// # Examples
///
/// ```
/// use pantry::ReservationKey;
///
/// let key = ReservationKey::new("it_1", "u_2").unwrap();
/// assert_eq!(format!("{key}"), "res:it_1:u_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationKey {
    /// The reserved item's identifier.
    pub item_id: String,
    /// The reserving user's identifier.
    pub user_id: String,
}

impl ReservationKey {
    /// Creates a new reservation key.
    ///
    /// Both components are trimmed of surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is empty after trimming.
    pub fn new(
        item_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let item_id = item_id.into().trim().to_string();
        if item_id.is_empty() {
            return Err(ValidationError {
                field: "item_id".into(),
                message: "item id must be non-empty after trimming whitespace".into(),
            });
        }

        let user_id = user_id.into().trim().to_string();
        if user_id.is_empty() {
            return Err(ValidationError {
                field: "user_id".into(),
                message: "user id must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Self { item_id, user_id })
    }
}

impl fmt::Display for ReservationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "res:{}:{}", self.item_id, self.user_id)
    }
}

/// A quantity claim by one user against one item.
///
/// The record snapshots the item's name and unit at reservation time
/// so the claim remains presentable even after the item is deleted
/// (the orphaned-reservation edge case).
///
/// # Examples
///
/// ```
/// use pantry::{Quantity, QuantityUnit, Reservation, ReservationKey};
///
/// let key = ReservationKey::new("it_1", "u_2").unwrap();
/// let reservation = Reservation::builder(key, Quantity::try_from(4).unwrap())
///     .user_name("Alex")
///     .item_name("Apples")
///     .unit(QuantityUnit::Pieces)
///     .build()
///     .unwrap();
///
/// assert_eq!(reservation.quantity(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    key: ReservationKey,
    user_name: String,
    item_name: String,
    quantity: u32,
    unit: QuantityUnit,
    created_at: SystemTime,
    updated_at: SystemTime,
}

impl Reservation {
    /// Creates a new reservation builder.
    #[must_use]
    pub fn builder(key: ReservationKey, quantity: Quantity) -> ReservationBuilder {
        ReservationBuilder {
            key,
            user_name: String::new(),
            item_name: String::new(),
            quantity,
            unit: QuantityUnit::Pieces,
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns the reservation key.
    #[must_use]
    pub const fn key(&self) -> &ReservationKey {
        &self.key
    }

    /// Returns the reserved item's identifier.
    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.key.item_id
    }

    /// Returns the reserving user's identifier.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.key.user_id
    }

    /// Returns the reserving user's display name.
    #[must_use]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Returns the snapshotted item name.
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Returns the reserved quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit of measure.
    #[must_use]
    pub const fn unit(&self) -> QuantityUnit {
        self.unit
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns the last-accrual timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> SystemTime {
        self.updated_at
    }

    /// Returns a copy with the quantity increased by `amount` and the
    /// update timestamp refreshed.
    ///
    /// This is the accrual step of a repeated reserve request.
    #[must_use]
    pub fn accrued(&self, amount: Quantity) -> Self {
        let mut updated = self.clone();
        updated.quantity += amount.value();
        updated.updated_at = SystemTime::now();
        updated
    }
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    key: ReservationKey,
    user_name: String,
    item_name: String,
    quantity: Quantity,
    unit: QuantityUnit,
    created_at: Option<SystemTime>,
    updated_at: Option<SystemTime>,
}

impl ReservationBuilder {
    /// Sets the reserving user's display name.
    #[must_use]
    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    /// Sets the snapshotted item name.
    #[must_use]
    pub fn item_name(mut self, item_name: impl Into<String>) -> Self {
        self.item_name = item_name.into();
        self
    }

    /// Sets the unit of measure.
    #[must_use]
    pub const fn unit(mut self, unit: QuantityUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Sets the update timestamp.
    #[must_use]
    pub fn updated_at(mut self, updated_at: SystemTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the user display name or item-name snapshot
    /// is empty after trimming.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        let user_name = self.user_name.trim().to_string();
        if user_name.is_empty() {
            return Err(ValidationError {
                field: "user_name".into(),
                message: "user display name must be non-empty after trimming whitespace".into(),
            });
        }

        let item_name = self.item_name.trim().to_string();
        if item_name.is_empty() {
            return Err(ValidationError {
                field: "item_name".into(),
                message: "item name snapshot must be non-empty after trimming whitespace".into(),
            });
        }

        let now = SystemTime::now();
        Ok(Reservation {
            key: self.key,
            user_name,
            item_name,
            quantity: self.quantity.value(),
            unit: self.unit,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        })
    }
}

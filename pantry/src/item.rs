//! Shared item types.
//!
//! This module provides the item entity listed by an owner, its
//! lifecycle status, and a builder for validated construction.

use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quantity::{Quantity, QuantityUnit};
use crate::user::UserRef;

/// Lifecycle status of a shared item.
///
/// The `reserved` state is derived: it is entered when the remaining
/// quantity reaches zero inside the reservation protocol and left
/// again when a cancellation restores quantity.
///
/// # Examples
///
/// ```
/// use pantry::ItemStatus;
///
/// assert_eq!(format!("{}", ItemStatus::Available), "available");
/// assert_eq!("taken".parse::<ItemStatus>().unwrap(), ItemStatus::Taken);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Quantity remains and the item can be reserved.
    Available,
    /// All quantity is claimed by active reservations.
    Reserved,
    /// The item has been picked up.
    Taken,
    /// The item passed its expiry date.
    Expired,
    /// The owner withdrew the listing.
    Cancelled,
}

impl ItemStatus {
    /// Returns the canonical lowercase name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Taken => "taken",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "taken" => Ok(Self::Taken),
            "expired" => Ok(Self::Expired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("unknown item status: {s}")),
        }
    }
}

/// A shared item listed by its owner.
///
/// The `quantity` field is the authoritative *remaining* quantity. It
/// is mutated only through the reservation protocol or direct owner
/// edits, and may reach zero while the item still exists.
///
/// # Examples
///
/// ```
/// use pantry::{Item, Quantity, QuantityUnit, UserRef};
///
/// let owner = UserRef::new("u_1", "Dana").unwrap();
/// let item = Item::builder(owner, "Apples", Quantity::try_from(10).unwrap(), QuantityUnit::Pieces)
///     .build()
///     .unwrap();
///
/// assert_eq!(item.name(), "Apples");
/// assert_eq!(item.quantity(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: String,
    owner: UserRef,
    name: String,
    quantity: u32,
    unit: QuantityUnit,
    status: ItemStatus,
    created_at: SystemTime,
}

impl Item {
    /// Creates a new item builder.
    ///
    /// The initial quantity must be positive; the remaining quantity
    /// only reaches zero through reservations.
    #[must_use]
    pub fn builder(
        owner: UserRef,
        name: impl Into<String>,
        quantity: Quantity,
        unit: QuantityUnit,
    ) -> ItemBuilder {
        ItemBuilder {
            id: None,
            owner,
            name: name.into(),
            quantity,
            unit,
            status: ItemStatus::Available,
            created_at: None,
        }
    }

    /// Rehydrates an item from already-validated storage fields.
    ///
    /// The remaining quantity is raw and may be zero, which the
    /// builder's [`Quantity`] argument cannot express.
    pub(crate) fn from_storage(
        id: String,
        owner: UserRef,
        name: String,
        quantity: u32,
        unit: QuantityUnit,
        status: ItemStatus,
        created_at: SystemTime,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            quantity,
            unit,
            status,
            created_at,
        }
    }

    /// Returns the item's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> &UserRef {
        &self.owner
    }

    /// Returns the display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the remaining quantity.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the unit of measure.
    #[must_use]
    pub const fn unit(&self) -> QuantityUnit {
        self.unit
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ItemStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Returns the item with its remaining quantity replaced.
    ///
    /// Unlike the builder, this accepts zero: a fully reserved item
    /// keeps its row with zero remaining.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Returns the item with its lifecycle status replaced.
    #[must_use]
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }
}

/// Builder for creating [`Item`] instances.
#[derive(Debug)]
pub struct ItemBuilder {
    id: Option<String>,
    owner: UserRef,
    name: String,
    quantity: Quantity,
    unit: QuantityUnit,
    status: ItemStatus,
    created_at: Option<SystemTime>,
}

impl ItemBuilder {
    /// Sets an explicit identifier instead of generating one.
    ///
    /// Used when rehydrating an item from storage.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub const fn status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub fn created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the item, generating a UUID identifier if none was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty after trimming.
    pub fn build(self) -> Result<Item, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "item name must be non-empty after trimming whitespace".into(),
            });
        }

        Ok(Item {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            owner: self.owner,
            name,
            quantity: self.quantity.value(),
            unit: self.unit,
            status: self.status,
            created_at: self.created_at.unwrap_or_else(SystemTime::now),
        })
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

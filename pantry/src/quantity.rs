//! Quantity and unit-of-measure types.
//!
//! This module provides types for working with item quantities,
//! including validation and the supported units of measure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A validated, strictly positive quantity.
///
/// Zero is rejected: an item is never created empty and a reservation
/// never claims nothing. The *remaining* quantity of an item may reach
/// zero, but that is tracked as a plain `u32` on the item itself.
///
/// # Examples
///
/// ```
/// use pantry::Quantity;
///
/// let amount = Quantity::try_from(4).unwrap();
/// assert_eq!(amount.value(), 4);
///
/// assert!(Quantity::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Returns the underlying amount.
    ///
    /// # Examples
    ///
    /// ```
    /// use pantry::Quantity;
    ///
    /// let amount = Quantity::try_from(7).unwrap();
    /// assert_eq!(amount.value(), 7);
    /// ```
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = InvalidQuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(InvalidQuantityError {
                value,
                reason: "quantity must be positive".into(),
            })
        } else {
            Ok(Self(value))
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for invalid quantities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQuantityError {
    /// The invalid quantity value.
    pub value: u32,
    /// The reason the quantity is invalid.
    pub reason: String,
}

impl fmt::Display for InvalidQuantityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid quantity {}: {}", self.value, self.reason)
    }
}

impl std::error::Error for InvalidQuantityError {}

/// Unit of measure for an item's quantity.
///
/// # Examples
///
/// ```
/// use pantry::QuantityUnit;
///
/// assert_eq!(format!("{}", QuantityUnit::Pieces), "pieces");
/// assert_eq!("grams".parse::<QuantityUnit>().unwrap(), QuantityUnit::Grams);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityUnit {
    /// Individual pieces.
    Pieces,
    /// Grams.
    Grams,
    /// Kilograms.
    Kilograms,
    /// Milliliters.
    Milliliters,
    /// Liters.
    Liters,
    /// Sealed packs.
    Packs,
}

impl QuantityUnit {
    /// Returns the canonical lowercase name of the unit.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pieces => "pieces",
            Self::Grams => "grams",
            Self::Kilograms => "kilograms",
            Self::Milliliters => "milliliters",
            Self::Liters => "liters",
            Self::Packs => "packs",
        }
    }
}

impl fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuantityUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pieces" => Ok(Self::Pieces),
            "grams" => Ok(Self::Grams),
            "kilograms" => Ok(Self::Kilograms),
            "milliliters" => Ok(Self::Milliliters),
            "liters" => Ok(Self::Liters),
            "packs" => Ok(Self::Packs),
            _ => Err(format!("unknown quantity unit: {s}")),
        }
    }
}

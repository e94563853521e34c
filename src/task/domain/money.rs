//! Validated currency amounts.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Positive currency amount in integral minor units.
///
/// Budgets and bid amounts are exact integers of the currency's smallest
/// unit, matching the `BIGINT` column backing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a validated amount from minor units.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidAmountError`] when the value is zero or negative.
    pub const fn new(minor_units: i64) -> Result<Self, InvalidAmountError> {
        if minor_units <= 0 {
            return Err(InvalidAmountError(minor_units));
        }
        Ok(Self(minor_units))
    }

    /// Returns the amount in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when constructing a non-positive amount.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid amount {0}, expected a positive number of minor units")]
pub struct InvalidAmountError(pub i64);

//! # Monthly Cost
//!
//! The monthly running cost of a resource, stored as integer cents.
//!
//! Upstream services send costs as JSON numbers (`138.7`). On
//! deserialization the amount is rounded to the nearest cent and rejected if
//! negative or non-finite; on serialization it is written back as a number
//! with at most two decimals. All arithmetic happens on cents, so the sum of
//! any number of costs is exact.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A non-negative monthly amount in the account currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthlyCost(u64);

impl MonthlyCost {
    /// Zero cost.
    pub const ZERO: MonthlyCost = MonthlyCost(0);

    /// Create a cost from a whole number of cents.
    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Create a cost from a decimal amount, rounding to the nearest cent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCost`] if the amount is negative,
    /// NaN, infinite, or too large to represent in cents.
    pub fn from_amount(amount: f64) -> Result<Self, ValidationError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ValidationError::InvalidCost(amount.to_string()));
        }
        let cents = (amount * 100.0).round();
        if cents > u64::MAX as f64 {
            return Err(ValidationError::InvalidCost(amount.to_string()));
        }
        Ok(Self(cents as u64))
    }

    /// The amount in cents.
    pub const fn cents(&self) -> u64 {
        self.0
    }

    /// The amount as a decimal number.
    pub fn as_amount(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Add two costs, saturating at the maximum representable amount.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for MonthlyCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl std::iter::Sum for MonthlyCost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl<'a> std::iter::Sum<&'a MonthlyCost> for MonthlyCost {
    fn sum<I: Iterator<Item = &'a MonthlyCost>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for MonthlyCost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_amount())
    }
}

impl<'de> Deserialize<'de> for MonthlyCost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Self::from_amount(amount).map_err(serde::de::Error::custom)
    }
}

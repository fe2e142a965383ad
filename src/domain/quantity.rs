// Copyright (c) 2025 - Craftify, Inc.
//! Unit and Quantity Value Objects
//!
//! A [`Quantity`] is an exact decimal amount paired with a [`Unit`].
//! Arithmetic between two quantities requires identical units: there is no
//! conversion table, so any cross-unit operation is a hard error rather
//! than a silent coercion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Quantity and unit validation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Unit is empty")]
    EmptyUnit,

    #[error("Unit exceeds maximum length of 32 characters: {0}")]
    UnitTooLong(String),

    #[error("Unit contains whitespace: {0}")]
    UnitContainsWhitespace(String),

    #[error("Cannot convert {found} to {required}")]
    UnitMismatch { required: Unit, found: Unit },

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    #[error("Insufficient amount: have {available}, need {required}")]
    InsufficientAmount {
        available: Decimal,
        required: Decimal,
    },
}

/// Unit of measure value object
///
/// An opaque unit label ("g", "ml", "pcs", ...). Units are compared for
/// equality only; `"g"` and `"kg"` are unrelated as far as this engine is
/// concerned.
///
/// # Invariants
/// - Non-empty
/// - At most 32 characters
/// - No whitespace
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unit(String);

impl Unit {
    /// Maximum length for a unit label
    pub const MAX_LENGTH: usize = 32;

    /// Create a new unit with validation
    pub fn new(unit: impl Into<String>) -> Result<Self, QuantityError> {
        let unit = unit.into();

        if unit.is_empty() {
            return Err(QuantityError::EmptyUnit);
        }

        if unit.len() > Self::MAX_LENGTH {
            return Err(QuantityError::UnitTooLong(unit));
        }

        if unit.chars().any(char::is_whitespace) {
            return Err(QuantityError::UnitContainsWhitespace(unit));
        }

        Ok(Self(unit))
    }

    /// Get the unit as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Unit {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Unit {
    type Error = QuantityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Unit {
    type Error = QuantityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// An exact decimal amount in a given unit
///
/// Ledger contexts require non-negative amounts, and all arithmetic is
/// unit-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Exact amount
    pub amount: Decimal,
    /// Unit of measure
    pub unit: Unit,
}

impl Quantity {
    /// Create a new quantity
    ///
    /// # Invariants
    /// - Amount is non-negative
    pub fn new(amount: Decimal, unit: Unit) -> Result<Self, QuantityError> {
        if amount.is_sign_negative() {
            return Err(QuantityError::NegativeAmount(amount));
        }
        Ok(Self { amount, unit })
    }

    /// Add another quantity, requiring identical units
    pub fn checked_add(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        self.require_same_unit(other)?;
        Ok(Quantity {
            amount: self.amount + other.amount,
            unit: self.unit.clone(),
        })
    }

    /// Subtract another quantity, requiring identical units and a
    /// non-negative result
    pub fn checked_sub(&self, other: &Quantity) -> Result<Quantity, QuantityError> {
        self.require_same_unit(other)?;
        if other.amount > self.amount {
            return Err(QuantityError::InsufficientAmount {
                available: self.amount,
                required: other.amount,
            });
        }
        Ok(Quantity {
            amount: self.amount - other.amount,
            unit: self.unit.clone(),
        })
    }

    /// Check whether the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    fn require_same_unit(&self, other: &Quantity) -> Result<(), QuantityError> {
        if self.unit != other.unit {
            return Err(QuantityError::UnitMismatch {
                required: self.unit.clone(),
                found: other.unit.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qty(amount: i64, unit: &str) -> Quantity {
        Quantity::new(Decimal::from(amount), Unit::new(unit).unwrap()).unwrap()
    }

    #[test]
    fn test_valid_units() {
        assert!(Unit::new("g").is_ok());
        assert!(Unit::new("ml").is_ok());
        assert!(Unit::new("pcs").is_ok());
        assert!(Unit::new("kWh").is_ok());
    }

    #[test]
    fn test_invalid_units() {
        assert_eq!(Unit::new(""), Err(QuantityError::EmptyUnit));
        assert!(Unit::new("fluid ounce").is_err());
        assert!(Unit::new("x".repeat(33)).is_err());
    }

    #[test]
    fn test_negative_amount_rejected() {
        let unit = Unit::new("g").unwrap();
        assert!(matches!(
            Quantity::new(Decimal::from(-1), unit),
            Err(QuantityError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_add_same_unit() {
        let sum = qty(300, "g").checked_add(&qty(200, "g")).unwrap();
        assert_eq!(sum, qty(500, "g"));
    }

    #[test]
    fn test_add_mismatched_unit() {
        let err = qty(300, "g").checked_add(&qty(1, "kg")).unwrap_err();
        assert_eq!(
            err,
            QuantityError::UnitMismatch {
                required: Unit::new("g").unwrap(),
                found: Unit::new("kg").unwrap(),
            }
        );
        assert_eq!(err.to_string(), "Cannot convert kg to g");
    }

    #[test]
    fn test_sub_never_negative() {
        let err = qty(100, "g").checked_sub(&qty(150, "g")).unwrap_err();
        assert!(matches!(err, QuantityError::InsufficientAmount { .. }));
    }

    #[test]
    fn test_sub_to_zero() {
        let rest = qty(100, "g").checked_sub(&qty(100, "g")).unwrap();
        assert!(rest.is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", qty(500, "g")), "500 g");
    }
}

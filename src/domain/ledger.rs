// Copyright (c) 2025 - Craftify, Inc.
//! Quantity Ledgers
//!
//! A [`Ledger`] maps a quantity type name ("flour", "volume", ...) to a
//! [`QuantitySet`]: the lots held for that type, keyed by unit. Products
//! carry two independent ledgers - `measurements` (descriptive) and
//! `availability` (consumable). Only availability is ever reduced by the
//! engine, and a lot can never go negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::quantity::{Quantity, QuantityError, Unit};

/// Lots of a single quantity type, keyed by unit
///
/// At most one lot per unit; adding a quantity with an existing unit
/// accumulates into its lot. Iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantitySet(BTreeMap<Unit, Decimal>);

impl QuantitySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lots
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the set holds no lots
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Amount held in the given unit (zero when absent)
    pub fn amount_in(&self, unit: &Unit) -> Decimal {
        self.0.get(unit).copied().unwrap_or_default()
    }

    /// Check whether a lot exists for the given unit
    pub fn contains_unit(&self, unit: &Unit) -> bool {
        self.0.contains_key(unit)
    }

    /// Add a quantity into its unit's lot
    pub fn add(&mut self, quantity: Quantity) -> Result<(), QuantityError> {
        if quantity.amount.is_sign_negative() {
            return Err(QuantityError::NegativeAmount(quantity.amount));
        }
        *self.0.entry(quantity.unit).or_default() += quantity.amount;
        Ok(())
    }

    /// Subtract an amount from the given unit's lot
    ///
    /// # Invariants
    /// - The lot never goes negative; an insufficient lot is an error
    pub fn subtract(&mut self, unit: &Unit, amount: Decimal) -> Result<(), QuantityError> {
        if amount.is_sign_negative() {
            return Err(QuantityError::NegativeAmount(amount));
        }
        let available = self.amount_in(unit);
        if amount > available {
            return Err(QuantityError::InsufficientAmount {
                available,
                required: amount,
            });
        }
        if let Some(lot) = self.0.get_mut(unit) {
            *lot -= amount;
        }
        Ok(())
    }

    /// Iterate lots as (unit, amount) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&Unit, &Decimal)> {
        self.0.iter()
    }

    /// Iterate the units held
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.0.keys()
    }

    /// Check whether both sets hold exactly the same units
    pub fn same_units(&self, other: &QuantitySet) -> bool {
        self.0.keys().eq(other.0.keys())
    }

    /// Sum another set into this one, lot by lot
    ///
    /// Both sets must hold exactly the same units; a differing unit is a
    /// conversion error, never a silent coercion.
    pub fn checked_sum(mut self, other: QuantitySet) -> Result<QuantitySet, QuantityError> {
        if !self.same_units(&other) {
            let required = self
                .units()
                .find(|u| !other.contains_unit(u))
                .or_else(|| self.units().next())
                .or_else(|| other.units().next());
            let found = other
                .units()
                .find(|u| !self.contains_unit(u))
                .or_else(|| other.units().next())
                .or_else(|| self.units().next());
            if let (Some(required), Some(found)) = (required, found) {
                return Err(QuantityError::UnitMismatch {
                    required: required.clone(),
                    found: found.clone(),
                });
            }
        }
        for (unit, amount) in other.0 {
            *self.0.entry(unit).or_default() += amount;
        }
        Ok(self)
    }
}

impl FromIterator<Quantity> for QuantitySet {
    fn from_iter<T: IntoIterator<Item = Quantity>>(iter: T) -> Self {
        let mut set = Self::new();
        for quantity in iter {
            *set.0.entry(quantity.unit).or_default() += quantity.amount;
        }
        set
    }
}

/// Quantity type name → lots held for that type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger(BTreeMap<String, QuantitySet>);

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quantity types tracked
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the ledger tracks no types
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lots for the given quantity type
    pub fn get(&self, type_name: &str) -> Option<&QuantitySet> {
        self.0.get(type_name)
    }

    /// Check whether the ledger tracks the given type
    pub fn contains(&self, type_name: &str) -> bool {
        self.0.contains_key(type_name)
    }

    /// Add a quantity under a type name
    pub fn add(
        &mut self,
        type_name: impl Into<String>,
        quantity: Quantity,
    ) -> Result<(), QuantityError> {
        self.0.entry(type_name.into()).or_default().add(quantity)
    }

    /// Subtract an amount from a type's lot in the given unit
    pub fn subtract(
        &mut self,
        type_name: &str,
        unit: &Unit,
        amount: Decimal,
    ) -> Result<(), QuantityError> {
        match self.0.get_mut(type_name) {
            Some(set) => set.subtract(unit, amount),
            None => Err(QuantityError::InsufficientAmount {
                available: Decimal::ZERO,
                required: amount,
            }),
        }
    }

    /// Replace all lots for a type
    pub fn insert(&mut self, type_name: impl Into<String>, set: QuantitySet) {
        self.0.insert(type_name.into(), set);
    }

    /// Remove a type and return its lots
    pub fn remove(&mut self, type_name: &str) -> Option<QuantitySet> {
        self.0.remove(type_name)
    }

    /// Iterate (type name, lots) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &QuantitySet)> {
        self.0.iter()
    }

    /// Iterate the type names tracked
    pub fn types(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

impl IntoIterator for Ledger {
    type Item = (String, QuantitySet);
    type IntoIter = std::collections::btree_map::IntoIter<String, QuantitySet>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, QuantitySet)> for Ledger {
    fn from_iter<T: IntoIterator<Item = (String, QuantitySet)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(u: &str) -> Unit {
        Unit::new(u).unwrap()
    }

    fn qty(amount: i64, u: &str) -> Quantity {
        Quantity::new(Decimal::from(amount), unit(u)).unwrap()
    }

    #[test]
    fn test_add_accumulates_per_unit() {
        let mut ledger = Ledger::new();
        ledger.add("flour", qty(600, "g")).unwrap();
        ledger.add("flour", qty(400, "g")).unwrap();
        ledger.add("flour", qty(1, "kg")).unwrap();

        let lots = ledger.get("flour").unwrap();
        assert_eq!(lots.amount_in(&unit("g")), Decimal::from(1000));
        assert_eq!(lots.amount_in(&unit("kg")), Decimal::from(1));
        assert_eq!(lots.len(), 2);
    }

    #[test]
    fn test_subtract_within_lot() {
        let mut ledger = Ledger::new();
        ledger.add("flour", qty(1000, "g")).unwrap();
        ledger.subtract("flour", &unit("g"), Decimal::from(400)).unwrap();
        assert_eq!(
            ledger.get("flour").unwrap().amount_in(&unit("g")),
            Decimal::from(600)
        );
    }

    #[test]
    fn test_subtract_never_negative() {
        let mut ledger = Ledger::new();
        ledger.add("flour", qty(100, "g")).unwrap();
        let err = ledger
            .subtract("flour", &unit("g"), Decimal::from(101))
            .unwrap_err();
        assert!(matches!(err, QuantityError::InsufficientAmount { .. }));
        // unchanged on failure
        assert_eq!(
            ledger.get("flour").unwrap().amount_in(&unit("g")),
            Decimal::from(100)
        );
    }

    #[test]
    fn test_subtract_missing_type() {
        let mut ledger = Ledger::new();
        let err = ledger
            .subtract("sugar", &unit("g"), Decimal::from(1))
            .unwrap_err();
        assert!(matches!(err, QuantityError::InsufficientAmount { .. }));
    }

    #[test]
    fn test_same_units() {
        let a: QuantitySet = [qty(1, "g")].into_iter().collect();
        let b: QuantitySet = [qty(5, "g")].into_iter().collect();
        let c: QuantitySet = [qty(5, "ml")].into_iter().collect();
        assert!(a.same_units(&b));
        assert!(!a.same_units(&c));
    }

    #[test]
    fn test_deterministic_iteration() {
        let mut ledger = Ledger::new();
        ledger.add("sugar", qty(1, "g")).unwrap();
        ledger.add("flour", qty(1, "g")).unwrap();
        let types: Vec<_> = ledger.types().cloned().collect();
        assert_eq!(types, vec!["flour".to_string(), "sugar".to_string()]);
    }
}

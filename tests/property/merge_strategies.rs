// Copyright (c) 2025 - Craftify, Inc.
//! Property-Based Tests for Merge Strategies
//!
//! Merges are pure functions, so their laws must hold for all inputs:
//! determinism, original-wins for APPEND_MISSING, incoming-wins for
//! OVERRIDE, identity for KEEP_ORIGINAL, and exact addition for SUM.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use craftify_recipes::domain::{Ledger, Quantity, Unit};
use craftify_recipes::merge::{LedgerMergeStrategy, MapMergeStrategy};

// ============================================================================
// Strategies
// ============================================================================

/// Generate small string key/value maps
fn kv_map() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{1,6}", 0..8)
}

/// Generate a non-negative exact amount
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000).prop_map(Decimal::from)
}

/// Generate a single-type ledger with one lot in the given unit
fn single_lot_ledger(type_name: &'static str, unit: &'static str) -> impl Strategy<Value = Ledger> {
    amount().prop_map(move |a| {
        let mut ledger = Ledger::new();
        ledger
            .add(type_name, Quantity::new(a, Unit::new(unit).unwrap()).unwrap())
            .unwrap();
        ledger
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: merges are deterministic
    #[test]
    fn prop_map_merge_is_deterministic(original in kv_map(), incoming in kv_map()) {
        let once = MapMergeStrategy::AppendMissing.merge(original.clone(), incoming.clone());
        let twice = MapMergeStrategy::AppendMissing.merge(original, incoming);
        prop_assert_eq!(once, twice);
    }

    /// Property: APPEND_MISSING keeps every original entry unchanged and
    /// only fills in keys the original lacked
    #[test]
    fn prop_append_missing_original_wins(original in kv_map(), incoming in kv_map()) {
        let merged = MapMergeStrategy::AppendMissing.merge(original.clone(), incoming.clone());

        for (key, value) in &original {
            prop_assert_eq!(merged.get(key), Some(value));
        }
        for (key, value) in &incoming {
            if !original.contains_key(key) {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        prop_assert_eq!(
            merged.len(),
            original.len() + incoming.keys().filter(|k| !original.contains_key(*k)).count()
        );
    }

    /// Property: OVERRIDE returns exactly the incoming map
    #[test]
    fn prop_override_returns_incoming(original in kv_map(), incoming in kv_map()) {
        let merged = MapMergeStrategy::Override.merge(original, incoming.clone());
        prop_assert_eq!(merged, incoming);
    }

    /// Property: KEEP_ORIGINAL returns exactly the original map
    #[test]
    fn prop_keep_original_is_identity(original in kv_map(), incoming in kv_map()) {
        let merged = MapMergeStrategy::KeepOriginal.merge(original.clone(), incoming);
        prop_assert_eq!(merged, original);
    }

    /// Property: SUM adds amounts when units agree
    #[test]
    fn prop_ledger_sum_adds_amounts(
        original in single_lot_ledger("flour", "g"),
        incoming in single_lot_ledger("flour", "g"),
    ) {
        let unit = Unit::new("g").unwrap();
        let a = original.get("flour").unwrap().amount_in(&unit);
        let b = incoming.get("flour").unwrap().amount_in(&unit);

        let merged = LedgerMergeStrategy::Sum.merge(original, incoming).unwrap();
        prop_assert_eq!(merged.get("flour").unwrap().amount_in(&unit), a + b);
    }

    /// Property: SUM with unequal units is always an error, regardless of
    /// the amounts involved
    #[test]
    fn prop_ledger_sum_unit_mismatch_errors(
        original in single_lot_ledger("flour", "g"),
        incoming in single_lot_ledger("flour", "kg"),
    ) {
        prop_assert!(LedgerMergeStrategy::Sum.merge(original, incoming).is_err());
    }

    /// Property: SUM carries one-sided types over unchanged
    #[test]
    fn prop_ledger_sum_carries_one_sided_types(
        original in single_lot_ledger("flour", "g"),
        incoming in single_lot_ledger("sugar", "g"),
    ) {
        let unit = Unit::new("g").unwrap();
        let flour = original.get("flour").unwrap().amount_in(&unit);
        let sugar = incoming.get("sugar").unwrap().amount_in(&unit);

        let merged = LedgerMergeStrategy::Sum.merge(original, incoming).unwrap();
        prop_assert_eq!(merged.get("flour").unwrap().amount_in(&unit), flour);
        prop_assert_eq!(merged.get("sugar").unwrap().amount_in(&unit), sugar);
    }
}

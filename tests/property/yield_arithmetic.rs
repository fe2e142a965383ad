// Copyright (c) 2025 - Craftify, Inc.
//! Property-Based Tests for Yield Arithmetic
//!
//! The reduce-availability action implements a bottleneck computation:
//! `min(ceiling, floor(total / required))`. These properties pin the
//! arithmetic down for all amounts.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::json;

use craftify_recipes::actions::{ActionParameters, RecipeAction, ReduceAvailabilityAction};
use craftify_recipes::domain::{CallerScope, Product, Quantity, Unit};

fn flour_product(total: i64) -> Product {
    Product::builder("Flour bag", CallerScope::new("user-1").unwrap())
        .unwrap()
        .availability(
            "flour",
            Quantity::new(Decimal::from(total), Unit::new("g").unwrap()).unwrap(),
        )
        .unwrap()
        .build()
}

fn params(amount: i64) -> ActionParameters {
    let mut map = ActionParameters::new();
    map.insert("amount".to_string(), json!(amount));
    map.insert("unit".to_string(), json!("g"));
    map.insert("type".to_string(), json!("flour"));
    map
}

proptest! {
    /// Property: with total T > 0 and required R > 0, the yield is exactly
    /// floor(T / R)
    #[test]
    fn prop_yield_is_floor_division(total in 1i64..1_000_000, required in 1i64..1_000_000) {
        let action = ReduceAvailabilityAction;
        let products = vec![flour_product(total)];

        let result = action
            .calculate_yield(&products, &params(required), u64::MAX)
            .unwrap();
        prop_assert_eq!(result, (total / required) as u64);
    }

    /// Property: the yield never exceeds the passed-in ceiling
    #[test]
    fn prop_yield_never_exceeds_ceiling(
        total in 1i64..1_000_000,
        required in 1i64..1_000_000,
        ceiling in 0u64..1000,
    ) {
        let action = ReduceAvailabilityAction;
        let products = vec![flour_product(total)];

        let result = action
            .calculate_yield(&products, &params(required), ceiling)
            .unwrap();
        prop_assert!(result <= ceiling);
    }

    /// Property: chaining actions is monotonically non-increasing - feeding
    /// one action's result to the next as the ceiling can only lower it
    #[test]
    fn prop_yield_chain_is_monotone(
        total_a in 1i64..1_000_000,
        total_b in 1i64..1_000_000,
        required in 1i64..1_000,
    ) {
        let action = ReduceAvailabilityAction;

        let first = action
            .calculate_yield(&[flour_product(total_a)], &params(required), u64::MAX)
            .unwrap();
        let second = action
            .calculate_yield(&[flour_product(total_b)], &params(required), first)
            .unwrap();
        prop_assert!(second <= first);
    }

    /// Property: a zero required amount always fails, regardless of the
    /// available total
    #[test]
    fn prop_zero_required_always_fails(total in 1i64..1_000_000) {
        let action = ReduceAvailabilityAction;
        let err = action
            .calculate_yield(&[flour_product(total)], &params(0), u64::MAX)
            .unwrap_err();
        prop_assert!(err.issues.contains(&"Required amount cannot be zero.".to_string()));
    }

    /// Property: zero total availability always fails, regardless of the
    /// required amount
    #[test]
    fn prop_zero_availability_always_fails(required in 1i64..1_000_000) {
        let action = ReduceAvailabilityAction;
        let err = action
            .calculate_yield(&[flour_product(0)], &params(required), u64::MAX)
            .unwrap_err();
        prop_assert!(err
            .issues
            .contains(&"No availability for type: flour in required unit: g".to_string()));
    }

    /// Property: apply consumes exactly required × repeats and leaves the
    /// rest
    #[test]
    fn prop_apply_conserves_amounts(
        total in 1i64..1_000_000,
        required in 1i64..1_000,
        repeats in 1u64..10,
    ) {
        let action = ReduceAvailabilityAction;
        let consumed = required * repeats as i64;
        prop_assume!(consumed <= total);

        let products = vec![flour_product(total)];
        let updated = action.apply(&products, &params(required), repeats).unwrap();

        let unit = Unit::new("g").unwrap();
        let remaining = updated[0].availability.get("flour").unwrap().amount_in(&unit);
        prop_assert_eq!(remaining, Decimal::from(total - consumed));
    }
}

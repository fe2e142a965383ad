// Copyright (c) 2025 - Craftify, Inc.
//! Reduce Availability Action
//!
//! The built-in `"subtraction"` action: given a required `(type, unit,
//! amount)`, it determines how many whole recipe applications the combined
//! availability of the matched products supports, and on apply subtracts
//! the consumed amount from the contributing lots.
//!
//! Availability lots are only usable when their unit equals the required
//! unit; there is no conversion table, so any other unit is reported as a
//! conversion issue. All issues for the action are collected and surfaced
//! together.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::domain::{Product, Unit};

use super::{ActionParameters, ParameterError, RecipeAction, RecipeActionError};

/// Type string the reduce-availability action registers under
pub const REDUCE_AVAILABILITY_TYPE: &str = "subtraction";

/// Reduces product availability by a required amount per application
#[derive(Debug, Clone, Copy, Default)]
pub struct ReduceAvailabilityAction;

/// Parsed `"subtraction"` parameters
struct ReduceParameters {
    amount: Decimal,
    unit: Unit,
    availability_type: String,
}

fn parse_parameters(parameters: &ActionParameters) -> Result<ReduceParameters, ParameterError> {
    let amount = match parameters.get("amount") {
        None => return Err(ParameterError::Missing("amount")),
        Some(serde_json::Value::Number(number)) => Decimal::from_str(&number.to_string())
            .map_err(|_| ParameterError::Invalid {
                field: "amount",
                expected: "a number",
            })?,
        Some(_) => {
            return Err(ParameterError::Invalid {
                field: "amount",
                expected: "a number",
            })
        }
    };

    let unit = match parameters.get("unit") {
        None => return Err(ParameterError::Missing("unit")),
        Some(serde_json::Value::String(unit)) => {
            Unit::new(unit.as_str()).map_err(|_| ParameterError::Invalid {
                field: "unit",
                expected: "a non-empty string",
            })?
        }
        Some(_) => {
            return Err(ParameterError::Invalid {
                field: "unit",
                expected: "a non-empty string",
            })
        }
    };

    let availability_type = match parameters.get("type") {
        None => return Err(ParameterError::Missing("type")),
        Some(serde_json::Value::String(type_name)) if !type_name.trim().is_empty() => {
            type_name.clone()
        }
        Some(_) => {
            return Err(ParameterError::Invalid {
                field: "type",
                expected: "a non-empty string",
            })
        }
    };

    Ok(ReduceParameters {
        amount,
        unit,
        availability_type,
    })
}

impl ReduceAvailabilityAction {
    /// Sum the usable (matching-unit) availability across all products,
    /// collecting an issue for every missing entry and foreign-unit lot
    fn total_available(
        products: &[Product],
        params: &ReduceParameters,
        issues: &mut Vec<String>,
    ) -> Decimal {
        let mut total = Decimal::ZERO;
        for product in products {
            let Some(lots) = product.availability.get(&params.availability_type) else {
                issues.push(format!(
                    "No availability for type: {} in product: {} ({})",
                    params.availability_type, product.name, product.id
                ));
                continue;
            };
            for (unit, amount) in lots.iter() {
                if *unit == params.unit {
                    total += *amount;
                } else {
                    issues.push(format!(
                        "Cannot convert {} to {} for product: {} ({})",
                        unit, params.unit, product.name, product.id
                    ));
                }
            }
        }
        total
    }
}

impl RecipeAction for ReduceAvailabilityAction {
    fn action_type(&self) -> &str {
        REDUCE_AVAILABILITY_TYPE
    }

    fn validate_parameters(&self, parameters: &ActionParameters) -> Result<(), ParameterError> {
        let params = parse_parameters(parameters)?;
        if params.amount <= Decimal::ZERO {
            return Err(ParameterError::Invalid {
                field: "amount",
                expected: "a positive number",
            });
        }
        Ok(())
    }

    fn calculate_yield(
        &self,
        products: &[Product],
        parameters: &ActionParameters,
        ceiling: u64,
    ) -> Result<u64, RecipeActionError> {
        let params = parse_parameters(parameters)?;
        let mut issues = Vec::new();

        if params.amount.is_sign_negative() {
            issues.push(format!(
                "Required amount cannot be negative: {}",
                params.amount
            ));
        }

        let total = Self::total_available(products, &params, &mut issues);

        if total.is_zero() {
            issues.push(format!(
                "No availability for type: {} in required unit: {}",
                params.availability_type, params.unit
            ));
        }

        if params.amount.is_zero() {
            issues.push("Required amount cannot be zero.".to_string());
        }

        if !issues.is_empty() {
            return Err(RecipeActionError::new(issues));
        }

        let potential = (total / params.amount).floor().to_u64().unwrap_or(u64::MAX);
        Ok(ceiling.min(potential))
    }

    fn apply(
        &self,
        products: &[Product],
        parameters: &ActionParameters,
        repeats: u64,
    ) -> Result<Vec<Product>, RecipeActionError> {
        let params = parse_parameters(parameters)?;
        let mut issues = Vec::new();

        if params.amount.is_zero() {
            issues.push("Required amount cannot be zero.".to_string());
        } else if params.amount.is_sign_negative() {
            issues.push(format!(
                "Required amount cannot be negative: {}",
                params.amount
            ));
        }

        let total_required = params.amount * Decimal::from(repeats);
        let total_available = Self::total_available(products, &params, &mut issues);

        if issues.is_empty() && total_available < total_required {
            issues.push(format!(
                "Insufficient total availability across all products for type: {} in required unit: {}",
                params.availability_type, params.unit
            ));
        }

        if !issues.is_empty() {
            return Err(RecipeActionError::new(issues));
        }

        // Greedy consumption in candidate order; sufficiency was checked
        // against the same lots, so no lot goes negative.
        let mut remaining = total_required;
        let mut updated = Vec::new();
        for product in products {
            if remaining.is_zero() {
                break;
            }
            let available = product
                .availability
                .get(&params.availability_type)
                .map(|lots| lots.amount_in(&params.unit))
                .unwrap_or_default();
            let take = available.min(remaining);
            if take.is_zero() {
                continue;
            }

            let mut changed = product.clone();
            changed
                .availability
                .subtract(&params.availability_type, &params.unit, take)
                .map_err(|e| RecipeActionError::new(vec![e.to_string()]))?;
            changed.touch();
            updated.push(changed);
            remaining -= take;
        }

        Ok(updated)
    }
}

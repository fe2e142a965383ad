// Copyright (c) 2025 - Craftify, Inc.
//! Product Entity
//!
//! The resource the engine searches and consumes. A product carries named
//! attributes, tags, and categories for matching, plus two independent
//! quantity ledgers:
//!
//! - `measurements` - descriptive quantities (never consumed)
//! - `availability` - consumable quantities, reduced when a recipe is applied
//!
//! Products are created and destroyed outside this engine; during apply the
//! engine rewrites `availability` on value-semantic copies and hands the
//! result back to the store.
//!
//! # Invariants
//! - Non-empty name
//! - `version` increases by one on every successful store save
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use uuid::Uuid;

use super::ledger::Ledger;
use super::quantity::{Quantity, QuantityError};
use super::scope::CallerScope;

/// Product validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("Product name is empty")]
    EmptyName,

    #[error("Invalid ledger entry: {0}")]
    InvalidQuantity(#[from] QuantityError),
}

/// A searchable, consumable resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Immutable identity
    pub id: Uuid,

    /// Owning caller; all store queries are scoped to this
    pub owner: CallerScope,

    /// Display name, matched exactly by searches
    pub name: String,

    /// Free-form attribute key/value pairs
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub attributes: BTreeMap<String, String>,

    /// Tag key/value pairs
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub tags: BTreeMap<String, String>,

    /// Category labels
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub categories: BTreeSet<String>,

    /// Descriptive quantities
    #[serde(skip_serializing_if = "Ledger::is_empty", default)]
    pub measurements: Ledger,

    /// Consumable quantities
    #[serde(skip_serializing_if = "Ledger::is_empty", default)]
    pub availability: Ledger,

    /// Optimistic concurrency version, bumped by the store on save
    #[serde(default)]
    pub version: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a new product with validation
    pub fn new(name: impl Into<String>, owner: CallerScope) -> Result<Self, ProductError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProductError::EmptyName);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::now_v7(),
            owner,
            name,
            attributes: BTreeMap::new(),
            tags: BTreeMap::new(),
            categories: BTreeSet::new(),
            measurements: Ledger::new(),
            availability: Ledger::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Builder for fluent construction
    pub fn builder(
        name: impl Into<String>,
        owner: CallerScope,
    ) -> Result<ProductBuilder, ProductError> {
        Ok(ProductBuilder {
            product: Self::new(name, owner)?,
        })
    }

    /// Refresh the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Builder for [`Product`] with a fluent API
pub struct ProductBuilder {
    product: Product,
}

impl ProductBuilder {
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.product.attributes.insert(key.into(), value.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.product.tags.insert(key.into(), value.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.product.categories.insert(category.into());
        self
    }

    pub fn measurement(
        mut self,
        type_name: impl Into<String>,
        quantity: Quantity,
    ) -> Result<Self, ProductError> {
        self.product.measurements.add(type_name, quantity)?;
        Ok(self)
    }

    pub fn availability(
        mut self,
        type_name: impl Into<String>,
        quantity: Quantity,
    ) -> Result<Self, ProductError> {
        self.product.availability.add(type_name, quantity)?;
        Ok(self)
    }

    pub fn build(self) -> Product {
        self.product
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quantity::Unit;
    use rust_decimal::Decimal;

    fn scope() -> CallerScope {
        CallerScope::new("user-1").unwrap()
    }

    fn qty(amount: i64, unit: &str) -> Quantity {
        Quantity::new(Decimal::from(amount), Unit::new(unit).unwrap()).unwrap()
    }

    #[test]
    fn test_create_product() {
        let product = Product::new("Flour bag", scope()).unwrap();
        assert_eq!(product.name, "Flour bag");
        assert_eq!(product.version, 0);
        assert!(product.availability.is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(
            Product::new("  ", scope()).unwrap_err(),
            ProductError::EmptyName
        );
    }

    #[test]
    fn test_builder() {
        let product = Product::builder("Flour bag", scope())
            .unwrap()
            .attribute("brand", "Acme")
            .tag("grade", "fine")
            .category("baking")
            .availability("flour", qty(1000, "g"))
            .unwrap()
            .measurement("weight", qty(1050, "g"))
            .unwrap()
            .build();

        assert_eq!(product.attributes.get("brand"), Some(&"Acme".to_string()));
        assert!(product.categories.contains("baking"));
        assert_eq!(
            product
                .availability
                .get("flour")
                .unwrap()
                .amount_in(&Unit::new("g").unwrap()),
            Decimal::from(1000)
        );
    }
}

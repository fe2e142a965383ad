// Copyright (c) 2025 - Craftify, Inc.
//! Recipe Engine Domain Models
//!
//! Core domain concepts for the recipe application and yield engine:
//! quantity value objects with unit-checked arithmetic, the product entity
//! with its two quantity ledgers, search filters, and the recipe aggregate.
//!
//! # Value Objects with Invariants
//!
//! - [`Unit`] - non-empty unit label, equality-only conversion
//! - [`Quantity`] - exact decimal amount + unit
//! - [`CallerScope`] - opaque caller identity scoping every store call
//!
//! # Entities
//!
//! - [`Product`] - searchable resource with `measurements` and
//!   `availability` ledgers
//! - [`Recipe`] - ordered steps plus a resulting-product descriptor

pub mod ledger;
pub mod product;
pub mod quantity;
pub mod recipe;
pub mod scope;
pub mod search;

// Re-export value objects and entities
pub use ledger::{Ledger, QuantitySet};
pub use product::{Product, ProductBuilder, ProductError};
pub use quantity::{Quantity, QuantityError, Unit};
pub use recipe::{
    ActionSpec, Recipe, RecipeStep, RecipeValidationError, ResultMode, ResultingProduct,
};
pub use scope::{CallerScope, ScopeError};
pub use search::{ProductSearch, SearchError};

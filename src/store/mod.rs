// Copyright (c) 2025 - Craftify, Inc.
//! Store Abstractions
//!
//! The engine is a pure computation layer; persistence lives behind these
//! traits. Every call is scoped to the invoking caller, and store calls are
//! the engine's only suspension points.
//!
//! # Store Requirements
//!
//! 1. **Scoping**: a caller only ever sees its own products and recipes
//! 2. **Determinism**: search results come back in a stable order
//! 3. **Optimistic concurrency**: saving a product whose version does not
//!    match the stored one fails with [`StoreError::Conflict`] - the engine
//!    itself performs no locking, retry, or compare-and-swap

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{CallerScope, Product, ProductSearch, Recipe};

pub mod memory;

pub use memory::{InMemoryProductStore, InMemoryRecipeStore};

/// Store failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Optimistic concurrency check failed
    #[error("Version conflict: expected version {expected}, got {actual}")]
    Conflict { expected: u64, actual: u64 },

    /// Backend failure
    #[error("Store error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed product store with search
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Find a product by id within the caller's scope
    async fn find_by_id(&self, id: Uuid, scope: &CallerScope) -> StoreResult<Option<Product>>;

    /// All products in the caller's scope matching every filter criterion
    ///
    /// An empty result is valid, not an error. Results are ordered by id.
    async fn search(
        &self,
        filter: &ProductSearch,
        scope: &CallerScope,
    ) -> StoreResult<Vec<Product>>;

    /// Save a product, enforcing the version check
    ///
    /// Returns the saved product with its version bumped.
    async fn save(&self, product: Product) -> StoreResult<Product>;
}

/// Keyed recipe store
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Find a recipe by id within the caller's scope
    async fn find_by_id(&self, id: Uuid, scope: &CallerScope) -> StoreResult<Option<Recipe>>;

    /// All recipes in the caller's scope, ordered by id
    async fn list(&self, scope: &CallerScope) -> StoreResult<Vec<Recipe>>;

    /// Save a recipe
    async fn save(&self, recipe: Recipe) -> StoreResult<Recipe>;

    /// Delete a recipe within the caller's scope
    ///
    /// Returns whether a recipe was deleted.
    async fn delete(&self, id: Uuid, scope: &CallerScope) -> StoreResult<bool>;
}

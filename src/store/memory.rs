// Copyright (c) 2025 - Craftify, Inc.
//! In-Memory Store Adapters
//!
//! `RwLock`-guarded map stores used by tests and embedders. They implement
//! the full store contract: scope filtering, AND search semantics,
//! deterministic id-ordered results, and version-checked product saves.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{CallerScope, Product, ProductSearch, Recipe};

use super::{ProductStore, RecipeStore, StoreError, StoreResult};

/// In-memory product store
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<BTreeMap<Uuid, Product>>,
}

impl InMemoryProductStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with products, bypassing version checks
    pub async fn seed(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.products.write().await;
            for product in products {
                guard.insert(product.id, product);
            }
        }
        store
    }

    /// Number of stored products across all scopes
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_by_id(&self, id: Uuid, scope: &CallerScope) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products
            .get(&id)
            .filter(|product| product.owner == *scope)
            .cloned())
    }

    async fn search(
        &self,
        filter: &ProductSearch,
        scope: &CallerScope,
    ) -> StoreResult<Vec<Product>> {
        let products = self.products.read().await;
        let matches: Vec<Product> = products
            .values()
            .filter(|product| product.owner == *scope && filter.matches(product))
            .cloned()
            .collect();
        debug!(count = matches.len(), "product search");
        Ok(matches)
    }

    async fn save(&self, mut product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        if let Some(stored) = products.get(&product.id) {
            if stored.version != product.version {
                return Err(StoreError::Conflict {
                    expected: stored.version,
                    actual: product.version,
                });
            }
        }
        product.version += 1;
        products.insert(product.id, product.clone());
        debug!(id = %product.id, version = product.version, "product saved");
        Ok(product)
    }
}

/// In-memory recipe store
#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<BTreeMap<Uuid, Recipe>>,
}

impl InMemoryRecipeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with recipes
    pub async fn seed(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.recipes.write().await;
            for recipe in recipes {
                guard.insert(recipe.id, recipe);
            }
        }
        store
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find_by_id(&self, id: Uuid, scope: &CallerScope) -> StoreResult<Option<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .get(&id)
            .filter(|recipe| recipe.owner == *scope)
            .cloned())
    }

    async fn list(&self, scope: &CallerScope) -> StoreResult<Vec<Recipe>> {
        let recipes = self.recipes.read().await;
        Ok(recipes
            .values()
            .filter(|recipe| recipe.owner == *scope)
            .cloned()
            .collect())
    }

    async fn save(&self, recipe: Recipe) -> StoreResult<Recipe> {
        let mut recipes = self.recipes.write().await;
        recipes.insert(recipe.id, recipe.clone());
        debug!(id = %recipe.id, "recipe saved");
        Ok(recipe)
    }

    async fn delete(&self, id: Uuid, scope: &CallerScope) -> StoreResult<bool> {
        let mut recipes = self.recipes.write().await;
        match recipes.get(&id) {
            Some(recipe) if recipe.owner == *scope => {
                recipes.remove(&id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

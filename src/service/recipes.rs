// Copyright (c) 2025 - Craftify, Inc.
//! Recipe CRUD Pass-Through
//!
//! Scoped create/read/update/delete over the recipe store. Create and
//! update run full validation - structural invariants plus action types and
//! parameters checked against the registry - and fail before anything is
//! written, so the store only ever holds recipes the apply and yield
//! services can traverse.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::actions::ActionRegistry;
use crate::domain::{CallerScope, Recipe};
use crate::store::RecipeStore;

use super::{ServiceError, ServiceResult};

/// Scoped recipe CRUD operations
pub struct RecipeCrudService {
    recipe_store: Arc<dyn RecipeStore>,
    registry: Arc<ActionRegistry>,
}

impl RecipeCrudService {
    /// Create a new CRUD service
    pub fn new(recipe_store: Arc<dyn RecipeStore>, registry: Arc<ActionRegistry>) -> Self {
        Self {
            recipe_store,
            registry,
        }
    }

    /// Create a recipe owned by the caller
    pub async fn create(&self, mut recipe: Recipe, scope: &CallerScope) -> ServiceResult<Recipe> {
        recipe.owner = scope.clone();
        self.validate(&recipe)?;
        let saved = self.recipe_store.save(recipe).await?;
        info!(recipe_id = %saved.id, "recipe created");
        Ok(saved)
    }

    /// Fetch a recipe by id
    pub async fn get(&self, id: Uuid, scope: &CallerScope) -> ServiceResult<Recipe> {
        self.recipe_store
            .find_by_id(id, scope)
            .await?
            .ok_or(ServiceError::RecipeNotFound(id))
    }

    /// List the caller's recipes
    pub async fn list(&self, scope: &CallerScope) -> ServiceResult<Vec<Recipe>> {
        Ok(self.recipe_store.list(scope).await?)
    }

    /// Update an existing recipe
    pub async fn update(&self, mut recipe: Recipe, scope: &CallerScope) -> ServiceResult<Recipe> {
        // the recipe must already exist for this caller
        self.get(recipe.id, scope).await?;
        recipe.owner = scope.clone();
        self.validate(&recipe)?;
        recipe.touch();
        let saved = self.recipe_store.save(recipe).await?;
        info!(recipe_id = %saved.id, "recipe updated");
        Ok(saved)
    }

    /// Delete a recipe
    pub async fn delete(&self, id: Uuid, scope: &CallerScope) -> ServiceResult<()> {
        if !self.recipe_store.delete(id, scope).await? {
            return Err(ServiceError::RecipeNotFound(id));
        }
        info!(recipe_id = %id, "recipe deleted");
        Ok(())
    }

    /// Validate structure plus every action against the registry
    fn validate(&self, recipe: &Recipe) -> ServiceResult<()> {
        recipe
            .validate()
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        for (index, step) in recipe.steps.iter().enumerate() {
            for spec in &step.actions {
                let action = self.registry.resolve(&spec.action_type).ok_or_else(|| {
                    ServiceError::Validation(format!(
                        "Step {} ({}): no action registered for type: {}",
                        index, step.ingredient_name, spec.action_type
                    ))
                })?;
                action.validate_parameters(&spec.parameters).map_err(|e| {
                    ServiceError::Validation(format!(
                        "Step {} ({}), action '{}': {}",
                        index, step.ingredient_name, spec.action_type, e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

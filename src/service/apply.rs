// Copyright (c) 2025 - Craftify, Inc.
//! Recipe Apply Orchestrator
//!
//! Drives one recipe application to completion:
//!
//! ```text
//! LOOKUP_RECIPE → FOR EACH STEP { SEARCH → FOR EACH ACTION {
//!     RESOLVE → VALIDATE → APPLY } } → MERGE_RESULT → DONE
//! ```
//!
//! Per-step and per-action failures are recorded as issue strings and never
//! abort sibling steps, so the response enumerates every problem found in a
//! single pass. Actions hand back updated product copies; those accumulate
//! in a per-invocation working set that later steps observe. Nothing is
//! persisted unless the issue list ends up empty - a failed apply leaves
//! the resource pool untouched.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::actions::ActionRegistry;
use crate::domain::{CallerScope, Product, Recipe, ResultMode, ResultingProduct};
use crate::store::{ProductStore, RecipeStore};

use super::{EngineConfig, ServiceError, ServiceResult};

/// Outcome of one recipe application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResponse {
    /// Recipe that was applied
    pub recipe_id: Uuid,

    /// Every problem found during the pass; empty means the apply succeeded
    /// and was persisted
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Applies recipes against the product store
pub struct RecipeApplyService {
    recipe_store: Arc<dyn RecipeStore>,
    product_store: Arc<dyn ProductStore>,
    registry: Arc<ActionRegistry>,
    config: EngineConfig,
}

impl RecipeApplyService {
    /// Create a new apply service
    pub fn new(
        recipe_store: Arc<dyn RecipeStore>,
        product_store: Arc<dyn ProductStore>,
        registry: Arc<ActionRegistry>,
    ) -> Self {
        Self {
            recipe_store,
            product_store,
            registry,
            config: EngineConfig::default(),
        }
    }

    /// Override the engine configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Apply a recipe `amount` times for the given caller
    ///
    /// Returns the aggregated issue list; throws only for malformed input,
    /// a recipe (or update target) missing for this caller, or store/merge
    /// failures.
    pub async fn apply_recipe_by_id(
        &self,
        recipe_id: Uuid,
        amount: u64,
        scope: &CallerScope,
    ) -> ServiceResult<ApplyResponse> {
        if amount == 0 {
            return Err(ServiceError::Validation(
                "Apply amount must be greater than zero".to_string(),
            ));
        }

        let recipe = self
            .recipe_store
            .find_by_id(recipe_id, scope)
            .await?
            .ok_or(ServiceError::RecipeNotFound(recipe_id))?;

        let mut issues = Vec::new();
        // Working copies of every product an action has touched this
        // invocation, so later steps see earlier reductions.
        let mut working: BTreeMap<Uuid, Product> = BTreeMap::new();

        for step in &recipe.steps {
            if let Err(err) = step.product_search.validate() {
                issues.push(err.to_string());
                continue;
            }

            let matched = self
                .product_store
                .search(&step.product_search, scope)
                .await?;

            if matched.is_empty() {
                issues.push(format!(
                    "No matching products found for: {}",
                    step.ingredient_name
                ));
                continue;
            }

            for spec in &step.actions {
                let Some(action) = self.registry.resolve(&spec.action_type) else {
                    if self.config.unknown_action_is_error {
                        issues.push(format!(
                            "No action registered for type: {}",
                            spec.action_type
                        ));
                    }
                    continue;
                };

                if let Err(err) = action.validate_parameters(&spec.parameters) {
                    issues.push(err.to_string());
                    continue;
                }

                // Current view of the step's candidates, with any earlier
                // reductions overlaid.
                let view: Vec<Product> = matched
                    .iter()
                    .map(|p| working.get(&p.id).unwrap_or(p).clone())
                    .collect();

                match action.apply(&view, &spec.parameters, amount) {
                    Ok(updated) => {
                        for product in updated {
                            working.insert(product.id, product);
                        }
                    }
                    Err(err) => issues.extend(err.issues),
                }
            }
        }

        if !issues.is_empty() {
            debug!(recipe_id = %recipe_id, issues = issues.len(), "apply aborted with issues");
            return Ok(ApplyResponse { recipe_id, issues });
        }

        // MERGE_RESULT: build the resulting product before persisting
        // anything, so a merge failure discards the whole invocation.
        let result = self
            .build_resulting_product(&recipe, scope, &mut working)
            .await?;
        working.insert(result.id, result);

        for product in working.into_values() {
            self.product_store.save(product).await?;
        }

        info!(recipe_id = %recipe_id, applications = amount, "recipe applied");
        Ok(ApplyResponse {
            recipe_id,
            issues: Vec::new(),
        })
    }

    /// Build the product the recipe produces, honoring the write mode and
    /// the per-field merge strategies
    async fn build_resulting_product(
        &self,
        recipe: &Recipe,
        scope: &CallerScope,
        working: &mut BTreeMap<Uuid, Product>,
    ) -> ServiceResult<Product> {
        let descriptor = &recipe.resulting_product;
        match descriptor.mode {
            ResultMode::CreateNew => {
                let mut product = Product::new(descriptor.name.clone(), scope.clone())
                    .map_err(|e| ServiceError::Validation(e.to_string()))?;
                product.tags = descriptor.tags.clone();
                product.attributes = descriptor.attributes.clone();
                product.categories = descriptor.categories.clone();
                product.measurements = descriptor.measurements.clone();
                product.availability = descriptor.availability.clone();
                Ok(product)
            }
            ResultMode::UpdateExisting => {
                let id = descriptor.id.ok_or_else(|| {
                    ServiceError::Validation(
                        "Resulting product id is required for UPDATE_EXISTING mode".to_string(),
                    )
                })?;
                // Prefer the working copy: the target may itself have been
                // an ingredient this invocation.
                let existing = match working.remove(&id) {
                    Some(product) => product,
                    None => self
                        .product_store
                        .find_by_id(id, scope)
                        .await?
                        .ok_or(ServiceError::ProductNotFound(id))?,
                };
                let merged = merge_into(existing, descriptor)?;
                Ok(merged)
            }
        }
    }
}

/// Fold a resulting-product descriptor into an existing product, field by
/// field under each field's own strategy
fn merge_into(mut existing: Product, descriptor: &ResultingProduct) -> ServiceResult<Product> {
    existing.name = descriptor
        .name_merge_strategy
        .merge(existing.name, descriptor.name.clone());
    existing.tags = descriptor
        .tag_merge_strategy
        .merge(existing.tags, descriptor.tags.clone());
    existing.attributes = descriptor
        .attribute_merge_strategy
        .merge(existing.attributes, descriptor.attributes.clone());
    existing.categories = descriptor
        .category_merge_strategy
        .merge(existing.categories, descriptor.categories.clone());
    existing.measurements = descriptor
        .measurement_merge_strategy
        .merge(existing.measurements, descriptor.measurements.clone())?;
    existing.availability = descriptor
        .availability_merge_strategy
        .merge(existing.availability, descriptor.availability.clone())?;
    existing.touch();
    Ok(existing)
}

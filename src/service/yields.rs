// Copyright (c) 2025 - Craftify, Inc.
//! Yield Calculator
//!
//! Read-only twin of the apply orchestrator: walks the same steps and
//! actions but never touches a ledger, answering "how many times can this
//! recipe be applied right now". The yield starts unbounded and each
//! quantity-consuming action can only lower it - the binding constraint
//! determines the result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::actions::ActionRegistry;
use crate::domain::CallerScope;
use crate::store::{ProductStore, RecipeStore};

use super::{EngineConfig, ServiceError, ServiceResult};

/// Outcome of one yield calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldResponse {
    /// Recipe the yield was calculated for
    pub recipe_id: Uuid,

    /// Maximum number of whole applications the current resource levels
    /// support; `None` when the recipe has no quantity-consuming action and
    /// the yield is therefore not computable
    pub possible_products: Option<u64>,

    /// Every problem found during the pass
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Calculates recipe yields without mutating any ledger
pub struct RecipeYieldService {
    recipe_store: Arc<dyn RecipeStore>,
    product_store: Arc<dyn ProductStore>,
    registry: Arc<ActionRegistry>,
    config: EngineConfig,
}

impl RecipeYieldService {
    /// Create a new yield service
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

    /// Calculate the maximum feasible repeat count for a recipe
    ///
    /// Pure read: running this twice against an unmodified resource pool
    /// returns the same result both times.
    pub async fn calculate_yield_by_recipe_id(
        &self,
        recipe_id: Uuid,
        scope: &CallerScope,
    ) -> ServiceResult<YieldResponse> {
        let recipe = self
            .recipe_store
            .find_by_id(recipe_id, scope)
            .await?
            .ok_or(ServiceError::RecipeNotFound(recipe_id))?;

        let mut issues = Vec::new();
        let mut possible: Option<u64> = None;

        for step in &recipe.steps {
            if let Err(err) = step.product_search.validate() {
                issues.push(err.to_string());
                possible = Some(0);
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
                possible = Some(0);
                continue;
            }

            for spec in &step.actions {
                let Some(action) = self.registry.resolve(&spec.action_type) else {
                    if self.config.unknown_action_is_error {
                        issues.push(format!(
                            "No action registered for type: {}",
                            spec.action_type
                        ));
                        possible = Some(0);
                    }
                    continue;
                };

                if let Err(err) = action.validate_parameters(&spec.parameters) {
                    issues.push(err.to_string());
                    possible = Some(0);
                    continue;
                }

                let ceiling = possible.unwrap_or(u64::MAX);
                match action.calculate_yield(&matched, &spec.parameters, ceiling) {
                    Ok(limit) => possible = Some(limit),
                    Err(err) => {
                        issues.extend(err.issues);
                        possible = Some(0);
                    }
                }
            }
        }

        debug!(recipe_id = %recipe_id, possible = ?possible, issues = issues.len(), "yield calculated");
        Ok(YieldResponse {
            recipe_id,
            possible_products: possible,
            issues,
        })
    }
}

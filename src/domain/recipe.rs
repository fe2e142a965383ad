// Copyright (c) 2025 - Craftify, Inc.
//! Recipe Aggregate
//!
//! A recipe declares how searched products are transformed into a resulting
//! product: ordered steps, each pairing a product search with a list of
//! named actions, plus a resulting-product descriptor whose every field
//! carries its own merge strategy.
//!
//! # Invariants
//! - At least one step
//! - Every step names its ingredient and carries a valid search filter
//! - UPDATE_EXISTING mode requires a target product id

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use uuid::Uuid;

use super::ledger::Ledger;
use super::scope::CallerScope;
use super::search::{ProductSearch, SearchError};
use crate::merge::{LedgerMergeStrategy, MapMergeStrategy, NameMergeStrategy, SetMergeStrategy};

/// Recipe validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    #[error("Recipe must contain at least one step")]
    NoSteps,

    #[error("Step {step}: ingredient name is empty")]
    EmptyIngredientName { step: usize },

    #[error("Step {step} ({ingredient}): {source}")]
    InvalidSearch {
        step: usize,
        ingredient: String,
        #[source]
        source: SearchError,
    },

    #[error("Step {step} ({ingredient}): action type is empty")]
    EmptyActionType { step: usize, ingredient: String },

    #[error("Resulting product name is empty")]
    EmptyResultName,

    #[error("Resulting product id is required for UPDATE_EXISTING mode")]
    MissingResultId,
}

/// A named action invocation inside a recipe step
///
/// The type string selects a registered action implementation; the
/// parameters are interpreted by that implementation alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionSpec {
    /// Registered action type name (e.g. `"subtraction"`)
    #[serde(rename = "type")]
    pub action_type: String,

    /// Action-specific parameters
    #[serde(default)]
    pub parameters: serde_json::Map<String, Value>,
}

impl ActionSpec {
    /// Create an action spec
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            parameters: serde_json::Map::new(),
        }
    }

    /// Add a parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// One step of a recipe: which products to use and what to do with them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// Human-readable ingredient label, used in issue messages
    pub ingredient_name: String,

    /// Filter selecting the step's candidate products
    pub product_search: ProductSearch,

    /// Actions applied to the matched products, in order
    #[serde(default)]
    pub actions: Vec<ActionSpec>,
}

impl RecipeStep {
    /// Create a step
    pub fn new(ingredient_name: impl Into<String>, product_search: ProductSearch) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            product_search,
            actions: Vec::new(),
        }
    }

    /// Add an action
    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.actions.push(action);
        self
    }
}

/// How the resulting product is written back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultMode {
    /// Create a fresh product from the descriptor
    #[default]
    CreateNew,
    /// Merge the descriptor into an existing product, field by field
    UpdateExisting,
}

/// Descriptor of the product a recipe produces
///
/// Every field carries its own merge strategy so merges stay
/// field-independent and composable: one recipe can override the name, sum
/// availability, and append missing tags at the same time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultingProduct {
    /// Write mode
    #[serde(default)]
    pub mode: ResultMode,

    /// Target product id (UPDATE_EXISTING only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<Uuid>,

    pub name: String,
    #[serde(default)]
    pub name_merge_strategy: NameMergeStrategy,

    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub tag_merge_strategy: MapMergeStrategy,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub attribute_merge_strategy: MapMergeStrategy,

    #[serde(default)]
    pub measurements: Ledger,
    #[serde(default)]
    pub measurement_merge_strategy: LedgerMergeStrategy,

    #[serde(default)]
    pub availability: Ledger,
    #[serde(default = "default_availability_merge")]
    pub availability_merge_strategy: LedgerMergeStrategy,

    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub category_merge_strategy: SetMergeStrategy,
}

fn default_availability_merge() -> LedgerMergeStrategy {
    LedgerMergeStrategy::Sum
}

impl ResultingProduct {
    /// Descriptor that creates a new product with the given name
    pub fn create_new(name: impl Into<String>) -> Self {
        Self {
            mode: ResultMode::CreateNew,
            id: None,
            name: name.into(),
            name_merge_strategy: NameMergeStrategy::default(),
            tags: BTreeMap::new(),
            tag_merge_strategy: MapMergeStrategy::default(),
            attributes: BTreeMap::new(),
            attribute_merge_strategy: MapMergeStrategy::default(),
            measurements: Ledger::new(),
            measurement_merge_strategy: LedgerMergeStrategy::default(),
            availability: Ledger::new(),
            availability_merge_strategy: default_availability_merge(),
            categories: BTreeSet::new(),
            category_merge_strategy: SetMergeStrategy::default(),
        }
    }

    /// Descriptor that merges into an existing product
    pub fn update_existing(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            mode: ResultMode::UpdateExisting,
            id: Some(id),
            ..Self::create_new(name)
        }
    }
}

/// A declarative transformation of searched products into a resulting product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Immutable identity
    pub id: Uuid,

    /// Owning caller; all store queries are scoped to this
    pub owner: CallerScope,

    /// Ordered transformation steps
    pub steps: Vec<RecipeStep>,

    /// What the recipe produces
    pub resulting_product: ResultingProduct,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Create a recipe
    pub fn new(owner: CallerScope, steps: Vec<RecipeStep>, resulting_product: ResultingProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            owner,
            steps,
            resulting_product,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate structural invariants
    ///
    /// Action types are validated against the registry by the CRUD service;
    /// this checks everything that needs no collaborators.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.steps.is_empty() {
            return Err(RecipeValidationError::NoSteps);
        }

        for (index, step) in self.steps.iter().enumerate() {
            if step.ingredient_name.trim().is_empty() {
                return Err(RecipeValidationError::EmptyIngredientName { step: index });
            }
            step.product_search
                .validate()
                .map_err(|source| RecipeValidationError::InvalidSearch {
                    step: index,
                    ingredient: step.ingredient_name.clone(),
                    source,
                })?;
            for action in &step.actions {
                if action.action_type.trim().is_empty() {
                    return Err(RecipeValidationError::EmptyActionType {
                        step: index,
                        ingredient: step.ingredient_name.clone(),
                    });
                }
            }
        }

        if self.resulting_product.name.trim().is_empty() {
            return Err(RecipeValidationError::EmptyResultName);
        }

        if self.resulting_product.mode == ResultMode::UpdateExisting
            && self.resulting_product.id.is_none()
        {
            return Err(RecipeValidationError::MissingResultId);
        }

        Ok(())
    }

    /// Refresh the updated timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

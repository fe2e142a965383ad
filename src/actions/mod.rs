// Copyright (c) 2025 - Craftify, Inc.
//! Recipe Actions
//!
//! An action is a named, pluggable quantitative operation applied to the
//! products a recipe step matched. Implementations are registered in an
//! [`ActionRegistry`] under their type string and resolved per action at
//! apply time, so new variants plug in without touching the orchestrator.
//!
//! # Action Contract
//!
//! ```text
//! validate_parameters(params)                 → Ok | ParameterError
//! calculate_yield(products, params, ceiling)  → min(ceiling, ⌊total/required⌋)
//! apply(products, params, repeats)            → updated product copies
//! ```
//!
//! Yield computation and apply aggregate every problem they find into one
//! [`RecipeActionError`] instead of failing fast: a step's full diagnosis
//! surfaces in a single pass. `apply` never mutates its inputs - it returns
//! the changed products as value-semantic copies and the orchestrator
//! decides whether to persist them.

mod reduce_availability;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::domain::Product;

pub use reduce_availability::{ReduceAvailabilityAction, REDUCE_AVAILABILITY_TYPE};

/// Action parameters as supplied by the recipe
pub type ActionParameters = serde_json::Map<String, serde_json::Value>;

/// Parameter validation error, naming the offending field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("Parameter '{field}' must be {expected}")]
    Invalid {
        field: &'static str,
        expected: &'static str,
    },
}

/// Aggregated action failure
///
/// Carries every issue found while computing or applying an action; the
/// orchestrator folds the list into the response instead of aborting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", .issues.join("; "))]
pub struct RecipeActionError {
    pub issues: Vec<String>,
}

impl RecipeActionError {
    pub fn new(issues: Vec<String>) -> Self {
        Self { issues }
    }
}

impl From<ParameterError> for RecipeActionError {
    fn from(err: ParameterError) -> Self {
        Self::new(vec![err.to_string()])
    }
}

/// A pluggable quantitative operation over matched products
pub trait RecipeAction: Send + Sync {
    /// Type string this action registers under
    fn action_type(&self) -> &str;

    /// Validate the parameters a recipe supplies for this action
    fn validate_parameters(&self, parameters: &ActionParameters) -> Result<(), ParameterError>;

    /// Compute the limiting yield across the matched products
    ///
    /// Returns `min(ceiling, yield)` so the overall recipe yield is
    /// monotonically non-increasing across actions: the binding constraint
    /// determines the final yield.
    fn calculate_yield(
        &self,
        products: &[Product],
        parameters: &ActionParameters,
        ceiling: u64,
    ) -> Result<u64, RecipeActionError>;

    /// Apply the action `repeats` times, returning updated product copies
    ///
    /// Inputs are never mutated; only products whose ledgers changed are
    /// returned.
    fn apply(
        &self,
        products: &[Product],
        parameters: &ActionParameters,
        repeats: u64,
    ) -> Result<Vec<Product>, RecipeActionError>;
}

/// Registry of action implementations, keyed by type string
///
/// Built once at startup; `Default` registers the built-in
/// reduce-availability action.
#[derive(Clone)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn RecipeAction>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    /// Register an action under its type string
    ///
    /// A later registration replaces an earlier one for the same type.
    pub fn register(&mut self, action: Arc<dyn RecipeAction>) {
        self.actions.insert(action.action_type().to_string(), action);
    }

    /// Resolve an action by type string
    pub fn resolve(&self, action_type: &str) -> Option<Arc<dyn RecipeAction>> {
        self.actions.get(action_type).cloned()
    }

    /// Registered type strings, sorted
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Number of registered actions
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check whether no actions are registered
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(ReduceAvailabilityAction));
        registry
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("types", &self.types())
            .finish()
    }
}

// Copyright (c) 2025 - Craftify, Inc.
//! Recipe Engine Services
//!
//! The engine's exposed operations:
//!
//! - [`RecipeApplyService`] - apply a recipe: search, act, merge, persist
//! - [`RecipeYieldService`] - dry-run "how many can I make" calculation
//! - [`RecipeCrudService`] - scoped recipe CRUD pass-through
//!
//! # Error Policy
//!
//! Per-step and per-action failures never abort an apply or yield run: they
//! accumulate into the response's `issues` list so one pass enumerates every
//! problem. Only malformed input (validation), a recipe or product missing
//! for the caller's scope, and store/merge failures are hard errors.

use thiserror::Error;
use uuid::Uuid;

use crate::merge::MergeError;
use crate::store::StoreError;

pub mod apply;
pub mod recipes;
pub mod yields;

pub use apply::{ApplyResponse, RecipeApplyService};
pub use recipes::RecipeCrudService;
pub use yields::{RecipeYieldService, YieldResponse};

/// Service layer result type
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service layer errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed recipe, action, or search input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Recipe absent for the given id and caller scope
    #[error("Recipe not found: {0}")]
    RecipeNotFound(Uuid),

    /// Product absent for the given id and caller scope
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Resulting-product merge failure
    #[error(transparent)]
    Merge(#[from] MergeError),
}

/// Engine behavior toggles
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Record an issue when a recipe names an action type with no
    /// registered implementation (instead of silently skipping it)
    pub unknown_action_is_error: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unknown_action_is_error: true,
        }
    }
}

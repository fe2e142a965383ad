//! Recipe application and yield engine for Craftify
//!
//! Takes a declarative recipe - a transformation of named, searchable
//! products into a resulting product - and:
//!
//! - locates matching products through a caller-scoped store,
//! - applies quantitative actions against their availability ledgers with
//!   unit-aware arithmetic and full error aggregation,
//! - computes how many times the recipe can be applied given current
//!   resource levels (the yield), and
//! - merges the resulting-product description under per-field,
//!   independently configurable merge strategies.
//!
//! Persistence, identity, and transport are external collaborators behind
//! the traits in [`store`]; the engine itself is a pure computation layer
//! invoked with already-deserialized domain objects.

pub mod actions;
pub mod domain;
pub mod merge;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use actions::{ActionRegistry, RecipeAction, RecipeActionError};
pub use domain::{
    CallerScope, Ledger, Product, ProductSearch, Quantity, Recipe, RecipeStep, ResultingProduct,
    Unit,
};
pub use service::{
    ApplyResponse, EngineConfig, RecipeApplyService, RecipeCrudService, RecipeYieldService,
    ServiceError, ServiceResult, YieldResponse,
};
pub use store::{ProductStore, RecipeStore, StoreError, StoreResult};

// Copyright (c) 2025 - Craftify, Inc.
//! Test Fixtures for craftify-recipes
//!
//! Builders for products, recipes, and a fully wired engine over the
//! in-memory stores. Integration tests use these instead of constructing
//! domain objects by hand.

// each test binary uses its own subset of the fixtures
#![allow(dead_code)]

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;

use craftify_recipes::actions::{ActionRegistry, REDUCE_AVAILABILITY_TYPE};
use craftify_recipes::domain::{
    ActionSpec, CallerScope, Product, ProductSearch, Quantity, Recipe, RecipeStep,
    ResultingProduct, Unit,
};
use craftify_recipes::service::{RecipeApplyService, RecipeCrudService, RecipeYieldService};
use craftify_recipes::store::{InMemoryProductStore, InMemoryRecipeStore};

/// Initialize test logging once; respects `RUST_LOG`
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Default caller scope for tests
pub fn scope() -> CallerScope {
    CallerScope::new("user-1").unwrap()
}

/// A different caller, for scope isolation tests
pub fn other_scope() -> CallerScope {
    CallerScope::new("user-2").unwrap()
}

pub fn unit(u: &str) -> Unit {
    Unit::new(u).unwrap()
}

pub fn quantity(amount: i64, u: &str) -> Quantity {
    Quantity::new(Decimal::from(amount), unit(u)).unwrap()
}

/// A product holding availability lots, owned by the default scope
pub fn product_with_availability(name: &str, lots: &[(&str, i64, &str)]) -> Product {
    let mut builder = Product::builder(name, scope()).unwrap();
    for (type_name, amount, u) in lots {
        builder = builder
            .availability(*type_name, quantity(*amount, u))
            .unwrap();
    }
    builder.build()
}

/// A `"subtraction"` action spec
pub fn subtraction(amount: i64, u: &str, type_name: &str) -> ActionSpec {
    ActionSpec::new(REDUCE_AVAILABILITY_TYPE)
        .with_parameter("amount", json!(amount))
        .with_parameter("unit", json!(u))
        .with_parameter("type", json!(type_name))
}

/// A step searching by product name with one subtraction action
pub fn subtraction_step(
    ingredient: &str,
    product_name: &str,
    amount: i64,
    u: &str,
    type_name: &str,
) -> RecipeStep {
    RecipeStep::new(ingredient, ProductSearch::by_name(product_name))
        .with_action(subtraction(amount, u, type_name))
}

/// A recipe owned by the default scope
pub fn recipe(steps: Vec<RecipeStep>, resulting_product: ResultingProduct) -> Recipe {
    Recipe::new(scope(), steps, resulting_product)
}

/// Fully wired engine over in-memory stores
pub struct Engine {
    pub product_store: Arc<InMemoryProductStore>,
    pub recipe_store: Arc<InMemoryRecipeStore>,
    pub apply: RecipeApplyService,
    pub yields: RecipeYieldService,
    pub crud: RecipeCrudService,
}

/// Wire up the engine with seeded products and recipes
pub async fn engine(
    products: impl IntoIterator<Item = Product>,
    recipes: impl IntoIterator<Item = Recipe>,
) -> Engine {
    init_tracing();
    let product_store = Arc::new(InMemoryProductStore::seed(products).await);
    let recipe_store = Arc::new(InMemoryRecipeStore::seed(recipes).await);
    let registry = Arc::new(ActionRegistry::default());

    Engine {
        apply: RecipeApplyService::new(
            recipe_store.clone(),
            product_store.clone(),
            registry.clone(),
        ),
        yields: RecipeYieldService::new(
            recipe_store.clone(),
            product_store.clone(),
            registry.clone(),
        ),
        crud: RecipeCrudService::new(recipe_store.clone(), registry),
        product_store,
        recipe_store,
    }
}

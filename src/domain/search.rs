// Copyright (c) 2025 - Craftify, Inc.
//! Product Search Filter
//!
//! A search matches products on ALL provided criteria: exact name equality,
//! every attribute key/value pair, and every tag key/value pair. Categories
//! match when the product's category set intersects the requested set. A
//! filter with no name, no attributes, and no tags matches everything and is
//! therefore rejected as invalid.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use super::product::Product;

/// Search filter validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Search filter must contain productName or non-empty attributes or non-empty tags")]
    MissingCriteria,
}

/// Filter over the product store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSearch {
    /// Exact product name to match
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,

    /// Attribute key/value pairs, all of which must match
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub attributes: BTreeMap<String, String>,

    /// Tag key/value pairs, all of which must match
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub tags: BTreeMap<String, String>,

    /// Categories; a product matches when it carries at least one of them
    #[serde(skip_serializing_if = "BTreeSet::is_empty", default)]
    pub categories: BTreeSet<String>,
}

impl ProductSearch {
    /// Filter by exact name
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Add an attribute criterion
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Add a tag criterion
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Add a category criterion
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Validate the filter
    ///
    /// # Invariants
    /// - At least one of name, attributes, or tags is provided
    pub fn validate(&self) -> Result<(), SearchError> {
        let has_name = self.name.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !has_name && self.attributes.is_empty() && self.tags.is_empty() {
            return Err(SearchError::MissingCriteria);
        }
        Ok(())
    }

    /// Check whether a product satisfies every provided criterion
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = self.name.as_deref() {
            if !name.trim().is_empty() && product.name != name {
                return false;
            }
        }

        for (key, value) in &self.attributes {
            if product.attributes.get(key) != Some(value) {
                return false;
            }
        }

        for (key, value) in &self.tags {
            if product.tags.get(key) != Some(value) {
                return false;
            }
        }

        if !self.categories.is_empty()
            && self.categories.is_disjoint(&product.categories)
        {
            return false;
        }

        true
    }
}

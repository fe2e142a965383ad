// Copyright (c) 2025 - Craftify, Inc.
//! Merge strategy enums and their pure merge functions

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::domain::{Ledger, QuantityError};

/// Merge failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// SUM over a quantity type whose two sides hold different units
    #[error("Cannot sum '{type_name}': {source}")]
    Sum {
        type_name: String,
        #[source]
        source: QuantityError,
    },
}

/// Strategy for the resulting product's name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NameMergeStrategy {
    KeepOriginal,
    #[default]
    Override,
}

impl NameMergeStrategy {
    /// Merge two names
    pub fn merge(&self, original: String, incoming: String) -> String {
        match self {
            Self::KeepOriginal => original,
            Self::Override => incoming,
        }
    }
}

/// Strategy for key/value map fields (tags, attributes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MapMergeStrategy {
    KeepOriginal,
    Override,
    #[default]
    AppendMissing,
}

impl MapMergeStrategy {
    /// Merge two key/value maps
    pub fn merge(
        &self,
        original: BTreeMap<String, String>,
        incoming: BTreeMap<String, String>,
    ) -> BTreeMap<String, String> {
        match self {
            Self::KeepOriginal => original,
            Self::Override => incoming,
            Self::AppendMissing => {
                let mut merged = original;
                for (key, value) in incoming {
                    merged.entry(key).or_insert(value);
                }
                merged
            }
        }
    }
}

/// Strategy for set fields (categories)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetMergeStrategy {
    KeepOriginal,
    Override,
    #[default]
    AppendMissing,
}

impl SetMergeStrategy {
    /// Merge two sets
    pub fn merge(&self, original: BTreeSet<String>, incoming: BTreeSet<String>) -> BTreeSet<String> {
        match self {
            Self::KeepOriginal => original,
            Self::Override => incoming,
            Self::AppendMissing => {
                let mut merged = original;
                merged.extend(incoming);
                merged
            }
        }
    }
}

/// Strategy for quantity ledger fields (measurements, availability)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerMergeStrategy {
    KeepOriginal,
    Override,
    #[default]
    AppendMissing,
    Sum,
}

impl LedgerMergeStrategy {
    /// Merge two ledgers
    ///
    /// `Sum` adds amounts per quantity type. A type present on both sides
    /// must hold exactly the same units; otherwise the merge fails.
    pub fn merge(&self, original: Ledger, incoming: Ledger) -> Result<Ledger, MergeError> {
        match self {
            Self::KeepOriginal => Ok(original),
            Self::Override => Ok(incoming),
            Self::AppendMissing => {
                let mut merged = original;
                for (type_name, lots) in incoming {
                    if !merged.contains(&type_name) {
                        merged.insert(type_name, lots);
                    }
                }
                Ok(merged)
            }
            Self::Sum => {
                let mut merged = original;
                for (type_name, lots) in incoming {
                    match merged.remove(&type_name) {
                        None => merged.insert(type_name, lots),
                        Some(existing) => {
                            let summed =
                                existing.checked_sum(lots).map_err(|source| MergeError::Sum {
                                    type_name: type_name.clone(),
                                    source,
                                })?;
                            merged.insert(type_name, summed);
                        }
                    }
                }
                Ok(merged)
            }
        }
    }
}

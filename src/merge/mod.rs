// Copyright (c) 2025 - Craftify, Inc.
//! Field-Level Merge Strategies
//!
//! When a recipe's resulting product is folded into an existing product,
//! every field is merged under its own independently configured strategy,
//! so one recipe can override the name, sum availability, and append
//! missing tags all at once.
//!
//! # Strategy semantics
//!
//! - `KeepOriginal` - ignore the incoming value, return the original
//! - `Override` - return the incoming value, discarding the original
//! - `AppendMissing` - union; the original's entries win on conflict
//! - `Sum` (ledger fields only) - add amounts per quantity type; a type
//!   present on both sides must hold identical unit sets, otherwise the
//!   merge fails rather than silently coercing units
//!
//! All merges are pure: they consume both sides and return a fresh value.

mod strategies;

pub use strategies::{
    LedgerMergeStrategy, MapMergeStrategy, MergeError, NameMergeStrategy, SetMergeStrategy,
};

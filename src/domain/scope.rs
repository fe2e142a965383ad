// Copyright (c) 2025 - Craftify, Inc.
//! Caller Scope Value Object
//!
//! Every store call is restricted to the invoking principal's data. The
//! scope is an opaque identity string supplied by the identity layer; the
//! engine never inspects its contents beyond requiring it to be non-empty.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Caller scope validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("Caller scope is empty")]
    Empty,
}

/// Opaque caller identity used to scope all store queries
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerScope(String);

impl CallerScope {
    /// Create a new caller scope
    ///
    /// # Invariants
    /// - Non-empty after trimming
    pub fn new(scope: impl Into<String>) -> Result<Self, ScopeError> {
        let scope = scope.into();
        if scope.trim().is_empty() {
            return Err(ScopeError::Empty);
        }
        Ok(Self(scope))
    }

    /// Get the scope as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CallerScope {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CallerScope {
    type Error = ScopeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CallerScope {
    type Error = ScopeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

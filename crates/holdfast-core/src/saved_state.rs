//! Saved-state carrier.
//!
//! A host that may be torn down and recreated writes identifying state here
//! before teardown and hands the carrier back to the recreated instance. Only
//! string keys and string values are supported; anything richer belongs to
//! the host platform, not this library.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// String-keyed state that survives host recreation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedState {
    values: BTreeMap<String, String>,
}

impl SavedState {
    /// Create an empty carrier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, replacing any previous value under the same key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.values.insert(key.into(), value.into());
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Whether a value is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the carrier holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

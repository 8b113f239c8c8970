//! In-memory key/value store with an optional byte quota.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::ports::{KeyValueError, KeyValueResult, KeyValueStore};

/// Thread-safe in-memory key/value store.
///
/// Clones share the same underlying map, so a test can keep a handle to
/// inspect what an adapter wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty, unlimited store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that refuses writes once keys and values
    /// together would exceed `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            state: Arc::default(),
            quota: Some(limit),
        }
    }

    /// Returns the number of bytes held by keys and values.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::Backend`] when the lock is poisoned.
    pub fn used_bytes(&self) -> KeyValueResult<usize> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(used_bytes_except(&state, None))
    }
}

fn poisoned<E: std::fmt::Display>(err: E) -> KeyValueError {
    KeyValueError::backend(std::io::Error::other(err.to_string()))
}

/// Sums key and value lengths, skipping `excluded` when given.
fn used_bytes_except(state: &HashMap<String, String>, excluded: Option<&str>) -> usize {
    state
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != excluded)
        .map(|(key, value)| key.len().saturating_add(value.len()))
        .sum()
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> KeyValueResult<Option<String>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(limit) = self.quota {
            let required = used_bytes_except(&state, Some(key))
                .saturating_add(key.len())
                .saturating_add(value.len());
            if required > limit {
                return Err(KeyValueError::QuotaExceeded {
                    key: key.to_owned(),
                    required,
                    limit,
                });
            }
        }
        state.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> KeyValueResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.remove(key);
        Ok(())
    }
}

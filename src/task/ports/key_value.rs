//! Port for raw local key/value storage.

use std::sync::Arc;
use thiserror::Error;

/// Result type for key/value storage operations.
pub type KeyValueResult<T> = Result<T, KeyValueError>;

/// String-keyed, string-valued local storage.
///
/// Every `set` overwrites the whole value stored under the key.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `None` when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] when the backend cannot be read.
    fn get(&self, key: &str) -> KeyValueResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError::QuotaExceeded`] when the write would exceed
    /// the storage quota, or another [`KeyValueError`] on backend failure.
    fn set(&self, key: &str, value: &str) -> KeyValueResult<()>;

    /// Deletes the value stored under `key`; missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueError`] on backend failure.
    fn remove(&self, key: &str) -> KeyValueResult<()>;
}

/// Errors returned by key/value storage implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueError {
    /// Writing the value would exceed the storage quota.
    #[error("storage quota exceeded writing '{key}': {required} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the store would hold after the write.
        required: usize,
        /// Configured quota in bytes.
        limit: usize,
    },

    /// The key cannot be represented by the backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend-level failure.
    #[error("storage backend error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

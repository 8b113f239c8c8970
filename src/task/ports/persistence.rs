//! Port for mirroring the task collection and role flag to storage.

use super::KeyValueError;
use crate::task::domain::{Role, Task};
use thiserror::Error;

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence adapter contract.
///
/// Reads never fail: anything missing or unreadable degrades to "no saved
/// state". Writes report failure to the caller instead of aborting, and the
/// in-memory state stays authoritative either way.
pub trait TaskPersistence: Send + Sync {
    /// Reads the saved collection.
    ///
    /// Returns `None` when nothing is stored, or when the stored value is not
    /// a non-empty sequence of task records.
    fn load(&self) -> Option<Vec<Task>>;

    /// Overwrites the saved collection with `tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the collection cannot be serialized
    /// or the storage write fails.
    fn save(&self, tasks: &[Task]) -> PersistenceResult<()>;

    /// Reads the saved role flag, defaulting to [`Role::Worker`].
    fn load_role(&self) -> Role;

    /// Overwrites the saved role flag.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the storage write fails.
    fn save_role(&self, role: Role) -> PersistenceResult<()>;
}

/// Errors returned by persistence adapters.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// The collection could not be serialized.
    #[error("failed to serialize task collection: {0}")]
    Serialization(String),

    /// The underlying storage rejected the write.
    #[error(transparent)]
    Storage(#[from] KeyValueError),
}

impl PersistenceError {
    /// Returns `true` when the failure is the storage quota being exhausted.
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Storage(KeyValueError::QuotaExceeded { .. }))
    }
}

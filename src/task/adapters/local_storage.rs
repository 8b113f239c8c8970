//! JSON persistence adapter over a key/value store.
//!
//! The whole collection lives under one key as a JSON array and the role
//! flag under another as a bare string. Every save is a full overwrite;
//! there is no schema version, so any stored value that does not parse as a
//! non-empty array of task records is treated as absent.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::task::{
    domain::{Role, Task},
    ports::{KeyValueStore, PersistenceError, PersistenceResult, TaskPersistence},
};

/// Default key holding the serialized task collection.
pub const DEFAULT_TASKS_KEY: &str = "fieldwork_tasks_v1";

/// Default key holding the active role flag.
pub const DEFAULT_ROLE_KEY: &str = "fieldwork_role";

/// Storage keys used by [`LocalStoragePersistence`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    tasks: String,
    role: String,
}

impl StorageKeys {
    /// Creates a key set.
    #[must_use]
    pub fn new(tasks: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            tasks: tasks.into(),
            role: role.into(),
        }
    }

    /// Returns the key holding the task collection.
    #[must_use]
    pub fn tasks(&self) -> &str {
        &self.tasks
    }

    /// Returns the key holding the role flag.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_TASKS_KEY, DEFAULT_ROLE_KEY)
    }
}

/// [`TaskPersistence`] implementation writing JSON into a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct LocalStoragePersistence<S>
where
    S: KeyValueStore,
{
    store: Arc<S>,
    keys: StorageKeys,
}

impl<S> LocalStoragePersistence<S>
where
    S: KeyValueStore,
{
    /// Creates an adapter using the default storage keys.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    /// Creates an adapter using custom storage keys.
    #[must_use]
    pub const fn with_keys(store: Arc<S>, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    /// Returns the storage keys in use.
    #[must_use]
    pub const fn keys(&self) -> &StorageKeys {
        &self.keys
    }
}

/// Parses a stored collection, treating anything unusable as absent.
fn parse_collection(raw: &str) -> Option<Vec<Task>> {
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) if tasks.is_empty() => {
            debug!("stored task collection is empty");
            None
        }
        Ok(tasks) => Some(tasks),
        Err(err) => {
            warn!(error = %err, "stored task collection is corrupt; ignoring it");
            None
        }
    }
}

impl<S> TaskPersistence for LocalStoragePersistence<S>
where
    S: KeyValueStore,
{
    fn load(&self) -> Option<Vec<Task>> {
        match self.store.get(self.keys.tasks()) {
            Ok(Some(raw)) => parse_collection(&raw),
            Ok(None) => {
                debug!(key = self.keys.tasks(), "no stored task collection");
                None
            }
            Err(err) => {
                warn!(error = %err, "failed to read stored task collection");
                None
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> PersistenceResult<()> {
        let serialized = serde_json::to_string(tasks)
            .map_err(|err| PersistenceError::Serialization(err.to_string()))?;
        self.store.set(self.keys.tasks(), &serialized)?;
        Ok(())
    }

    fn load_role(&self) -> Role {
        match self.store.get(self.keys.role()) {
            Ok(Some(raw)) => Role::try_from(raw.as_str()).unwrap_or_else(|err| {
                debug!(error = %err, "stored role is unrecognized; using default");
                Role::default()
            }),
            Ok(None) => Role::default(),
            Err(err) => {
                warn!(error = %err, "failed to read stored role");
                Role::default()
            }
        }
    }

    fn save_role(&self, role: Role) -> PersistenceResult<()> {
        self.store.set(self.keys.role(), role.as_str())?;
        Ok(())
    }
}

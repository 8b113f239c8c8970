//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use fieldwork::task::{
    adapters::{local_storage::LocalStoragePersistence, memory::InMemoryKeyValueStore},
    domain::{IntakeForm, NewTask, Priority},
    ports::KeyValueStore,
    services::{TaskStore, TaskStoreSettings},
};
use mockable::DefaultClock;

/// Persistence adapter over shared in-memory storage.
pub type MemoryPersistence = LocalStoragePersistence<InMemoryKeyValueStore>;

/// Task store used by in-memory integration tests.
pub type TestStore = TaskStore<MemoryPersistence, DefaultClock>;

/// Builds a store over `storage` with default settings.
pub fn store_over(storage: &Arc<InMemoryKeyValueStore>) -> TestStore {
    TaskStore::hydrate(
        Arc::new(LocalStoragePersistence::new(Arc::clone(storage))),
        Arc::new(DefaultClock),
        TaskStoreSettings::default(),
    )
}

/// Validated intake for a typical fault report.
///
/// # Errors
///
/// Returns an error if the intake form fails validation.
pub fn intake(title: &str, priority: Priority) -> Result<NewTask, eyre::Report> {
    Ok(
        IntakeForm::new(title, "Reported by phone", "Main St 1", "Jane")
            .with_priority(priority)
            .validate()?,
    )
}

/// Reads the raw JSON stored under the default tasks key.
///
/// # Errors
///
/// Returns an error if the storage read fails.
pub fn stored_json(storage: &InMemoryKeyValueStore) -> Result<serde_json::Value, eyre::Report> {
    let raw = storage
        .get("fieldwork_tasks_v1")?
        .ok_or_else(|| eyre::eyre!("nothing stored under the tasks key"))?;
    Ok(serde_json::from_str(&raw)?)
}

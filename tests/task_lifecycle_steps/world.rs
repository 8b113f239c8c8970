//! Shared world state for work order lifecycle BDD scenarios.

use std::sync::Arc;

use fieldwork::task::{
    adapters::{local_storage::LocalStoragePersistence, memory::InMemoryKeyValueStore},
    domain::{Task, TaskDomainError},
    services::{TaskLifecycleError, TaskStore, TaskStoreSettings},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestTaskStore = TaskStore<LocalStoragePersistence<InMemoryKeyValueStore>, DefaultClock>;

/// Scenario world for lifecycle behaviour tests.
pub struct LifecycleWorld {
    pub storage: Arc<InMemoryKeyValueStore>,
    pub store: TestTaskStore,
    pub stored_at_start: Option<String>,
    pub last_task: Option<Task>,
    pub last_intake_error: Option<TaskDomainError>,
    pub last_update_result: Option<Result<Option<Task>, TaskLifecycleError>>,
}

impl LifecycleWorld {
    /// Creates a world over fresh in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        let storage = Arc::new(InMemoryKeyValueStore::new());
        let store = TaskStore::hydrate(
            Arc::new(LocalStoragePersistence::new(Arc::clone(&storage))),
            Arc::new(DefaultClock),
            TaskStoreSettings::default(),
        );
        let stored_at_start = read_tasks(&storage);

        Self {
            storage,
            store,
            stored_at_start,
            last_task: None,
            last_intake_error: None,
            last_update_result: None,
        }
    }

    /// Returns the task the scenario is working on.
    pub fn current_task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for LifecycleWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the raw stored task collection.
pub fn read_tasks(storage: &InMemoryKeyValueStore) -> Option<String> {
    use fieldwork::task::ports::KeyValueStore as _;
    storage.get("fieldwork_tasks_v1").ok().flatten()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

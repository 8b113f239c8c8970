//! In-memory integration tests for the task store.

use std::sync::Arc;

use super::helpers::{TestStore, intake, store_over, stored_json};
use fieldwork::task::{
    adapters::memory::InMemoryKeyValueStore,
    domain::{CompletionReport, Priority, SEED_TASK_ID, TaskStatus},
    services::HydrationSource,
};
use rstest::{fixture, rstest};

#[fixture]
fn storage() -> Arc<InMemoryKeyValueStore> {
    Arc::new(InMemoryKeyValueStore::new())
}

#[rstest]
fn stored_document_uses_camel_case_and_snake_case_statuses(
    storage: Arc<InMemoryKeyValueStore>,
) -> Result<(), eyre::Report> {
    let store: TestStore = store_over(&storage);
    let created = store.create(intake("No power", Priority::High)?);
    store.start(created.id().clone())?;

    let json = stored_json(&storage)?;
    let first = json
        .as_array()
        .and_then(|tasks| tasks.first())
        .ok_or_else(|| eyre::eyre!("stored document must be a non-empty array"))?;
    eyre::ensure!(first["id"] == created.id().as_str());
    eyre::ensure!(first["status"] == "in_progress");
    eyre::ensure!(first["priority"] == "high");
    eyre::ensure!(first["clientName"] == "Jane");
    eyre::ensure!(first.get("createdAt").is_some());
    eyre::ensure!(first.get("completedAt").is_none());
    Ok(())
}

#[rstest]
fn reopened_store_continues_where_it_left_off(
    storage: Arc<InMemoryKeyValueStore>,
) -> Result<(), eyre::Report> {
    let created = {
        let store = store_over(&storage);
        let created = store.create(intake("Leak", Priority::Low)?);
        store.start(created.id().clone())?;
        created
    };

    let reopened = store_over(&storage);
    eyre::ensure!(reopened.hydration_source() == HydrationSource::Stored);
    let done = reopened
        .complete(
            created.id().clone(),
            CompletionReport::new().with_time_spent_minutes(25),
        )?
        .ok_or_else(|| eyre::eyre!("task must survive a reopen"))?;
    eyre::ensure!(done.status() == TaskStatus::Completed);
    eyre::ensure!(done.created_at() == created.created_at());
    Ok(())
}

#[rstest]
fn dashboard_views_partition_the_collection(
    storage: Arc<InMemoryKeyValueStore>,
) -> Result<(), eyre::Report> {
    let store = store_over(&storage);
    let started = store.create(intake("Started", Priority::Medium)?);
    store.start(started.id().clone())?;
    let finished = store.create(intake("Finished", Priority::Medium)?);
    store.start(finished.id().clone())?;
    store.complete(finished.id().clone(), CompletionReport::new())?;

    eyre::ensure!(store.active().len() == 2);
    eyre::ensure!(store.archived().len() == 1);
    eyre::ensure!(store.filter_by_status(Some(TaskStatus::InProgress)).len() == 1);
    eyre::ensure!(store.filter_by_status(None).len() == 3);
    let recent: Vec<String> = store
        .recent(2)
        .iter()
        .map(|task| task.title().to_owned())
        .collect();
    eyre::ensure!(recent == ["Finished", "Started"]);
    eyre::ensure!(store.active().iter().any(|task| task.id().as_str() == SEED_TASK_ID));
    Ok(())
}

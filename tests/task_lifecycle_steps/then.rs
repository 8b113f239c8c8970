//! Then steps for work order lifecycle BDD scenarios.

use super::world::{LifecycleWorld, read_tasks};
use fieldwork::task::{
    domain::{Task, TaskDomainError, TaskStatus},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &LifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = world.current_task()?;
    let stored = world
        .store
        .find(task.id())
        .ok_or_else(|| eyre::eyre!("task {} is not in the store", task.id()))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            stored.status()
        ));
    }
    Ok(())
}

#[then("the task records {minutes:u32} minutes by the first rostered technician")]
fn task_records_completion(world: &LifecycleWorld, minutes: u32) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let technician = world.store.settings().roster().default_technician();

    if task.time_spent_minutes() != Some(minutes) {
        return Err(eyre::eyre!(
            "expected {minutes} minutes, found {:?}",
            task.time_spent_minutes()
        ));
    }
    if task.completed_by() != technician {
        return Err(eyre::eyre!(
            "expected completion by {technician:?}, found {:?}",
            task.completed_by()
        ));
    }
    if task.completed_at().is_none() {
        return Err(eyre::eyre!("completed task has no completion timestamp"));
    }
    Ok(())
}

#[then("the stored collection contains the task")]
fn stored_collection_contains_task(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let task = world.current_task()?;
    let raw = read_tasks(&world.storage).ok_or_else(|| eyre::eyre!("nothing stored"))?;
    let stored: Vec<Task> = serde_json::from_str(&raw)?;

    if !stored.contains(task) {
        return Err(eyre::eyre!("stored collection does not match task {}", task.id()));
    }
    Ok(())
}

#[then("the update fails with an invalid state transition error")]
fn update_fails_with_invalid_transition(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))?;

    if !matches!(
        result,
        Err(TaskLifecycleError::Domain(
            TaskDomainError::InvalidStateTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!(
            "expected InvalidStateTransition error, got {result:?}"
        ));
    }
    Ok(())
}

#[then("no task is updated")]
fn no_task_is_updated(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match world.last_update_result.as_ref() {
        Some(Ok(None)) => Ok(()),
        other => Err(eyre::eyre!("expected a silent no-op, got {other:?}")),
    }
}

#[then("the stored collection is unchanged")]
fn stored_collection_is_unchanged(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    if read_tasks(&world.storage) != world.stored_at_start {
        return Err(eyre::eyre!("stored collection changed"));
    }
    Ok(())
}

#[then(r#"the intake is rejected for the "{field}" field"#)]
fn intake_is_rejected(world: &LifecycleWorld, field: String) -> Result<(), eyre::Report> {
    match &world.last_intake_error {
        Some(TaskDomainError::EmptyField(rejected)) if rejected.label() == field => Ok(()),
        Some(TaskDomainError::EmptyField(rejected)) => Err(eyre::eyre!(
            "expected {field} to be rejected, got {rejected}"
        )),
        other => Err(eyre::eyre!("expected an empty-field error, got {other:?}")),
    }
}

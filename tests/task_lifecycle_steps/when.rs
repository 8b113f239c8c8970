//! When steps for work order lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use fieldwork::task::{
    domain::{CompletionReport, IntakeForm, Priority, Task, TaskId},
    services::TaskLifecycleError,
};
use rstest_bdd_macros::when;

fn record(world: &mut LifecycleWorld, result: Result<Option<Task>, TaskLifecycleError>) {
    if let Ok(Some(ref updated)) = result {
        world.last_task = Some(updated.clone());
    }
    world.last_update_result = Some(result);
}

#[when("the technician starts the task")]
fn technician_starts_task(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id().clone();
    let result = world.store.start(task_id);
    record(world, result);
    Ok(())
}

#[when(r#"the technician starts task "{task_id}""#)]
fn technician_starts_task_by_id(world: &mut LifecycleWorld, task_id: String) {
    let result = world.store.start(TaskId::from_raw(task_id));
    record(world, result);
}

#[when(r#"the technician completes the task in {minutes:u32} minutes with notes "{notes}""#)]
fn technician_completes_task(
    world: &mut LifecycleWorld,
    minutes: u32,
    notes: String,
) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id().clone();
    let technician = world
        .store
        .settings()
        .roster()
        .default_technician()
        .cloned()
        .ok_or_else(|| eyre::eyre!("roster has no technicians"))?;
    let report = CompletionReport::new()
        .with_time_spent_minutes(minutes)
        .with_worker_notes(notes)
        .with_completed_by(technician);
    let result = world.store.complete(task_id, report);
    record(world, result);
    Ok(())
}

#[when(r#"a client submits "{title}" at "{address}" for "{client}" with priority "{priority}""#)]
fn client_submits_form(
    world: &mut LifecycleWorld,
    title: String,
    address: String,
    client: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    match IntakeForm::new(title, "Reported through the client portal", address, client)
        .with_priority(level)
        .validate()
    {
        Ok(new_task) => world.last_task = Some(world.store.create(new_task)),
        Err(err) => world.last_intake_error = Some(err),
    }
    Ok(())
}

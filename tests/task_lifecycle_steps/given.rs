//! Given steps for work order lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use fieldwork::task::domain::{CompletionReport, IntakeForm, Priority};
use rstest_bdd_macros::given;

#[given(r#"a client submits "{title}" at "{address}" for "{client}" with priority "{priority}""#)]
fn client_submits(
    world: &mut LifecycleWorld,
    title: String,
    address: String,
    client: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let level = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let new_task = IntakeForm::new(title, "Reported through the client portal", address, client)
        .with_priority(level)
        .validate()?;
    world.last_task = Some(world.store.create(new_task));
    Ok(())
}

#[given("the task has been completed")]
fn task_has_been_completed(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    let task_id = world.current_task()?.id().clone();
    world.store.start(task_id.clone())?;
    let done = world
        .store
        .complete(task_id, CompletionReport::new().with_time_spent_minutes(15))?
        .ok_or_else(|| eyre::eyre!("task vanished while completing it"))?;
    world.last_task = Some(done);
    Ok(())
}

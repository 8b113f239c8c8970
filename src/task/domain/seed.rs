//! Seed collection used when nothing valid has been persisted yet.

use super::{NewTask, Priority, Task, TaskId};
use mockable::Clock;

/// Identifier of the welcome task in the seed collection.
pub const SEED_TASK_ID: &str = "demo-1";

/// Builds the seed collection, stamped with the clock's current time.
#[must_use]
pub fn seed_tasks(clock: &impl Clock) -> Vec<Task> {
    let welcome = NewTask {
        title: "Welcome order".to_owned(),
        description: "The system is working. Your order history will be kept here.".to_owned(),
        client_name: "Administrator".to_owned(),
        address: "Fieldwork head office".to_owned(),
        priority: Priority::Low,
    };
    vec![Task::create_with_id(
        TaskId::from_raw(SEED_TASK_ID),
        welcome,
        clock,
    )]
}

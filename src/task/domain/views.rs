//! Derived, read-only views over the task collection.
//!
//! Nothing here is stored; every view is recomputed from the current
//! collection on each read and keeps the collection's newest-first order.

use super::{Task, TaskStatus};

/// Tasks that still need work (status other than `Completed`).
#[must_use]
pub fn active(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| task.status() != TaskStatus::Completed)
        .collect()
}

/// Completed tasks, as shown in the archive.
#[must_use]
pub fn archived(tasks: &[Task]) -> Vec<&Task> {
    filter_by_status(tasks, Some(TaskStatus::Completed))
}

/// Dashboard filter; `None` selects every task.
#[must_use]
pub fn filter_by_status(tasks: &[Task], status: Option<TaskStatus>) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| status.is_none_or(|wanted| task.status() == wanted))
        .collect()
}

/// The `limit` most recently submitted tasks.
#[must_use]
pub fn recent(tasks: &[Task], limit: usize) -> Vec<&Task> {
    tasks.iter().take(limit).collect()
}

/// Number of tasks currently in `status`.
#[must_use]
pub fn count_with_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status() == status).count()
}

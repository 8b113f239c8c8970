//! Aggregate statistics over the task collection.

use super::{Task, TaskStatus, views::count_with_status};

/// Number of tasks in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    /// Status being counted.
    pub status: TaskStatus,
    /// Tasks currently in that status.
    pub count: usize,
}

/// Aggregates recomputed from the collection on every read.
///
/// Averages and hours are rounded half-up using integer arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatistics {
    total: usize,
    by_status: Vec<StatusCount>,
    completed_minutes_total: u64,
    average_completed_minutes: u64,
}

impl TaskStatistics {
    /// Computes statistics for a collection snapshot.
    ///
    /// Completed tasks without a recorded duration contribute zero minutes.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let by_status = TaskStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                count: count_with_status(tasks, *status),
            })
            .collect();

        let completed: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.status() == TaskStatus::Completed)
            .collect();
        let completed_minutes_total = completed
            .iter()
            .map(|task| u64::from(task.time_spent_minutes().unwrap_or_default()))
            .sum();
        let completed_count = u64::try_from(completed.len()).unwrap_or(u64::MAX);

        Self {
            total: tasks.len(),
            by_status,
            completed_minutes_total,
            average_completed_minutes: rounded_ratio(completed_minutes_total, completed_count),
        }
    }

    /// Returns the collection size.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Returns per-status counts in lifecycle order.
    #[must_use]
    pub fn by_status(&self) -> &[StatusCount] {
        &self.by_status
    }

    /// Returns the count for a single status.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.by_status
            .iter()
            .find(|entry| entry.status == status)
            .map_or(0, |entry| entry.count)
    }

    /// Returns the number of completed tasks.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.count(TaskStatus::Completed)
    }

    /// Returns the sum of recorded minutes over completed tasks.
    #[must_use]
    pub const fn completed_minutes_total(&self) -> u64 {
        self.completed_minutes_total
    }

    /// Returns the mean minutes per completed task, or zero when none are
    /// completed.
    #[must_use]
    pub const fn average_completed_minutes(&self) -> u64 {
        self.average_completed_minutes
    }

    /// Returns total completed hours in tenths of an hour.
    #[must_use]
    pub fn completed_hours_tenths(&self) -> u64 {
        rounded_ratio(self.completed_minutes_total, 6)
    }

    /// Formats total completed hours with one decimal, e.g. `"2.5"`.
    #[must_use]
    pub fn completed_hours_display(&self) -> String {
        let tenths = self.completed_hours_tenths();
        let whole = tenths.checked_div(10).unwrap_or_default();
        let fraction = tenths.checked_rem(10).unwrap_or_default();
        format!("{whole}.{fraction}")
    }
}

/// `numerator / denominator` rounded half-up; zero for a zero denominator.
fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    numerator
        .saturating_mul(2)
        .saturating_add(denominator)
        .checked_div(denominator.saturating_mul(2))
        .unwrap_or_default()
}

//! Task store: the single in-memory source of truth for task records.

use crate::task::{
    domain::{
        CompletionReport, NewTask, Task, TaskDomainError, TaskId, TaskStatistics, TaskStatus,
        TransitionPolicy, WorkerRoster, seed_tasks, views,
    },
    ports::{PersistenceError, TaskPersistence},
};
use mockable::Clock;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for the status-update operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    task_id: TaskId,
    status: TaskStatus,
    report: CompletionReport,
}

impl UpdateStatusRequest {
    /// Creates a request to move `task_id` to `status` with no completion
    /// details.
    #[must_use]
    pub fn new(task_id: TaskId, status: TaskStatus) -> Self {
        Self {
            task_id,
            status,
            report: CompletionReport::default(),
        }
    }

    /// Replaces the completion details.
    #[must_use]
    pub fn with_report(mut self, report: CompletionReport) -> Self {
        self.report = report;
        self
    }

    /// Sets the minutes of work.
    #[must_use]
    pub fn with_time_spent_minutes(mut self, minutes: u32) -> Self {
        self.report = self.report.with_time_spent_minutes(minutes);
        self
    }

    /// Sets the technician's notes.
    #[must_use]
    pub fn with_worker_notes(mut self, notes: impl Into<String>) -> Self {
        self.report = self.report.with_worker_notes(notes);
        self
    }

    /// Returns the task being updated.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the requested status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }
}

/// Service-level errors for task store operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
}

/// Result type for task store operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Construction parameters for a [`TaskStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStoreSettings {
    roster: WorkerRoster,
    policy: TransitionPolicy,
}

impl TaskStoreSettings {
    /// Creates settings from a roster and transition policy.
    #[must_use]
    pub const fn new(roster: WorkerRoster, policy: TransitionPolicy) -> Self {
        Self { roster, policy }
    }

    /// Returns the technicians allowed to complete tasks.
    #[must_use]
    pub const fn roster(&self) -> &WorkerRoster {
        &self.roster
    }

    /// Returns the transition policy.
    #[must_use]
    pub const fn policy(&self) -> TransitionPolicy {
        self.policy
    }
}

/// Where the store's initial collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// A valid collection was read from storage.
    Stored,
    /// Nothing usable was stored; the seed collection was used.
    Seed,
}

/// Outcome of the most recent persistence attempt.
#[derive(Debug, Clone, Default)]
pub enum StorageHealth {
    /// The last write succeeded.
    #[default]
    Healthy,
    /// The last write failed; in-memory state is ahead of storage.
    Failing(PersistenceError),
}

impl StorageHealth {
    /// Returns `true` when the last write succeeded.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns the failure to show as a warning, if any.
    #[must_use]
    pub const fn warning(&self) -> Option<&PersistenceError> {
        match self {
            Self::Healthy => None,
            Self::Failing(err) => Some(err),
        }
    }
}

/// In-memory task collection mirrored to persistence on every change.
///
/// The collection is never edited in place: each mutation builds a new
/// collection and swaps it in, so readers holding a snapshot from
/// [`TaskStore::list`] never observe a partial update.
pub struct TaskStore<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    persistence: Arc<P>,
    clock: Arc<C>,
    settings: TaskStoreSettings,
    tasks: RwLock<Arc<Vec<Task>>>,
    health: RwLock<StorageHealth>,
    source: HydrationSource,
}

impl<P, C> TaskStore<P, C>
where
    P: TaskPersistence,
    C: Clock + Send + Sync,
{
    /// Loads the saved collection, falling back to seed data, and mirrors
    /// the result back to storage.
    #[must_use]
    pub fn hydrate(persistence: Arc<P>, clock: Arc<C>, settings: TaskStoreSettings) -> Self {
        let (tasks, source) = persistence.load().map_or_else(
            || (seed_tasks(&*clock), HydrationSource::Seed),
            |stored| (stored, HydrationSource::Stored),
        );
        debug!(?source, count = tasks.len(), "task store hydrated");

        let store = Self {
            persistence,
            clock,
            settings,
            tasks: RwLock::new(Arc::new(tasks)),
            health: RwLock::new(StorageHealth::Healthy),
            source,
        };
        let snapshot = store.list();
        store.persist(&snapshot);
        store
    }

    /// Returns where the initial collection came from.
    #[must_use]
    pub const fn hydration_source(&self) -> HydrationSource {
        self.source
    }

    /// Returns the store's construction parameters.
    #[must_use]
    pub const fn settings(&self) -> &TaskStoreSettings {
        &self.settings
    }

    /// Returns the outcome of the most recent persistence attempt.
    #[must_use]
    pub fn storage_health(&self) -> StorageHealth {
        self.health
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns a read-only snapshot of the collection, newest first.
    #[must_use]
    pub fn list(&self) -> Arc<Vec<Task>> {
        Arc::clone(&self.tasks.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn find(&self, task_id: &TaskId) -> Option<Task> {
        self.list().iter().find(|task| task.id() == task_id).cloned()
    }

    /// Creates a pending task from validated intake data and prepends it.
    pub fn create(&self, new_task: NewTask) -> Task {
        let mut guard = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        let mut id = TaskId::new();
        while guard.iter().any(|task| task.id() == &id) {
            id = TaskId::new();
        }
        let task = Task::create_with_id(id, new_task, &*self.clock);

        let mut next = Vec::with_capacity(guard.len().saturating_add(1));
        next.push(task.clone());
        next.extend(guard.iter().cloned());
        *guard = Arc::new(next);

        info!(task_id = %task.id(), priority = %task.priority(), "task created");
        self.persist(&guard);
        task
    }

    /// Moves a task to a new status, applying the lifecycle side effects.
    ///
    /// Returns `Ok(None)` without touching the collection or storage when no
    /// task has the requested identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the transition policy
    /// forbids the move or the completion report names a technician who is
    /// not on the roster. The collection is unchanged in both cases.
    pub fn update_status(&self, request: UpdateStatusRequest) -> TaskLifecycleResult<Option<Task>> {
        let UpdateStatusRequest {
            task_id,
            status,
            report,
        } = request;

        let mut guard = self.tasks.write().unwrap_or_else(PoisonError::into_inner);
        let Some(existing) = guard.iter().find(|task| task.id() == &task_id) else {
            debug!(task_id = %task_id, "status update for unknown task ignored");
            return Ok(None);
        };

        if status == TaskStatus::Completed {
            if let Some(technician) = report.completed_by() {
                self.settings.roster.verify(technician)?;
            }
        } else if !report.is_empty() {
            debug!(task_id = %task_id, %status, "completion details ignored for non-completion transition");
        }

        let updated =
            existing.transitioned(status, report.clone(), self.settings.policy, &*self.clock)?;
        // Stored data may repeat an id; each duplicate transitions on its own.
        let next: Vec<Task> = guard
            .iter()
            .map(|task| {
                if task.id() != &task_id {
                    task.clone()
                } else if std::ptr::eq(task, existing) {
                    updated.clone()
                } else {
                    task.transitioned(status, report.clone(), self.settings.policy, &*self.clock)
                        .unwrap_or_else(|err| {
                            warn!(task_id = %task_id, error = %err, "duplicate task record left unchanged");
                            task.clone()
                        })
                }
            })
            .collect();
        *guard = Arc::new(next);

        if status == TaskStatus::Completed {
            info!(
                task_id = %task_id,
                minutes = ?updated.time_spent_minutes(),
                completed_by = ?updated.completed_by().map(|name| name.as_str()),
                "task completed"
            );
        } else {
            info!(task_id = %task_id, %status, "task status updated");
        }
        self.persist(&guard);
        Ok(Some(updated))
    }

    /// Claims a pending task for work.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update_status`].
    pub fn start(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        self.update_status(UpdateStatusRequest::new(task_id, TaskStatus::InProgress))
    }

    /// Completes a task with the technician's report.
    ///
    /// # Errors
    ///
    /// See [`TaskStore::update_status`].
    pub fn complete(
        &self,
        task_id: TaskId,
        report: CompletionReport,
    ) -> TaskLifecycleResult<Option<Task>> {
        self.update_status(
            UpdateStatusRequest::new(task_id, TaskStatus::Completed).with_report(report),
        )
    }

    /// Tasks still needing work, newest first.
    #[must_use]
    pub fn active(&self) -> Vec<Task> {
        views::active(&self.list()).into_iter().cloned().collect()
    }

    /// Completed tasks, newest first.
    #[must_use]
    pub fn archived(&self) -> Vec<Task> {
        views::archived(&self.list()).into_iter().cloned().collect()
    }

    /// Tasks matching the dashboard filter; `None` selects all.
    #[must_use]
    pub fn filter_by_status(&self, status: Option<TaskStatus>) -> Vec<Task> {
        views::filter_by_status(&self.list(), status)
            .into_iter()
            .cloned()
            .collect()
    }

    /// The `limit` most recently created tasks.
    #[must_use]
    pub fn recent(&self, limit: usize) -> Vec<Task> {
        views::recent(&self.list(), limit)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Aggregate statistics over the current collection.
    #[must_use]
    pub fn statistics(&self) -> TaskStatistics {
        TaskStatistics::from_tasks(&self.list())
    }

    /// Writes the collection and records the outcome as storage health.
    fn persist(&self, tasks: &[Task]) {
        let outcome = match self.persistence.save(tasks) {
            Ok(()) => StorageHealth::Healthy,
            Err(err) => {
                warn!(
                    error = %err,
                    quota_exceeded = err.is_quota_exceeded(),
                    "failed to persist task collection; keeping in-memory state"
                );
                StorageHealth::Failing(err)
            }
        };
        *self.health.write().unwrap_or_else(PoisonError::into_inner) = outcome;
    }
}

//! Task aggregate root and related task lifecycle types.

use super::{
    CompletionReport, NewTask, ParsePriorityError, ParseTaskStatusError, Photo, TaskDomainError,
    TaskId, TechnicianName, TransitionPolicy,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been submitted but no technician has claimed it.
    Pending,
    /// A technician has claimed the task and is working on it.
    InProgress,
    /// The technician has submitted a completion report.
    Completed,
}

impl TaskStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Position of the status in the forward-only lifecycle.
    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency requested by the client at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Standard response time.
    Low,
    /// Urgent; the intake form's default.
    #[default]
    Medium,
    /// Critical; immediate response.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service work order, from intake through completion.
///
/// The serialized field names are camel-cased because the whole collection
/// is stored as one JSON blob under a single storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    client_name: String,
    address: String,
    priority: Priority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_spent_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    worker_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    photo_after: Option<Photo>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "blank_technician_as_none"
    )]
    completed_by: Option<TechnicianName>,
}

/// Reads a stored technician, treating a blank name as unattributed.
fn blank_technician_as_none<'de, D>(deserializer: D) -> Result<Option<TechnicianName>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|name| TechnicianName::new(name).ok()))
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Short summary of the fault.
    pub title: String,
    /// Full fault description.
    pub description: String,
    /// Name of the client who reported the fault.
    pub client_name: String,
    /// Where the technician has to go.
    pub address: String,
    /// Requested urgency.
    pub priority: Priority,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted minutes of work, if any.
    pub time_spent_minutes: Option<u32>,
    /// Persisted technician notes, if any.
    pub worker_notes: Option<String>,
    /// Persisted completion photo, if any.
    pub photo_after: Option<Photo>,
    /// Persisted completing technician, if any.
    pub completed_by: Option<TechnicianName>,
}

impl Task {
    /// Creates a new pending task from validated intake data.
    #[must_use]
    pub fn create(new_task: NewTask, clock: &impl Clock) -> Self {
        Self::create_with_id(TaskId::new(), new_task, clock)
    }

    /// Creates a new pending task with a caller-chosen identifier.
    #[must_use]
    pub fn create_with_id(id: TaskId, new_task: NewTask, clock: &impl Clock) -> Self {
        let NewTask {
            title,
            description,
            client_name,
            address,
            priority,
        } = new_task;

        Self {
            id,
            title,
            description,
            client_name,
            address,
            priority,
            status: TaskStatus::Pending,
            created_at: clock.utc(),
            completed_at: None,
            time_spent_minutes: None,
            worker_notes: None,
            photo_after: None,
            completed_by: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            client_name: data.client_name,
            address: data.address,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            completed_at: data.completed_at,
            time_spent_minutes: data.time_spent_minutes,
            worker_notes: data.worker_notes,
            photo_after: data.photo_after,
            completed_by: data.completed_by,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the fault description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the client name.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// Returns the service address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the requested priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the completion timestamp, if the task has been completed.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the minutes of work reported at completion.
    #[must_use]
    pub const fn time_spent_minutes(&self) -> Option<u32> {
        self.time_spent_minutes
    }

    /// Returns the technician's completion notes.
    #[must_use]
    pub fn worker_notes(&self) -> Option<&str> {
        self.worker_notes.as_deref()
    }

    /// Returns the normalized completion photo.
    #[must_use]
    pub const fn photo_after(&self) -> Option<&Photo> {
        self.photo_after.as_ref()
    }

    /// Returns the technician who completed the task.
    #[must_use]
    pub const fn completed_by(&self) -> Option<&TechnicianName> {
        self.completed_by.as_ref()
    }

    /// Derives the task that results from moving to `target`.
    ///
    /// The receiver is left untouched. Entering [`TaskStatus::Completed`]
    /// stamps `completed_at` and adopts every field present in `report`;
    /// fields absent from the report keep their previous values. The report
    /// is ignored for any other target.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStateTransition`] when `policy` does
    /// not permit the move.
    pub fn transitioned(
        &self,
        target: TaskStatus,
        report: CompletionReport,
        policy: TransitionPolicy,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        if !policy.permits(self.status, target) {
            return Err(TaskDomainError::InvalidStateTransition {
                task_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }

        let mut next = self.clone();
        next.status = target;
        if target == TaskStatus::Completed {
            next.completed_at = Some(clock.utc());
            next.adopt_report(report);
        }
        Ok(next)
    }

    fn adopt_report(&mut self, report: CompletionReport) {
        let CompletionReport {
            time_spent_minutes,
            worker_notes,
            photo_after,
            completed_by,
        } = report;

        adopt(&mut self.time_spent_minutes, time_spent_minutes);
        adopt(&mut self.worker_notes, worker_notes);
        adopt(&mut self.photo_after, photo_after);
        adopt(&mut self.completed_by, completed_by);
    }
}

/// Replaces a field only when a new value was supplied.
fn adopt<T>(field: &mut Option<T>, supplied: Option<T>) {
    if supplied.is_some() {
        *field = supplied;
    }
}

//! Error types for task domain validation and parsing.

use super::{IntakeField, TaskId, TaskStatus, TechnicianName};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// A required intake field is empty after trimming.
    #[error("{0} must not be empty")]
    EmptyField(IntakeField),

    /// The requested status change is not permitted by the transition policy.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// Task that was asked to transition.
        task_id: TaskId,
        /// Status the task is currently in.
        from: TaskStatus,
        /// Status that was requested.
        to: TaskStatus,
    },

    /// The technician named in a completion report is not on the roster.
    #[error("technician '{0}' is not on the worker roster")]
    UnknownTechnician(TechnicianName),

    /// A technician name is empty after trimming.
    #[error("technician name must not be empty")]
    EmptyTechnicianName,

    /// A worker roster was built without any technicians.
    #[error("worker roster must list at least one technician")]
    EmptyRoster,
}

/// Error returned while parsing task statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing the active UI role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

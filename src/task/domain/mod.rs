//! Domain model for the field-service task lifecycle.
//!
//! The task domain models client intake, the forward-only
//! `Pending -> InProgress -> Completed` lifecycle with its completion side
//! effects, and the read-only views and statistics computed from the
//! collection, while keeping storage and presentation outside the domain
//! boundary.

mod completion;
mod error;
mod ids;
mod intake;
mod photo;
mod role;
mod roster;
mod seed;
mod stats;
mod task;
mod transition;
pub mod views;

pub use completion::CompletionReport;
pub use error::{ParsePriorityError, ParseRoleError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use intake::{IntakeField, IntakeForm, NewTask};
pub use photo::Photo;
pub use role::Role;
pub use roster::{DEFAULT_ROSTER, TechnicianName, WorkerRoster};
pub use seed::{SEED_TASK_ID, seed_tasks};
pub use stats::{StatusCount, TaskStatistics};
pub use task::{PersistedTaskData, Priority, Task, TaskStatus};
pub use transition::TransitionPolicy;

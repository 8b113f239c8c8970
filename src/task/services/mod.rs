//! Application services for the task lifecycle.

mod completion;
mod role;
mod store;

pub use completion::{CompletionDraft, CompletionError, CompletionSessions};
pub use role::RoleSelector;
pub use store::{
    HydrationSource, StorageHealth, TaskLifecycleError, TaskLifecycleResult, TaskStore,
    TaskStoreSettings, UpdateStatusRequest,
};

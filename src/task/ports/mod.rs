//! Port contracts for task storage.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

mod key_value;
mod persistence;

pub use key_value::{KeyValueError, KeyValueResult, KeyValueStore};
#[cfg(test)]
pub(crate) use key_value::MockKeyValueStore;
pub use persistence::{PersistenceError, PersistenceResult, TaskPersistence};

//! Adapter implementations for task storage ports.

pub mod directory;
pub mod local_storage;
pub mod memory;

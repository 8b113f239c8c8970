//! Unit tests for the task module.
//!
//! Tests are organised by concern: intake and domain values, the
//! transition table, the task store service, and completion sessions.

mod support;

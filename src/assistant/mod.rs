//! Summarization and time-estimation collaborators.
//!
//! Both talk to an external text-generation service through the
//! [`ports::TextGenerator`] port and never surface its failures: callers
//! always receive a displayable string or a number of minutes. Summaries
//! are transient display values held on a [`services::SummaryBoard`] and
//! never touch task records.

pub mod adapters;
pub mod ports;
pub mod prompts;
pub mod services;

//! Fieldwork: field-service work-order tracking.
//!
//! This crate provides the core of a technician-facing work-order dashboard
//! and a customer-facing intake form: the task lifecycle state machine, the
//! local key/value persistence that mirrors the task collection, client-side
//! photo normalization, and optional text-generation collaborators that
//! summarize work orders for technicians.
//!
//! # Architecture
//!
//! Fieldwork follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (storage, HTTP, etc.)
//!
//! # Modules
//!
//! - [`task`]: Task intake, lifecycle transitions, and local persistence
//! - [`photo`]: Downscaling and recompression of completion photos
//! - [`assistant`]: Summaries and time estimates from a text service
//! - [`session`]: Form-session tickets that discard late async results
//! - [`config`]: Environment-driven configuration

pub mod assistant;
pub mod config;
pub mod photo;
pub mod session;
pub mod task;

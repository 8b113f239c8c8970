//! Field-service work orders.
//!
//! Clients submit orders through an intake form, technicians claim them and
//! record completion details, and every change is mirrored to key/value
//! storage. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

//! Step definitions for work order lifecycle scenarios.

mod given;
mod then;
mod when;
pub mod world;

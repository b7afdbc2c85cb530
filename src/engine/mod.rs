//! Execution engine for kafkaform
//!
//! The engine orchestrates:
//! 1. Planning - List current state once per kind and build resources
//! 2. Diffing - Compare current and desired state
//! 3. Executing - Confirm, then apply changes one resource at a time

pub mod differ;
pub mod executor;
pub mod planner;

pub use executor::{ExecuteOptions, execute};
pub use planner::{Clients, build_plan, scope};

//! # Declarative
//!
//! A framework for declarative resource management.
//!
//! This crate provides the core abstractions for declaring desired state,
//! detecting current state, and converging a system to match it.
//!
//! ## Core Concepts
//!
//! - **Resource**: Something with state that can be managed (an ACL, a topic, a connector)
//! - **ResourceState**: The current or desired state of a resource
//! - **ExecutionPlan**: An ordered list of resources
//! - **Executor**: Applies changed resources sequentially, recording failures
//!
//! ## Example
//!
//! ```ignore
//! use declarative::{
//!     ApplyResult, ExecuteOptions, ExecutionPlan, Resource, ResourceState,
//!     execute_simple,
//! };
//!
//! #[derive(Debug)]
//! struct Topic { name: String, exists: bool }
//!
//! impl Resource for Topic {
//!     fn id(&self) -> String { self.name.clone() }
//!     fn description(&self) -> String { format!("Topic {}", self.name) }
//!     fn resource_type(&self) -> &'static str { "kafka_topic" }
//!
//!     fn current_state(&self) -> anyhow::Result<ResourceState> {
//!         Ok(if self.exists {
//!             ResourceState::Present { details: None }
//!         } else {
//!             ResourceState::Absent
//!         })
//!     }
//!
//!     fn desired_state(&self) -> ResourceState {
//!         ResourceState::Present { details: None }
//!     }
//!
//!     fn apply(&self) -> anyhow::Result<ApplyResult> {
//!         Ok(ApplyResult::Created)
//!     }
//! }
//!
//! let mut plan = ExecutionPlan::new();
//! plan.add_resource(Box::new(Topic { name: "orders".into(), exists: false }));
//! let summary = execute_simple(plan, &ExecuteOptions::default())?;
//! ```
//!
//! ## Callback Traits
//!
//! - [`ProgressCallback`]: Receives progress updates
//! - [`ConfirmCallback`]: Handles user confirmations
//!
//! This allows the crate to be used without a dependency on any UI.

pub mod context;
pub mod diff;
pub mod executor;
pub mod planner;
pub mod resource;
pub mod types;

// Re-export main types at crate root
pub use context::{AutoConfirm, AutoDecline, ConfirmCallback, NoProgress, ProgressCallback};
pub use diff::{DiffSummary, ResourceDiff, compute_diffs, group_by_type};
pub use executor::{execute, execute_simple};
pub use planner::{ExecutionPlan, resolve_alias};
pub use resource::{BoxedResource, Resource};
pub use types::{ApplyResult, Ensure, ExecuteOptions, ExecuteSummary, ResourceState};

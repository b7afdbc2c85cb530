//! Resource trait for declarative state management
//!
//! A Resource represents something that can be in a certain state,
//! and can be changed to reach a desired state.

use crate::types::{ApplyResult, ResourceState};
use anyhow::Result;
use std::fmt;

/// Core trait for declarative resources
///
/// Every managed resource implements this trait, which provides:
/// - Identity (id, description, type)
/// - State detection (current vs desired)
/// - State convergence (apply)
///
/// Current state is usually derived from a listing fetched once per run,
/// so `current_state` is cheap and can be called repeatedly.
pub trait Resource: Send + Sync + fmt::Debug {
    /// Unique identifier for this resource within its type
    ///
    /// Examples:
    /// - "orders" for a topic
    /// - "local-file-sink" for a connector
    /// - the content hash for an ACL
    fn id(&self) -> String;

    /// Human-readable description of what this resource does
    fn description(&self) -> String;

    /// Resource type category, used for grouping and filtering
    fn resource_type(&self) -> &'static str;

    /// Detect the current state of this resource
    fn current_state(&self) -> Result<ResourceState>;

    /// Get the desired state for this resource
    fn desired_state(&self) -> ResourceState;

    /// Check if the resource needs changes to reach desired state
    ///
    /// Default implementation compares current and desired states.
    fn needs_apply(&self) -> Result<bool> {
        let current = self.current_state()?;
        let desired = self.desired_state();
        Ok(current != desired)
    }

    /// Differences that exist but will not be applied
    fn warnings(&self) -> Vec<String> {
        Vec::new()
    }

    /// Apply changes to reach the desired state
    ///
    /// This method should:
    /// 1. Check if already in desired state (return NoChange)
    /// 2. Make the necessary changes
    /// 3. Return the appropriate ApplyResult
    ///
    /// Dry runs never reach this method; the executor stops before applying.
    fn apply(&self) -> Result<ApplyResult>;
}

/// A boxed resource for type-erased storage
pub type BoxedResource = Box<dyn Resource>;

//! Kafka resources for declarative convergence
//!
//! Each resource pairs one catalog declaration with the instance discovered
//! for it (if any). Discovery happens once per kind in the planner, so state
//! detection here never calls the cluster; only `apply` does.

use declarative::Ensure;

pub mod acl;
pub mod connector;
pub mod topic;

#[cfg(test)]
pub(crate) mod testing;

pub use acl::KafkaAcl;
pub use connector::KafkaConnector;
pub use topic::KafkaTopic;

pub use declarative::{ApplyResult, Resource, ResourceState};

/// Desired state for an `ensure` value, with optional details when present
fn desired_for(ensure: Ensure, details: Option<String>) -> ResourceState {
    match ensure {
        Ensure::Present => ResourceState::Present { details },
        Ensure::Absent => ResourceState::Absent,
    }
}

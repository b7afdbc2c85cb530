//! Diff computation for resources

use crate::resource::Resource;
use crate::types::ResourceState;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A diff between current and desired state of a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDiff {
    /// Unique identifier of the resource
    pub resource_id: String,
    /// Type of the resource
    pub resource_type: String,
    /// Human-readable description
    pub description: String,
    /// Current state
    pub current: ResourceState,
    /// Desired state
    pub desired: ResourceState,
    /// Differences that will not be applied
    pub warnings: Vec<String>,
}

impl ResourceDiff {
    /// Create a diff from a resource, returning None if no changes needed
    ///
    /// A resource in sync that still carries warnings yields a diff, so the
    /// unsupported difference is reported.
    pub fn from_resource(resource: &dyn Resource) -> Result<Option<Self>> {
        let current = resource
            .current_state()
            .with_context(|| format!("Failed to read state of {}", resource.description()))?;
        let desired = resource.desired_state();
        let warnings = resource.warnings();

        if current == desired && warnings.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            resource_id: resource.id(),
            resource_type: resource.resource_type().to_string(),
            description: resource.description(),
            current,
            desired,
            warnings,
        }))
    }

    /// Check if this diff represents an addition
    pub fn is_addition(&self) -> bool {
        matches!(
            (&self.current, &self.desired),
            (ResourceState::Absent, ResourceState::Present { .. })
        )
    }

    /// Check if this diff represents a removal
    pub fn is_removal(&self) -> bool {
        matches!(
            (&self.current, &self.desired),
            (ResourceState::Present { .. }, ResourceState::Absent)
        )
    }

    /// Check if this diff represents a modification
    pub fn is_modification(&self) -> bool {
        matches!(
            (&self.current, &self.desired),
            (
                ResourceState::Present { details: Some(a) },
                ResourceState::Present { details: Some(b) }
            ) if a != b
        )
    }

    /// Check if applying this diff would change anything
    pub fn has_change(&self) -> bool {
        self.current != self.desired
    }
}

/// Compute diffs for a list of resources
///
/// Returns only resources that have differences between current and desired state.
pub fn compute_diffs(resources: &[Box<dyn Resource>]) -> Result<Vec<ResourceDiff>> {
    resources
        .iter()
        .filter_map(|r| ResourceDiff::from_resource(r.as_ref()).transpose())
        .collect()
}

/// Diff summary statistics
#[derive(Debug, Clone, Default)]
pub struct DiffSummary {
    /// Number of resources to add
    pub additions: usize,
    /// Number of resources to remove
    pub removals: usize,
    /// Number of resources to modify
    pub modifications: usize,
    /// Number of differences that will not be applied
    pub warnings: usize,
}

impl DiffSummary {
    /// Create a summary from a list of diffs
    pub fn from_diffs(diffs: &[ResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            summary.warnings += diff.warnings.len();
            if !diff.has_change() {
                continue;
            }
            if diff.is_addition() {
                summary.additions += 1;
            } else if diff.is_removal() {
                summary.removals += 1;
            } else {
                summary.modifications += 1;
            }
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}

/// Group diffs by resource type, in type order
pub fn group_by_type(diffs: &[ResourceDiff]) -> BTreeMap<String, Vec<&ResourceDiff>> {
    let mut groups: BTreeMap<String, Vec<&ResourceDiff>> = BTreeMap::new();
    for diff in diffs {
        groups
            .entry(diff.resource_type.clone())
            .or_default()
            .push(diff);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(current: ResourceState, desired: ResourceState, warnings: &[&str]) -> ResourceDiff {
        ResourceDiff {
            resource_id: "orders".into(),
            resource_type: "kafka_topic".into(),
            description: "Topic orders".into(),
            current,
            desired,
            warnings: warnings.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    fn present(details: &str) -> ResourceState {
        ResourceState::Present {
            details: Some(details.into()),
        }
    }

    #[test]
    fn test_diff_kinds() {
        let add = diff(ResourceState::Absent, present("a"), &[]);
        assert!(add.is_addition() && !add.is_removal());

        let remove = diff(present("a"), ResourceState::Absent, &[]);
        assert!(remove.is_removal());

        let modify = diff(present("a"), present("b"), &[]);
        assert!(modify.is_modification());
    }

    #[test]
    fn test_summary_counts_warning_only_diffs_separately() {
        let diffs = vec![
            diff(ResourceState::Absent, present("a"), &[]),
            diff(present("a"), present("b"), &[]),
            diff(present("a"), present("a"), &["partitions 3 -> 6"]),
        ];
        let summary = DiffSummary::from_diffs(&diffs);
        assert_eq!(summary.additions, 1);
        assert_eq!(summary.modifications, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.total(), 2);
    }

    #[test]
    fn test_group_by_type() {
        let mut other = diff(ResourceState::Absent, present("a"), &[]);
        other.resource_type = "kafka_acl".into();
        let diffs = vec![diff(ResourceState::Absent, present("a"), &[]), other];
        let groups = group_by_type(&diffs);
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, vec!["kafka_acl", "kafka_topic"]);
    }
}

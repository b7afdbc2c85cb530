//! Matching desired resources to discovered ones and computing changes.
//!
//! Discovery happens once per run; everything here works on the listed
//! state and only calls the [`Backend`] to act on a decided change.

use crate::acl::{Acl, AclEntry};
use crate::backend::Backend;
use crate::error::Result;
use crate::topic::{ConfigUpdate, DesiredTopic, Topic};

/// Find the discovered entry for a desired ACL.
pub fn find_acl<'a>(acl: &Acl, existing: &'a [AclEntry]) -> Option<&'a AclEntry> {
    existing.iter().find(|entry| acl.matches(entry))
}

/// Find the discovered topic with the given name.
pub fn find_topic<'a>(name: &str, existing: &'a [Topic]) -> Option<&'a Topic> {
    existing.iter().find(|topic| topic.name == name)
}

/// One property of an existing topic that differs from its declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicChange {
    /// Partition count differs. Not applied.
    Partitions { from: u32, to: u32 },
    /// Replication factor differs. Not applied.
    ReplicationFactor { from: u32, to: u32 },
    /// Dynamic configs differ.
    Config(ConfigUpdate),
}

impl TopicChange {
    /// Whether this change can be applied to a live topic.
    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Changes needed to bring `current` in line with `desired`.
///
/// Properties the declaration leaves out are not compared.
pub fn topic_changes(current: &Topic, desired: &DesiredTopic) -> Vec<TopicChange> {
    let mut changes = Vec::new();

    if let Some(to) = desired.partitions
        && to != current.partitions
    {
        changes.push(TopicChange::Partitions {
            from: current.partitions,
            to,
        });
    }
    if let Some(to) = desired.replication_factor
        && to != current.replication_factor
    {
        changes.push(TopicChange::ReplicationFactor {
            from: current.replication_factor,
            to,
        });
    }
    if let Some(config) = &desired.config
        && *config != current.config
    {
        changes.push(TopicChange::Config(ConfigUpdate::between(
            &current.config,
            config,
        )));
    }

    changes
}

/// Apply changes to an existing topic.
///
/// Partition and replication factor changes are logged and skipped.
pub fn apply_topic_changes<B: Backend + ?Sized>(
    backend: &B,
    name: &str,
    changes: &[TopicChange],
) -> Result<()> {
    for change in changes {
        match change {
            TopicChange::Partitions { from, to } => log::warn!(
                "Changing the number of partitions of topic {name} ({from} -> {to}) is not supported"
            ),
            TopicChange::ReplicationFactor { from, to } => log::warn!(
                "Changing the replication factor of topic {name} ({from} -> {to}) is not supported"
            ),
            TopicChange::Config(update) => backend.alter_topic_config(name, update)?,
        }
    }
    Ok(())
}

//! Backend abstraction for cluster operations.
//!
//! The [`Backend`] trait is the cluster as seen by the reconcilers: one call
//! to list each kind of state, and one call per mutation. Discovery and
//! mutation stay separate so a run can list once, decide, then act.

pub mod cli;

use crate::acl::{Acl, AclEntry};
use crate::error::Result;
use crate::topic::{ConfigUpdate, DesiredTopic, Topic};

/// Cluster operations for ACLs and topics.
pub trait Backend: Send + Sync {
    /// List every ACL on the cluster.
    fn list_acls(&self) -> Result<Vec<AclEntry>>;

    /// Add an ACL.
    fn create_acl(&self, acl: &Acl) -> Result<()>;

    /// Remove an ACL.
    fn delete_acl(&self, acl: &Acl) -> Result<()>;

    /// List every topic with its dynamic configs.
    fn list_topics(&self) -> Result<Vec<Topic>>;

    /// Create a topic. Fails before any call when partitions are missing.
    fn create_topic(&self, topic: &DesiredTopic) -> Result<()>;

    /// Delete a topic by name.
    fn delete_topic(&self, name: &str) -> Result<()>;

    /// Apply an incremental config update to a topic.
    fn alter_topic_config(&self, name: &str, update: &ConfigUpdate) -> Result<()>;
}

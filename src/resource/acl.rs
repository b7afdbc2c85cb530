//! Kafka ACL resource

use anyhow::{Context, Result};
use declarative::Ensure;
use kafkakit::{Acl, AclEntry, Backend};
use std::fmt;
use std::sync::Arc;

use super::{ApplyResult, Resource, ResourceState, desired_for};

/// One declared ACL entry
pub struct KafkaAcl {
    pub acl: Acl,
    pub ensure: Ensure,
    /// Matching entry from the cluster listing
    pub existing: Option<AclEntry>,
    backend: Arc<dyn Backend>,
}

impl KafkaAcl {
    pub fn new(
        acl: Acl,
        ensure: Ensure,
        existing: &[AclEntry],
        backend: Arc<dyn Backend>,
    ) -> Self {
        let existing = kafkakit::find_acl(&acl, existing).cloned();
        Self {
            acl,
            ensure,
            existing,
            backend,
        }
    }
}

impl fmt::Debug for KafkaAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaAcl")
            .field("acl", &self.acl)
            .field("ensure", &self.ensure)
            .field("existing", &self.existing.is_some())
            .finish_non_exhaustive()
    }
}

impl Resource for KafkaAcl {
    fn id(&self) -> String {
        self.acl.name()
    }

    fn description(&self) -> String {
        self.acl.to_string()
    }

    fn resource_type(&self) -> &'static str {
        "kafka_acl"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(if self.existing.is_some() {
            ResourceState::Present { details: None }
        } else {
            ResourceState::Absent
        })
    }

    fn desired_state(&self) -> ResourceState {
        desired_for(self.ensure, None)
    }

    fn apply(&self) -> Result<ApplyResult> {
        match (self.ensure, &self.existing) {
            (Ensure::Present, None) => {
                self.backend
                    .create_acl(&self.acl)
                    .with_context(|| format!("ACL {}", self.acl))?;
                Ok(ApplyResult::Created)
            }
            (Ensure::Absent, Some(_)) => {
                self.backend
                    .delete_acl(&self.acl)
                    .with_context(|| format!("ACL {}", self.acl))?;
                Ok(ApplyResult::Removed)
            }
            _ => Ok(ApplyResult::NoChange),
        }
    }
}

//! Kafka topic resource

use anyhow::{Context, Result};
use declarative::Ensure;
use kafkakit::topic::render_config;
use kafkakit::{Backend, DesiredTopic, Topic, TopicChange, TopicConfig};
use std::fmt;
use std::sync::Arc;

use super::{ApplyResult, Resource, ResourceState, desired_for};

/// One declared topic
pub struct KafkaTopic {
    pub topic: DesiredTopic,
    pub ensure: Ensure,
    /// Topic of the same name from the cluster listing
    pub existing: Option<Topic>,
    backend: Arc<dyn Backend>,
}

impl KafkaTopic {
    pub fn new(
        topic: DesiredTopic,
        ensure: Ensure,
        existing: &[Topic],
        backend: Arc<dyn Backend>,
    ) -> Self {
        let existing = kafkakit::find_topic(&topic.name, existing).cloned();
        Self {
            topic,
            ensure,
            existing,
            backend,
        }
    }

    fn changes(&self) -> Vec<TopicChange> {
        self.existing
            .as_ref()
            .map(|current| kafkakit::topic_changes(current, &self.topic))
            .unwrap_or_default()
    }
}

fn render(partitions: u32, replication_factor: u32, config: &TopicConfig) -> String {
    format!(
        "partitions={partitions}\nreplication_factor={replication_factor}\n{}",
        render_config(config)
    )
}

impl fmt::Debug for KafkaTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaTopic")
            .field("topic", &self.topic)
            .field("ensure", &self.ensure)
            .field("existing", &self.existing)
            .finish_non_exhaustive()
    }
}

impl Resource for KafkaTopic {
    fn id(&self) -> String {
        self.topic.name.clone()
    }

    fn description(&self) -> String {
        match self.ensure {
            Ensure::Present => format!("Topic {}", self.topic.name),
            Ensure::Absent => format!("Remove topic {}", self.topic.name),
        }
    }

    fn resource_type(&self) -> &'static str {
        "kafka_topic"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match &self.existing {
            Some(t) => ResourceState::Present {
                details: Some(render(t.partitions, t.replication_factor, &t.config)),
            },
            None => ResourceState::Absent,
        })
    }

    /// Partitions and replication factor cannot be changed on a live topic,
    /// so the desired rendering keeps the cluster's values and reports the
    /// difference through [`Resource::warnings`] instead.
    fn desired_state(&self) -> ResourceState {
        let details = match &self.existing {
            Some(current) => render(
                current.partitions,
                current.replication_factor,
                self.topic.config.as_ref().unwrap_or(&current.config),
            ),
            None => render(
                self.topic.partitions.unwrap_or_default(),
                self.topic.replication_factor.unwrap_or(1),
                self.topic.config.as_ref().unwrap_or(&TopicConfig::new()),
            ),
        };
        desired_for(self.ensure, Some(details))
    }

    fn warnings(&self) -> Vec<String> {
        if self.ensure == Ensure::Absent {
            return Vec::new();
        }
        let mut warnings = Vec::new();
        if self.existing.is_none() && self.topic.partitions.is_none() {
            warnings
                .push("the 'partitions' parameter is mandatory when creating topics".to_string());
        }
        for change in self.changes() {
            match change {
                TopicChange::Partitions { from, to } => warnings.push(format!(
                    "changing the number of partitions ({from} -> {to}) is not supported"
                )),
                TopicChange::ReplicationFactor { from, to } => warnings.push(format!(
                    "changing the replication factor ({from} -> {to}) is not supported"
                )),
                TopicChange::Config(_) => {}
            }
        }
        warnings
    }

    fn apply(&self) -> Result<ApplyResult> {
        let name = &self.topic.name;
        match (self.ensure, &self.existing) {
            (Ensure::Present, None) => {
                self.backend
                    .create_topic(&self.topic)
                    .with_context(|| format!("Topic {name}"))?;
                Ok(ApplyResult::Created)
            }
            (Ensure::Present, Some(_)) => {
                let changes = self.changes();
                kafkakit::apply_topic_changes(self.backend.as_ref(), name, &changes)
                    .with_context(|| format!("Topic {name}"))?;
                if changes.iter().any(TopicChange::is_supported) {
                    Ok(ApplyResult::Modified)
                } else {
                    Ok(ApplyResult::NoChange)
                }
            }
            (Ensure::Absent, Some(_)) => {
                self.backend
                    .delete_topic(name)
                    .with_context(|| format!("Topic {name}"))?;
                Ok(ApplyResult::Removed)
            }
            (Ensure::Absent, None) => Ok(ApplyResult::NoChange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::testing::FakeBackend;
    use kafkakit::{ConfigValue, TopicSpec};

    fn config(pairs: &[(&str, i64)]) -> TopicConfig {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), ConfigValue::Int(*v)))
            .collect()
    }

    fn listed(partitions: u32, replication_factor: u32, retention: i64) -> Topic {
        Topic {
            name: "t1".to_string(),
            partitions,
            replication_factor,
            config: config(&[("retention.ms", retention)]),
        }
    }

    fn declared(partitions: Option<i64>, retention: Option<i64>) -> DesiredTopic {
        TopicSpec {
            partitions,
            replication_factor: Some(2),
            config: retention.map(|r| config(&[("retention.ms", r)])),
        }
        .validate("t1")
        .unwrap()
    }

    #[test]
    fn test_missing_topic_is_created() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(Some(3), Some(1000)),
            Ensure::Present,
            &[],
            backend.clone(),
        );

        assert!(resource.needs_apply().unwrap());
        assert!(resource.warnings().is_empty());
        assert_eq!(
            resource.apply().unwrap(),
            ApplyResult::Created
        );
        assert_eq!(backend.calls(), vec!["create_topic t1"]);
    }

    #[test]
    fn test_in_sync_topic() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(Some(3), Some(1000)),
            Ensure::Present,
            &[listed(3, 2, 1000)],
            backend.clone(),
        );

        assert!(!resource.needs_apply().unwrap());
        assert!(resource.warnings().is_empty());
    }

    #[test]
    fn test_config_change_is_applied() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(Some(3), Some(2000)),
            Ensure::Present,
            &[listed(3, 2, 1000)],
            backend.clone(),
        );

        assert!(resource.needs_apply().unwrap());
        assert_eq!(
            resource.apply().unwrap(),
            ApplyResult::Modified
        );
        assert_eq!(
            backend.calls(),
            vec!["alter_topic_config t1 add=retention.ms=[2000] delete="]
        );
    }

    #[test]
    fn test_partition_change_only_warns() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(Some(6), Some(1000)),
            Ensure::Present,
            &[listed(3, 2, 1000)],
            backend.clone(),
        );

        assert!(!resource.needs_apply().unwrap());
        let warnings = resource.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("(3 -> 6)"));

        assert_eq!(
            resource.apply().unwrap(),
            ApplyResult::NoChange
        );
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_unmanaged_config_is_left_alone() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(None, None),
            Ensure::Present,
            &[listed(3, 2, 1000)],
            backend,
        );

        assert!(!resource.needs_apply().unwrap());
    }

    #[test]
    fn test_create_without_partitions_fails() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(declared(None, None), Ensure::Present, &[], backend.clone());

        assert_eq!(resource.warnings().len(), 1);
        let err = resource.apply().unwrap_err();
        assert!(format!("{err:#}").contains("mandatory when creating topics"));
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_absent_topic_is_deleted() {
        let backend = Arc::new(FakeBackend::default());
        let resource = KafkaTopic::new(
            declared(None, None),
            Ensure::Absent,
            &[listed(3, 2, 1000)],
            backend.clone(),
        );

        assert!(resource.needs_apply().unwrap());
        assert_eq!(
            resource.apply().unwrap(),
            ApplyResult::Removed
        );
        assert_eq!(backend.calls(), vec!["delete_topic t1"]);
    }
}

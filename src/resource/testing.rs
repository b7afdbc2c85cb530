//! Fakes for the cluster and the Connect worker

use connectkit::{Config, ConnectApi, ConnectorConfig};
use kafkakit::{Acl, AclEntry, Backend, ConfigUpdate, DesiredTopic, Topic};
use std::sync::Mutex;

/// Kafka backend serving fixed listings and recording mutations
#[derive(Default)]
pub struct FakeBackend {
    pub acls: Vec<AclEntry>,
    pub topics: Vec<Topic>,
    pub fail_with: Option<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> kafkakit::Result<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(stderr) => Err(kafkakit::Error::CommandFailed {
                message: "kafka tool exited with exit status: 1".to_string(),
                stderr: stderr.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl Backend for FakeBackend {
    fn list_acls(&self) -> kafkakit::Result<Vec<AclEntry>> {
        self.calls.lock().unwrap().push("list_acls".to_string());
        Ok(self.acls.clone())
    }

    fn create_acl(&self, acl: &Acl) -> kafkakit::Result<()> {
        self.record(format!("create_acl {acl}"))
    }

    fn delete_acl(&self, acl: &Acl) -> kafkakit::Result<()> {
        self.record(format!("delete_acl {acl}"))
    }

    fn list_topics(&self) -> kafkakit::Result<Vec<Topic>> {
        self.calls.lock().unwrap().push("list_topics".to_string());
        Ok(self.topics.clone())
    }

    fn create_topic(&self, topic: &DesiredTopic) -> kafkakit::Result<()> {
        topic.partitions_for_create()?;
        self.record(format!("create_topic {}", topic.name))
    }

    fn delete_topic(&self, name: &str) -> kafkakit::Result<()> {
        self.record(format!("delete_topic {name}"))
    }

    fn alter_topic_config(&self, name: &str, update: &ConfigUpdate) -> kafkakit::Result<()> {
        self.record(format!(
            "alter_topic_config {name} add={} delete={}",
            update.add_config_arg().unwrap_or_default(),
            update.delete_config_arg().unwrap_or_default()
        ))
    }
}

/// Connect worker serving a fixed listing and recording mutations
#[derive(Default)]
pub struct FakeConnect {
    pub connectors: Vec<ConnectorConfig>,
    pub calls: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<Config>>,
}

impl FakeConnect {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ConnectApi for FakeConnect {
    fn list(&self) -> connectkit::Result<Vec<ConnectorConfig>> {
        self.calls.lock().unwrap().push("list".to_string());
        Ok(self.connectors.clone())
    }

    fn create(&self, connector: &ConnectorConfig) -> connectkit::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create {}", connector.name));
        self.sent.lock().unwrap().push(connector.config.clone());
        Ok(())
    }

    fn delete(&self, name: &str) -> connectkit::Result<()> {
        self.calls.lock().unwrap().push(format!("delete {name}"));
        Ok(())
    }

    fn update_config(&self, name: &str, config: &Config) -> connectkit::Result<()> {
        self.calls.lock().unwrap().push(format!("update {name}"));
        self.sent.lock().unwrap().push(config.clone());
        Ok(())
    }
}

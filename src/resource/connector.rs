//! Kafka Connect connector config resource

use anyhow::{Context, Result};
use connectkit::{Config, ConnectApi, ConnectorConfig};
use declarative::Ensure;
use std::fmt;
use std::sync::Arc;

use super::{ApplyResult, Resource, ResourceState, desired_for};

/// One declared connector
pub struct KafkaConnector {
    pub connector: ConnectorConfig,
    pub ensure: Ensure,
    /// Connector of the same name from the worker listing
    pub existing: Option<ConnectorConfig>,
    api: Arc<dyn ConnectApi>,
}

impl KafkaConnector {
    pub fn new(
        connector: ConnectorConfig,
        ensure: Ensure,
        existing: &[ConnectorConfig],
        api: Arc<dyn ConnectApi>,
    ) -> Self {
        let existing = connectkit::find_connector(&connector.name, existing).cloned();
        Self {
            connector,
            ensure,
            existing,
            api,
        }
    }

    fn in_sync(&self) -> bool {
        self.existing
            .as_ref()
            .is_some_and(|current| connectkit::config_in_sync(&current.config, &self.connector.config))
    }
}

fn render(config: &Config) -> String {
    serde_json::to_string_pretty(config).unwrap_or_default()
}

impl fmt::Debug for KafkaConnector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KafkaConnector")
            .field("connector", &self.connector)
            .field("ensure", &self.ensure)
            .field("existing", &self.existing)
            .finish_non_exhaustive()
    }
}

impl Resource for KafkaConnector {
    fn id(&self) -> String {
        self.connector.name.clone()
    }

    fn description(&self) -> String {
        match self.ensure {
            Ensure::Present => format!("Connector {}", self.connector.name),
            Ensure::Absent => format!("Remove connector {}", self.connector.name),
        }
    }

    fn resource_type(&self) -> &'static str {
        "kafka_connector_config"
    }

    fn current_state(&self) -> Result<ResourceState> {
        Ok(match &self.existing {
            Some(current) => ResourceState::Present {
                details: Some(render(&current.config)),
            },
            None => ResourceState::Absent,
        })
    }

    fn desired_state(&self) -> ResourceState {
        // Values the worker echoes back as strings count as equal, so an
        // in-sync connector keeps the rendering of the listed config.
        let details = match &self.existing {
            Some(current) if self.in_sync() => render(&current.config),
            _ => render(&self.connector.config),
        };
        desired_for(self.ensure, Some(details))
    }

    fn apply(&self) -> Result<ApplyResult> {
        let name = &self.connector.name;
        match (self.ensure, &self.existing) {
            (Ensure::Present, None) => {
                self.api
                    .create(&self.connector)
                    .with_context(|| format!("Connector {name}"))?;
                Ok(ApplyResult::Created)
            }
            (Ensure::Present, Some(_)) if !self.in_sync() => {
                self.api
                    .update_config(name, &self.connector.config)
                    .with_context(|| format!("Connector {name}"))?;
                Ok(ApplyResult::Modified)
            }
            (Ensure::Absent, Some(_)) => {
                self.api
                    .delete(name)
                    .with_context(|| format!("Connector {name}"))?;
                Ok(ApplyResult::Removed)
            }
            _ => Ok(ApplyResult::NoChange),
        }
    }
}

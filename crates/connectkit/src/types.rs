//! Connector config model.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Config document of one connector, without the implicit `name` key.
pub type Config = Map<String, Value>;

/// A connector and its config, as discovered or desired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub name: String,
    pub config: Config,
}

/// A connector as declared in the desired-state catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectorSpec {
    #[serde(default)]
    pub config: Config,
}

impl ConnectorSpec {
    /// Validate the declaration of connector `name`.
    ///
    /// A `name` key inside the config must agree with the connector name and
    /// is dropped, matching what discovery stores.
    pub fn validate(&self, name: &str) -> Result<ConnectorConfig> {
        let invalid = |message: &str| Error::Validation {
            name: name.to_string(),
            message: message.to_string(),
        };

        if name.is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if name.contains('/') {
            return Err(invalid("name must not contain '/'"));
        }

        let mut config = self.config.clone();
        match config.remove("name") {
            None => {}
            Some(Value::String(inner)) if inner == name => {}
            Some(other) => {
                return Err(invalid(&format!(
                    "config key 'name' ({other}) does not match the connector name"
                )));
            }
        }

        Ok(ConnectorConfig {
            name: name.to_string(),
            config,
        })
    }
}

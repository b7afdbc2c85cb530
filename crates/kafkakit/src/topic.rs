//! Topic model and the config diff engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamic topic config value.
///
/// Listings only ever produce integers and strings; catalogs may also use
/// booleans and floats. Values compare by their rendered text, so `1000`
/// and `"1000"` are the same setting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Bool(bool),
    Float(f64),
    Str(String),
}

impl ConfigValue {
    /// Coerce a listing value: integers become `Int`, everything else `Str`.
    pub fn from_listing(raw: &str) -> Self {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse() {
                return Self::Int(n);
            }
        }
        Self::Str(raw.to_string())
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl PartialEq for ConfigValue {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for ConfigValue {}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

/// Dynamic configs of one topic, ordered by key.
pub type TopicConfig = BTreeMap<String, ConfigValue>;

/// A topic discovered on the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topic {
    pub name: String,
    pub partitions: u32,
    pub replication_factor: u32,
    pub config: TopicConfig,
}

/// A topic as declared in the desired-state catalog, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopicSpec {
    #[serde(default)]
    pub partitions: Option<i64>,
    #[serde(default)]
    pub replication_factor: Option<i64>,
    #[serde(default)]
    pub config: Option<TopicConfig>,
}

impl TopicSpec {
    /// Validate the declaration of topic `name`.
    pub fn validate(&self, name: &str) -> Result<DesiredTopic> {
        if name.is_empty() {
            return Err(Error::validation("topic", "name must not be empty"));
        }
        let positive = |field: &str, value: Option<i64>| -> Result<Option<u32>> {
            match value {
                None => Ok(None),
                Some(n) if n > 0 => u32::try_from(n).map(Some).map_err(|_| {
                    Error::validation(format!("topic {name}"), format!("{field} is too large"))
                }),
                Some(_) => Err(Error::validation(
                    format!("topic {name}"),
                    format!("the number of {field} should be greater than 0"),
                )),
            }
        };

        Ok(DesiredTopic {
            name: name.to_string(),
            partitions: positive("partitions", self.partitions)?,
            replication_factor: positive("replication_factor", self.replication_factor)?,
            config: self.config.clone(),
        })
    }
}

/// A validated, desired topic. `None` properties are left unmanaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredTopic {
    pub name: String,
    pub partitions: Option<u32>,
    pub replication_factor: Option<u32>,
    pub config: Option<TopicConfig>,
}

impl DesiredTopic {
    /// Partition count required for creation.
    pub fn partitions_for_create(&self) -> Result<u32> {
        self.partitions.ok_or_else(|| {
            Error::validation(
                format!("topic {}", self.name),
                "the 'partitions' parameter is mandatory when creating topics",
            )
        })
    }
}

/// An incremental config update: keys to (re)add and keys to delete.
///
/// This is a key set difference, not a value diff. Every desired pair is
/// re-added even when the cluster already holds the same value; only keys
/// missing from the desired map are deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub add: Vec<(String, ConfigValue)>,
    pub delete: Vec<String>,
}

impl ConfigUpdate {
    pub fn between(current: &TopicConfig, desired: &TopicConfig) -> Self {
        Self {
            add: desired
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            delete: current
                .keys()
                .filter(|k| !desired.contains_key(*k))
                .cloned()
                .collect(),
        }
    }

    /// Value for `--add-config`, e.g. `a=[1],c=[3]`.
    pub fn add_config_arg(&self) -> Option<String> {
        if self.add.is_empty() {
            return None;
        }
        Some(
            self.add
                .iter()
                .map(|(k, v)| format!("{k}=[{v}]"))
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Value for `--delete-config`, only when something must be deleted.
    pub fn delete_config_arg(&self) -> Option<String> {
        if self.delete.is_empty() {
            None
        } else {
            Some(self.delete.join(","))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.delete.is_empty()
    }
}

/// Render a config map as `key=value` lines, for display.
pub fn render_config(config: &TopicConfig) -> String {
    config
        .iter()
        .map(|(k, v)| format!("{k}={v}\n"))
        .collect()
}

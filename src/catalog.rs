//! Desired-state catalog (`catalog.toml`).
//!
//! The catalog is the boundary with whatever compiles desired state: it
//! lists ACLs, topics and connectors, each with an optional `ensure`.
//!
//! ```toml
//! [[acls]]
//! resource_type = "topic"
//! resource_name = "orders"
//! principal = "User:alice"
//! operation = "Read"
//! permission_type = "allow"
//!
//! [topics.orders]
//! partitions = 3
//! replication_factor = 2
//! config = { "retention.ms" = 604800000 }
//!
//! [connectors.local-file-sink]
//! config = { "connector.class" = "FileStreamSinkConnector", "tasks.max" = 1 }
//! ```

use anyhow::{Context, Result, bail};
use connectkit::{ConnectorConfig, ConnectorSpec};
use declarative::Ensure;
use kafkakit::{Acl, AclSpec, DesiredTopic, TopicSpec};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

/// Catalog as written on disk
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    #[serde(default)]
    pub acls: Vec<AclDeclaration>,
    #[serde(default)]
    pub topics: BTreeMap<String, TopicDeclaration>,
    #[serde(default)]
    pub connectors: BTreeMap<String, ConnectorDeclaration>,
}

pub type AclDeclaration = Declaration<AclSpec>;
pub type TopicDeclaration = Declaration<TopicSpec>;
pub type ConnectorDeclaration = Declaration<ConnectorSpec>;

/// One catalog entry: `ensure` plus the fields of its kind's spec
///
/// `ensure` is split off the table before the rest is read into the spec,
/// so the spec's own `deny_unknown_fields` still rejects misspelled keys.
#[derive(Debug)]
pub struct Declaration<S> {
    pub ensure: Ensure,
    pub spec: S,
}

impl<'de, S: DeserializeOwned> Deserialize<'de> for Declaration<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut table = toml::Table::deserialize(deserializer)?;
        let ensure = match table.remove("ensure") {
            Some(value) => value.try_into().map_err(D::Error::custom)?,
            None => Ensure::default(),
        };
        let spec = toml::Value::Table(table)
            .try_into()
            .map_err(D::Error::custom)?;
        Ok(Self { ensure, spec })
    }
}

/// A validated declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Declared<T> {
    pub ensure: Ensure,
    pub item: T,
}

/// Validated desired state, ready for planning
#[derive(Debug, Default)]
pub struct DesiredState {
    pub acls: Vec<Declared<Acl>>,
    pub topics: Vec<Declared<DesiredTopic>>,
    pub connectors: Vec<Declared<ConnectorConfig>>,
}

impl DesiredState {
    pub fn is_empty(&self) -> bool {
        self.acls.is_empty() && self.topics.is_empty() && self.connectors.is_empty()
    }

    pub fn total(&self) -> usize {
        self.acls.len() + self.topics.len() + self.connectors.len()
    }
}

impl Catalog {
    /// Load a catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read catalog {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validate every declaration, collecting all problems before failing
    pub fn validate(&self) -> Result<DesiredState> {
        let mut problems = Vec::new();
        let mut desired = DesiredState::default();

        let mut seen_acls = HashSet::new();
        for declaration in &self.acls {
            match declaration.spec.validate() {
                Ok(acl) => {
                    if !seen_acls.insert(acl.name()) {
                        problems.push(format!("duplicate ACL: {acl}"));
                        continue;
                    }
                    desired.acls.push(Declared {
                        ensure: declaration.ensure,
                        item: acl,
                    });
                }
                Err(e) => problems.push(e.to_string()),
            }
        }

        for (name, declaration) in &self.topics {
            match declaration.spec.validate(name) {
                Ok(topic) => desired.topics.push(Declared {
                    ensure: declaration.ensure,
                    item: topic,
                }),
                Err(e) => problems.push(e.to_string()),
            }
        }

        for (name, declaration) in &self.connectors {
            match declaration.spec.validate(name) {
                Ok(connector) => desired.connectors.push(Declared {
                    ensure: declaration.ensure,
                    item: connector,
                }),
                Err(e) => problems.push(e.to_string()),
            }
        }

        if !problems.is_empty() {
            bail!(
                "{} invalid declaration(s):\n  - {}",
                problems.len(),
                problems.join("\n  - ")
            );
        }
        Ok(desired)
    }
}

//! ACL model: validated desired ACLs, discovered entries and their identity.
//!
//! An ACL is a tuple of resource, principal, host, operation and permission.
//! It has no name of its own; its identity is a SHA-256 digest over the
//! normalized tuple, so two differently-cased declarations of the same ACL
//! always collapse onto one identity.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Resource name Kafka reports for cluster-level ACLs.
pub const CLUSTER_RESOURCE_NAME: &str = "kafka-cluster";

/// Kind of Kafka resource an ACL applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Topic,
    Group,
    DelegationToken,
    TransactionalId,
    Cluster,
}

impl ResourceKind {
    /// Lowercase token, as used in identities and catalogs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Topic => "topic",
            Self::Group => "group",
            Self::DelegationToken => "delegation_token",
            Self::TransactionalId => "transactional_id",
            Self::Cluster => "cluster",
        }
    }

    /// Parse a resource type, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "topic" => Some(Self::Topic),
            "group" => Some(Self::Group),
            "delegation_token" => Some(Self::DelegationToken),
            "transactional_id" => Some(Self::TransactionalId),
            "cluster" => Some(Self::Cluster),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resource an ACL applies to.
///
/// Only named kinds carry a name; `Cluster` always refers to the single
/// cluster resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AclResource {
    Topic(String),
    Group(String),
    DelegationToken(String),
    TransactionalId(String),
    Cluster,
}

impl AclResource {
    /// Build a resource from its kind and (for named kinds) its name.
    pub fn new(kind: ResourceKind, name: Option<String>) -> Result<Self> {
        let named = |name: Option<String>| {
            name.filter(|n| !n.is_empty()).ok_or_else(|| {
                Error::validation(
                    format!("{kind} ACL"),
                    "resource_name is required for this resource_type",
                )
            })
        };
        Ok(match kind {
            ResourceKind::Topic => Self::Topic(named(name)?),
            ResourceKind::Group => Self::Group(named(name)?),
            ResourceKind::DelegationToken => Self::DelegationToken(named(name)?),
            ResourceKind::TransactionalId => Self::TransactionalId(named(name)?),
            ResourceKind::Cluster => Self::Cluster,
        })
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Topic(_) => ResourceKind::Topic,
            Self::Group(_) => ResourceKind::Group,
            Self::DelegationToken(_) => ResourceKind::DelegationToken,
            Self::TransactionalId(_) => ResourceKind::TransactionalId,
            Self::Cluster => ResourceKind::Cluster,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Topic(n) | Self::Group(n) | Self::DelegationToken(n) | Self::TransactionalId(n) => {
                n
            }
            Self::Cluster => CLUSTER_RESOURCE_NAME,
        }
    }

    /// Command line selector for `kafka-acls`.
    pub fn selector_args(&self) -> Vec<String> {
        match self {
            Self::Cluster => vec!["--cluster".to_string()],
            named => vec![
                format!("--{}", named.kind().as_str().replace('_', "-")),
                named.name().to_string(),
            ],
        }
    }
}

/// How the resource name is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    #[default]
    Literal,
    Prefix,
    Match,
    Any,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Prefix => "prefix",
            Self::Match => "match",
            Self::Any => "any",
        }
    }

    /// Value for `--resource-pattern-type`; the tool spells prefix `prefixed`.
    pub fn cli_token(&self) -> &'static str {
        match self {
            Self::Prefix => "prefixed",
            other => other.as_str(),
        }
    }

    /// Parse a pattern type, ignoring case. `prefixed` is Kafka's spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "literal" => Some(Self::Literal),
            "prefix" | "prefixed" => Some(Self::Prefix),
            "match" => Some(Self::Match),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// ACL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operation {
    Read,
    Write,
    Create,
    Delete,
    Alter,
    Describe,
    ClusterAction,
    AlterConfigs,
    DescribeConfigs,
    IdempotentWrite,
    #[default]
    All,
}

impl Operation {
    pub const ALL: [Operation; 11] = [
        Self::Read,
        Self::Write,
        Self::Create,
        Self::Delete,
        Self::Alter,
        Self::Describe,
        Self::ClusterAction,
        Self::AlterConfigs,
        Self::DescribeConfigs,
        Self::IdempotentWrite,
        Self::All,
    ];

    /// PascalCase token, as passed to `--operation`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Write => "Write",
            Self::Create => "Create",
            Self::Delete => "Delete",
            Self::Alter => "Alter",
            Self::Describe => "Describe",
            Self::ClusterAction => "ClusterAction",
            Self::AlterConfigs => "AlterConfigs",
            Self::DescribeConfigs => "DescribeConfigs",
            Self::IdempotentWrite => "IdempotentWrite",
            Self::All => "All",
        }
    }

    /// Parse the exact PascalCase token.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

/// Whether an ACL grants or denies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    Allow,
    Deny,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Allow => "allow",
            Self::Deny => "deny",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allow" => Some(Self::Allow),
            "deny" => Some(Self::Deny),
            _ => None,
        }
    }
}

/// Convert a listing token such as `IDEMPOTENT_WRITE` to `IdempotentWrite`.
pub fn pascal_case(token: &str) -> String {
    token
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Identity of an ACL: SHA-256 hex digest of the normalized tuple.
pub fn identity(
    resource_type: &str,
    resource_name: &str,
    principal: &str,
    host: &str,
    operation: &str,
    permission: &str,
) -> String {
    let key = format!(
        "{}/{}/{}/{}/{}/{}",
        resource_type.to_ascii_lowercase(),
        resource_name,
        principal,
        host,
        operation,
        permission.to_ascii_lowercase()
    );
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

/// An ACL as declared in the desired-state catalog, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AclSpec {
    pub resource_type: String,
    #[serde(default)]
    pub resource_name: Option<String>,
    #[serde(default = "default_pattern_type")]
    pub resource_pattern_type: String,
    #[serde(default = "default_principal")]
    pub principal: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_operation")]
    pub operation: String,
    pub permission_type: String,
}

fn default_pattern_type() -> String {
    "literal".to_string()
}

fn default_principal() -> String {
    "User:*".to_string()
}

fn default_host() -> String {
    "*".to_string()
}

fn default_operation() -> String {
    "All".to_string()
}

impl AclSpec {
    /// Validate every property and produce a typed [`Acl`].
    pub fn validate(&self) -> Result<Acl> {
        let what = || match &self.resource_name {
            Some(name) => format!("ACL on {} {}", self.resource_type, name),
            None => format!("ACL on {}", self.resource_type),
        };

        let kind = ResourceKind::parse(&self.resource_type).ok_or_else(|| {
            Error::validation(
                what(),
                r#"resource_type must be one of "topic", "group", "delegation_token", "transactional_id", or "cluster""#,
            )
        })?;
        let pattern_type = PatternType::parse(&self.resource_pattern_type).ok_or_else(|| {
            Error::validation(
                what(),
                r#"resource_pattern_type must be one of "literal", "prefix", "match", or "any""#,
            )
        })?;
        let operation = Operation::parse(&self.operation).ok_or_else(|| {
            let allowed: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
            Error::validation(
                what(),
                format!("operation should be one of: {}", allowed.join(", ")),
            )
        })?;
        let permission = Permission::parse(&self.permission_type).ok_or_else(|| {
            Error::validation(what(), r#"permission_type should be either "allow" or "deny""#)
        })?;

        Ok(Acl {
            resource: AclResource::new(kind, self.resource_name.clone())?,
            pattern_type,
            principal: self.principal.clone(),
            host: self.host.clone(),
            operation,
            permission,
        })
    }
}

/// A validated, desired ACL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Acl {
    pub resource: AclResource,
    pub pattern_type: PatternType,
    pub principal: String,
    pub host: String,
    pub operation: Operation,
    pub permission: Permission,
}

impl Acl {
    /// Derived identity of this ACL.
    pub fn name(&self) -> String {
        identity(
            self.resource.kind().as_str(),
            self.resource.name(),
            &self.principal,
            &self.host,
            self.operation.as_str(),
            self.permission.as_str(),
        )
    }

    /// Whether a discovered entry is this ACL.
    pub fn matches(&self, entry: &AclEntry) -> bool {
        entry.resource_type == self.resource.kind().as_str()
            && entry.resource_name == self.resource.name()
            && entry.principal == self.principal
            && entry.host == self.host
            && entry.operation == self.operation.as_str()
            && entry.permission_type == self.permission.as_str()
    }
}

impl fmt::Display for Acl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} on {} {} from {}",
            self.permission.as_str(),
            self.principal,
            self.operation.as_str(),
            self.resource.kind(),
            self.resource.name(),
            self.host
        )
    }
}

/// An ACL discovered on the cluster.
///
/// Fields hold normalized listing tokens: lowercase resource type, pattern
/// type and permission, PascalCase operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AclEntry {
    pub name: String,
    pub resource_type: String,
    pub resource_name: String,
    pub resource_pattern_type: String,
    pub principal: String,
    pub host: String,
    pub operation: String,
    pub permission_type: String,
}

impl AclEntry {
    /// Build an entry from raw listing tokens, normalizing and hashing them.
    pub fn from_listing(
        resource_type: &str,
        resource_name: &str,
        pattern_type: &str,
        principal: &str,
        host: &str,
        operation: &str,
        permission: &str,
    ) -> Self {
        let resource_type = resource_type.to_ascii_lowercase();
        let operation = pascal_case(operation);
        let permission_type = permission.to_ascii_lowercase();
        Self {
            name: identity(
                &resource_type,
                resource_name,
                principal,
                host,
                &operation,
                &permission_type,
            ),
            resource_type,
            resource_name: resource_name.to_string(),
            resource_pattern_type: pattern_type.to_ascii_lowercase(),
            principal: principal.to_string(),
            host: host.to_string(),
            operation,
            permission_type,
        }
    }
}

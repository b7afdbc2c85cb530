//! Kafka ACL and topic reconciliation.
//!
//! This crate provides:
//! - Typed ACL and topic models with validation
//! - Parsers for `kafka-acls`, `kafka-topics` and `kafka-configs` output
//! - A [`Backend`] trait with a CLI implementation
//! - Matching and change computation for reconcilers
//!
//! # Example
//!
//! ```no_run
//! use kafkakit::{Backend, CliBackend, Settings};
//!
//! let backend = CliBackend::new(&Settings::default())?;
//! for acl in backend.list_acls()? {
//!     println!("{} {} {}", acl.principal, acl.operation, acl.resource_name);
//! }
//! # Ok::<(), kafkakit::Error>(())
//! ```

pub mod acl;
pub mod backend;
pub mod error;
pub mod parser;
pub mod reconcile;
pub mod runner;
pub mod settings;
pub mod topic;

pub use acl::{Acl, AclEntry, AclSpec};
pub use backend::Backend;
pub use backend::cli::CliBackend;
pub use error::{Error, ErrorCategory, Result};
pub use reconcile::{TopicChange, apply_topic_changes, find_acl, find_topic, topic_changes};
pub use settings::Settings;
pub use topic::{ConfigUpdate, ConfigValue, DesiredTopic, Topic, TopicConfig, TopicSpec};

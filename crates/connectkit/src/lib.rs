//! Kafka Connect connector config reconciliation.
//!
//! This crate provides:
//! - A YAML client config with optional TLS trust roots and client certificates
//! - The [`ConnectApi`] trait and a blocking REST client
//! - Text-based config comparison for reconcilers
//!
//! # Example
//!
//! ```no_run
//! use connectkit::{ClientConfig, ConnectApi, ConnectClient};
//! use std::path::Path;
//!
//! let config = ClientConfig::load(Path::new("/etc/kafkaform/connect.yaml"))?;
//! let client = ConnectClient::new(&config)?;
//! for connector in client.list()? {
//!     println!("{}: {} keys", connector.name, connector.config.len());
//! }
//! # Ok::<(), connectkit::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod reconcile;
pub mod types;

pub use client::{ConnectApi, ConnectClient};
pub use config::{ClientConfig, DEFAULT_CONFIG_PATH};
pub use error::{Error, ErrorCategory, Result};
pub use reconcile::{config_in_sync, find_connector};
pub use types::{Config, ConnectorConfig, ConnectorSpec};

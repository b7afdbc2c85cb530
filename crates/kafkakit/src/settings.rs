//! Connection settings for the Kafka command line tools.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How to reach the cluster and where the tools live.
///
/// Deserialized from the `[kafka]` table of `config.toml`; every field has a
/// default so an empty table is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `HOST:PORT` of a broker. Defaults to `$(hostname -f):9092`.
    pub bootstrap_server: Option<String>,
    /// ZooKeeper connect string for the topic and config tools on legacy
    /// clusters. When set it replaces `--bootstrap-server` for those tools.
    pub zookeeper: Option<String>,
    /// Client properties passed as `--command-config` when the file exists.
    pub command_config: PathBuf,
    pub acls_command: String,
    pub topics_command: String,
    pub configs_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bootstrap_server: None,
            zookeeper: None,
            command_config: PathBuf::from("/etc/kafka/client.properties"),
            acls_command: "kafka-acls".to_string(),
            topics_command: "/bin/kafka-topics".to_string(),
            configs_command: "/bin/kafka-configs".to_string(),
        }
    }
}

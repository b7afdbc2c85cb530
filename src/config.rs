//! Settings file (`config.toml`).
//!
//! ```toml
//! [kafka]
//! bootstrap_server = "kafka1.example.com:9092"
//! command_config = "/etc/kafka/client.properties"
//!
//! [connect]
//! config_file = "/etc/kafkaform/connect.yaml"
//! ```
//!
//! A missing file means all defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub kafka: kafkakit::Settings,
    pub connect: ConnectSettings,
}

/// Where the Connect client config lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectSettings {
    pub config_file: PathBuf,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(connectkit::DEFAULT_CONFIG_PATH),
        }
    }
}

impl Config {
    /// Load settings from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::settings_file()?)
    }

    /// Load settings from a file, falling back to defaults when it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid settings in {}", path.display()))?;
        config.expand_paths();
        log::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    fn expand_paths(&mut self) {
        let expand = |p: &Path| paths::expand(&p.to_string_lossy());
        self.kafka.command_config = expand(&self.kafka.command_config);
        self.connect.config_file = expand(&self.connect.config_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.kafka.acls_command, "kafka-acls");
        assert_eq!(
            config.connect.config_file,
            PathBuf::from("/etc/kafkaform/connect.yaml")
        );
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[kafka]\nbootstrap_server = \"broker:9093\"\ncommand_config = \"~/client.properties\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.kafka.bootstrap_server.as_deref(), Some("broker:9093"));
        assert_eq!(
            config.kafka.command_config,
            dirs::home_dir().unwrap().join("client.properties")
        );
        assert_eq!(config.kafka.topics_command, "/bin/kafka-topics");
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[zookeeper]\nhosts = \"zk1\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

//! Connect client configuration.
//!
//! ```yaml
//! endpoint: https://connect.example.com:8083
//! insecure: false
//! ca_file: /etc/kafkaform/ca.pem
//! cert_file: /etc/kafkaform/client.pem
//! key_file: /etc/kafkaform/client.key
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the Connect client config.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/kafkaform/connect.yaml";

/// How to reach a Connect worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the worker's REST API.
    pub endpoint: String,
    /// Skip certificate verification for https endpoints.
    #[serde(default)]
    pub insecure: bool,
    /// PEM bundle used as the trust root.
    #[serde(default)]
    pub ca_file: Option<PathBuf>,
    /// PEM client certificate, used together with `key_file`.
    #[serde(default)]
    pub cert_file: Option<PathBuf>,
    /// PEM private key for `cert_file`.
    #[serde(default)]
    pub key_file: Option<PathBuf>,
}

/// On-disk shape, with `endpoint` optional so its absence gets a clear error.
#[derive(Deserialize)]
struct RawClientConfig {
    endpoint: Option<String>,
    #[serde(default)]
    insecure: bool,
    ca_file: Option<PathBuf>,
    cert_file: Option<PathBuf>,
    key_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Load and validate a YAML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(path, &content)
    }

    /// Parse YAML content; `path` is only used in error messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let raw: RawClientConfig =
            serde_yaml::from_str(content).map_err(|e| Error::config(path, e.to_string()))?;

        let endpoint = raw
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| Error::config(path, "endpoint must be defined"))?;
        let endpoint = endpoint.trim_end_matches('/').to_string();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(Error::config(
                path,
                format!("endpoint must be an http:// or https:// URL, got {endpoint}"),
            ));
        }

        Ok(Self {
            endpoint,
            insecure: raw.insecure,
            ca_file: raw.ca_file,
            cert_file: raw.cert_file,
            key_file: raw.key_file,
        })
    }

    pub fn is_https(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    /// Client certificate and key, only when both are configured.
    pub fn client_identity(&self) -> Option<(&Path, &Path)> {
        match (&self.cert_file, &self.key_file) {
            (Some(cert), Some(key)) => Some((cert.as_path(), key.as_path())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_full_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "endpoint: https://connect.example.com:8083/\ninsecure: false\nca_file: /etc/ca.pem\ncert_file: /etc/client.pem\nkey_file: /etc/client.key"
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.endpoint, "https://connect.example.com:8083");
        assert!(config.is_https());
        assert_eq!(config.ca_file.as_deref(), Some(Path::new("/etc/ca.pem")));
        assert_eq!(
            config.client_identity(),
            Some((Path::new("/etc/client.pem"), Path::new("/etc/client.key")))
        );
    }

    #[test]
    fn test_minimal_config() {
        let config =
            ClientConfig::parse(Path::new("c.yaml"), "endpoint: http://localhost:8083").unwrap();
        assert!(!config.insecure);
        assert!(!config.is_https());
        assert_eq!(config.client_identity(), None);
    }

    #[test]
    fn test_cert_without_key_is_no_identity() {
        let config = ClientConfig::parse(
            Path::new("c.yaml"),
            "endpoint: https://c:8083\ncert_file: /etc/client.pem",
        )
        .unwrap();
        assert_eq!(config.client_identity(), None);
    }

    #[test]
    fn test_missing_endpoint() {
        let err = ClientConfig::parse(Path::new("c.yaml"), "insecure: true").unwrap_err();
        assert!(err.to_string().contains("endpoint must be defined"));
    }

    #[test]
    fn test_bad_scheme() {
        let err = ClientConfig::parse(Path::new("c.yaml"), "endpoint: ftp://c").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = ClientConfig::parse(Path::new("c.yaml"), "endpoint: [unclosed").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}

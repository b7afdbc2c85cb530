//! Centralized path resolution for kafkaform
//!
//! # Environment Variables
//!
//! - `KAFKAFORM_CONFIG_DIR` - Override config directory (e.g., `/etc/kafkaform`)
//!
//! # Path Resolution Priority
//!
//! For config_dir():
//! 1. `KAFKAFORM_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/kafkaform` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\kafkaform`
//!    - macOS/Linux: `~/.config/kafkaform`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "KAFKAFORM_CONFIG_DIR";

const APP_DIR: &str = "kafkaform";

/// Get the kafkaform config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join(APP_DIR);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            let path = app_data.join(APP_DIR);
            log::debug!("Using Windows config dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR);
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Path of the settings file (`config.toml`)
pub fn settings_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Path of the default desired-state catalog (`catalog.toml`)
pub fn catalog_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("catalog.toml"))
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

//! Command implementations

pub mod list;
pub mod reconcile;
pub mod validate;

use anyhow::Result;
use std::path::PathBuf;

use crate::Context;
use crate::catalog::{Catalog, DesiredState};
use crate::config::Config;
use crate::paths;

/// Settings from `--config` or the config directory
fn load_config(ctx: &Context) -> Result<Config> {
    match &ctx.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Catalog path from `--catalog` or the config directory
fn catalog_path(ctx: &Context) -> Result<PathBuf> {
    match &ctx.catalog {
        Some(path) => Ok(path.clone()),
        None => paths::catalog_file(),
    }
}

/// Load and validate the catalog
fn load_desired(ctx: &Context) -> Result<DesiredState> {
    let path = catalog_path(ctx)?;
    log::debug!("Loading catalog from {}", path.display());
    Catalog::load(&path)?.validate()
}

//! `validate` - check the catalog offline

use anyhow::Result;
use declarative::Ensure;

use crate::Context;
use crate::catalog::{Declared, DesiredState};
use crate::ui;

use super::{catalog_path, load_desired};

pub fn run(ctx: &Context) -> Result<()> {
    let desired = load_desired(ctx)?;

    ui::success(&format!(
        "{} is valid ({} declarations)",
        catalog_path(ctx)?.display(),
        desired.total()
    ));
    for (kind, present, absent) in counts(&desired) {
        ui::kv(kind, &format!("{present} present, {absent} absent"));
    }
    Ok(())
}

fn split<T>(items: &[Declared<T>]) -> (usize, usize) {
    let absent = items.iter().filter(|d| d.ensure == Ensure::Absent).count();
    (items.len() - absent, absent)
}

fn counts(desired: &DesiredState) -> Vec<(&'static str, usize, usize)> {
    let mut rows = Vec::new();
    for (kind, (present, absent)) in [
        ("acls", split(&desired.acls)),
        ("topics", split(&desired.topics)),
        ("connectors", split(&desired.connectors)),
    ] {
        if present + absent > 0 {
            rows.push((kind, present, absent));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn ctx_for(catalog: &str) -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, catalog).unwrap();
        let ctx = Context {
            verbose: 0,
            quiet: true,
            catalog: Some(path),
            config: Some(dir.path().join("config.toml")),
        };
        (dir, ctx)
    }

    #[test]
    fn test_valid_catalog() {
        let (_dir, ctx) = ctx_for(
            "[topics.orders]\npartitions = 3\n\n[topics.legacy]\nensure = \"absent\"\n",
        );
        run(&ctx).unwrap();

        let desired = load_desired(&ctx).unwrap();
        assert_eq!(counts(&desired), vec![("topics", 1, 1)]);
    }

    #[test]
    fn test_invalid_catalog_fails() {
        let (_dir, ctx) = ctx_for("[topics.orders]\npartitions = -1\n");
        assert!(run(&ctx).is_err());
    }

    #[test]
    fn test_missing_catalog_fails() {
        let (dir, mut ctx) = ctx_for("");
        ctx.catalog = Some(dir.path().join("nope.toml"));
        let err = run(&ctx).unwrap_err();
        assert!(err.to_string().contains("Could not read catalog"));
    }
}

//! `list` - show what currently exists

use anyhow::{Context as _, Result};
use colored::Colorize;
use connectkit::{ClientConfig, ConnectApi, ConnectClient, ConnectorConfig};
use kafkakit::{AclEntry, Backend, CliBackend, Topic};
use serde::Serialize;

use crate::Context;
use crate::cli::ListKind;
use crate::{progress, ui};

use super::load_config;

pub fn run(ctx: &Context, kind: ListKind, json: bool) -> Result<()> {
    let config = load_config(ctx)?;

    match kind {
        ListKind::Acls => {
            let backend = CliBackend::new(&config.kafka)?;
            let acls = listed("ACLs", || backend.list_acls())?;
            if json {
                return print_json(&acls);
            }
            ui::header(&format!("ACLs ({})", acls.len()));
            for acl in &acls {
                println!("  {}", format_acl(acl));
            }
        }
        ListKind::Topics => {
            let backend = CliBackend::new(&config.kafka)?;
            let topics = listed("topics", || backend.list_topics())?;
            if json {
                return print_json(&topics);
            }
            ui::header(&format!("Topics ({})", topics.len()));
            for topic in &topics {
                print_topic(topic);
            }
        }
        ListKind::Connectors => {
            let client = ConnectClient::new(&ClientConfig::load(&config.connect.config_file)?)?;
            let connectors = listed("connectors", || client.list())?;
            if json {
                return print_json(&connectors);
            }
            ui::header(&format!("Connectors ({})", connectors.len()));
            for connector in &connectors {
                println!("  {}", format_connector(connector));
            }
        }
    }
    Ok(())
}

fn listed<T, E, F>(what: &str, list: F) -> Result<Vec<T>>
where
    F: FnOnce() -> std::result::Result<Vec<T>, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let pb = progress::spinner(&format!("Listing {what}..."));
    let result = list();
    pb.finish_and_clear();
    result.with_context(|| format!("Could not list {what}"))
}

fn print_json<T: Serialize>(items: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(items)?);
    Ok(())
}

fn format_acl(acl: &AclEntry) -> String {
    let permission = if acl.permission_type == "deny" {
        acl.permission_type.red()
    } else {
        acl.permission_type.green()
    };
    format!(
        "{} {} {} on {} {} ({}) from {}",
        permission,
        acl.principal,
        acl.operation,
        acl.resource_type,
        acl.resource_name.bold(),
        acl.resource_pattern_type,
        acl.host
    )
}

fn print_topic(topic: &Topic) {
    println!(
        "  {} {}",
        topic.name.bold(),
        format!(
            "partitions={} replication_factor={}",
            topic.partitions, topic.replication_factor
        )
        .dimmed()
    );
    for (key, value) in &topic.config {
        ui::kv(&format!("  {key}"), &value.to_string());
    }
}

fn format_connector(connector: &ConnectorConfig) -> String {
    let class = connector
        .config
        .get("connector.class")
        .and_then(|v| v.as_str())
        .unwrap_or("?");
    format!("{} {}", connector.name.bold(), class.dimmed())
}

//! Execution planner - turns validated desired state into resources

use anyhow::{Context, Result, bail};
use connectkit::{ClientConfig, ConnectApi, ConnectClient};
use declarative::{ExecutionPlan, resolve_alias};
use kafkakit::{Backend, CliBackend};
use std::sync::Arc;

use crate::catalog::DesiredState;
use crate::config::Config;
use crate::progress;
use crate::resource::{KafkaAcl, KafkaConnector, KafkaTopic};

/// Handles on the systems a plan acts on
#[derive(Default)]
pub struct Clients {
    pub kafka: Option<Arc<dyn Backend>>,
    pub connect: Option<Arc<dyn ConnectApi>>,
}

impl Clients {
    /// Set up only the clients the desired state needs
    pub fn for_state(config: &Config, desired: &DesiredState) -> Result<Self> {
        let mut clients = Self::default();

        if !desired.acls.is_empty() || !desired.topics.is_empty() {
            let backend = CliBackend::new(&config.kafka).context("Could not set up Kafka tools")?;
            clients.kafka = Some(Arc::new(backend));
        }

        if !desired.connectors.is_empty() {
            let client_config = ClientConfig::load(&config.connect.config_file)?;
            let client = ConnectClient::new(&client_config)?;
            log::debug!("Using Connect endpoint {}", client.endpoint());
            clients.connect = Some(Arc::new(client));
        }

        Ok(clients)
    }
}

/// Narrow the desired state to the kind named by a `type` or `type.name` target
///
/// Name filtering happens later on the plan, since names only exist once
/// declarations are resources.
pub fn scope(mut desired: DesiredState, target: Option<&str>) -> Result<DesiredState> {
    let Some(target) = target else {
        return Ok(desired);
    };
    let kind = target.split_once('.').map_or(target, |(kind, _)| kind);

    match resolve_alias(kind).unwrap_or(kind) {
        "kafka_acl" => {
            desired.topics.clear();
            desired.connectors.clear();
        }
        "kafka_topic" => {
            desired.acls.clear();
            desired.connectors.clear();
        }
        "kafka_connector_config" => {
            desired.acls.clear();
            desired.topics.clear();
        }
        _ => bail!("Unknown target '{kind}' (expected acls, topics or connectors)"),
    }
    Ok(desired)
}

/// Build the plan, listing each kind once
///
/// Resources are ordered ACLs, then topics, then connectors.
pub fn build_plan(desired: DesiredState, clients: &Clients) -> Result<ExecutionPlan> {
    let mut plan = ExecutionPlan::new();

    if !desired.acls.is_empty() || !desired.topics.is_empty() {
        let Some(backend) = &clients.kafka else {
            bail!("No Kafka backend available for ACLs and topics");
        };

        if !desired.acls.is_empty() {
            let pb = progress::spinner("Listing ACLs...");
            let existing = backend.list_acls();
            pb.finish_and_clear();
            let existing = existing.context("Could not list ACLs")?;
            log::info!("Found {} ACLs on the cluster", existing.len());

            for declared in desired.acls {
                plan.add_resource(Box::new(KafkaAcl::new(
                    declared.item,
                    declared.ensure,
                    &existing,
                    Arc::clone(backend),
                )));
            }
        }

        if !desired.topics.is_empty() {
            let pb = progress::spinner("Listing topics...");
            let existing = backend.list_topics();
            pb.finish_and_clear();
            let existing = existing.context("Could not list topics")?;
            log::info!("Found {} topics on the cluster", existing.len());

            for declared in desired.topics {
                plan.add_resource(Box::new(KafkaTopic::new(
                    declared.item,
                    declared.ensure,
                    &existing,
                    Arc::clone(backend),
                )));
            }
        }
    }

    if !desired.connectors.is_empty() {
        let Some(api) = &clients.connect else {
            bail!("No Connect client available for connectors");
        };

        let pb = progress::spinner("Listing connectors...");
        let existing = api.list();
        pb.finish_and_clear();
        let existing = existing.context("Could not list connectors")?;
        log::info!("Found {} connectors on the worker", existing.len());

        for declared in desired.connectors {
            plan.add_resource(Box::new(KafkaConnector::new(
                declared.item,
                declared.ensure,
                &existing,
                Arc::clone(api),
            )));
        }
    }

    Ok(plan)
}

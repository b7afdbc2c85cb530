//! Backend driving `kafka-acls`, `kafka-topics` and `kafka-configs`.

use crate::acl::{Acl, AclEntry};
use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::parser;
use crate::runner::{CommandRunner, ProcessRunner};
use crate::settings::Settings;
use crate::topic::{ConfigUpdate, DesiredTopic, Topic};
use std::path::PathBuf;

/// Default broker port used when the bootstrap server is derived from the host name.
const DEFAULT_PORT: u16 = 9092;

/// Backend that shells out to the Kafka command line tools.
pub struct CliBackend<R: CommandRunner = ProcessRunner> {
    runner: R,
    acls_command: String,
    topics_command: String,
    configs_command: String,
    bootstrap_server: String,
    zookeeper: Option<String>,
    command_config: PathBuf,
}

impl CliBackend<ProcessRunner> {
    /// Create a backend running real processes.
    ///
    /// Each tool is looked up on `PATH` when it first runs, so a catalog
    /// with only topics never needs `kafka-acls`.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_runner(ProcessRunner, settings)
    }
}

impl<R: CommandRunner> CliBackend<R> {
    /// Create a backend over a custom runner (useful for testing).
    pub fn with_runner(runner: R, settings: &Settings) -> Result<Self> {
        let bootstrap_server = match &settings.bootstrap_server {
            Some(server) => server.clone(),
            None => format!("{}:{DEFAULT_PORT}", local_fqdn(&runner)?),
        };
        log::debug!("Using bootstrap server {bootstrap_server}");

        Ok(Self {
            runner,
            acls_command: settings.acls_command.clone(),
            topics_command: settings.topics_command.clone(),
            configs_command: settings.configs_command.clone(),
            bootstrap_server,
            zookeeper: settings.zookeeper.clone(),
            command_config: settings.command_config.clone(),
        })
    }

    pub fn bootstrap_server(&self) -> &str {
        &self.bootstrap_server
    }

    /// Broker connection arguments, plus client credentials when present.
    fn connection_args(&self) -> Vec<String> {
        let mut args = vec!["--bootstrap-server".to_string(), self.bootstrap_server.clone()];
        self.push_command_config(&mut args);
        args
    }

    /// Connection arguments for the topic and config tools, which can still
    /// talk to ZooKeeper on legacy clusters.
    fn topic_connection_args(&self) -> Vec<String> {
        match &self.zookeeper {
            Some(zookeeper) => vec!["--zookeeper".to_string(), zookeeper.clone()],
            None => self.connection_args(),
        }
    }

    fn push_command_config(&self, args: &mut Vec<String>) {
        if self.runner.file_exists(&self.command_config) {
            args.push("--command-config".to_string());
            args.push(self.command_config.display().to_string());
        }
    }

    /// Arguments for adding or removing an ACL.
    fn acl_args(&self, mode: &str, acl: &Acl) -> Vec<String> {
        let permission = acl.permission.as_str();
        let mut args = self.connection_args();
        args.extend([mode.to_string(), "--force".to_string()]);
        args.extend(acl.resource.selector_args());
        args.extend([
            format!("--{permission}-principal"),
            acl.principal.clone(),
            format!("--{permission}-host"),
            acl.host.clone(),
            "--resource-pattern-type".to_string(),
            acl.pattern_type.cli_token().to_string(),
            "--operation".to_string(),
            acl.operation.as_str().to_string(),
        ]);
        args
    }
}

impl<R: CommandRunner> Backend for CliBackend<R> {
    fn list_acls(&self) -> Result<Vec<AclEntry>> {
        let mut args = self.connection_args();
        args.push("--list".to_string());
        let output = self
            .runner
            .run(&self.acls_command, &args)
            .map_err(Error::during("list ACLs"))?;
        parser::parse_acl_listing(&output)
    }

    fn create_acl(&self, acl: &Acl) -> Result<()> {
        log::info!("Creating ACL: {acl}");
        self.runner
            .run(&self.acls_command, &self.acl_args("--add", acl))
            .map_err(Error::during("create ACL"))?;
        Ok(())
    }

    fn delete_acl(&self, acl: &Acl) -> Result<()> {
        log::info!("Deleting ACL: {acl}");
        self.runner
            .run(&self.acls_command, &self.acl_args("--remove", acl))
            .map_err(Error::during("delete ACL"))?;
        Ok(())
    }

    fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut config_args = self.topic_connection_args();
        config_args.extend(["--describe", "--entity-type", "topics"].map(String::from));
        let configs_output = self
            .runner
            .run(&self.configs_command, &config_args)
            .map_err(Error::during("describe topic configs"))?;
        let configs = parser::parse_topic_configs(&configs_output)?;

        let mut topic_args = self.topic_connection_args();
        topic_args.push("--describe".to_string());
        let topics_output = self
            .runner
            .run(&self.topics_command, &topic_args)
            .map_err(Error::during("describe topics"))?;
        let descriptions = parser::parse_topic_descriptions(&topics_output)?;

        Ok(parser::join_topics(descriptions, configs))
    }

    fn create_topic(&self, topic: &DesiredTopic) -> Result<()> {
        let partitions = topic.partitions_for_create()?;

        let mut args = self.topic_connection_args();
        args.extend(["--partitions".to_string(), partitions.to_string()]);
        if let Some(replication_factor) = topic.replication_factor {
            args.extend([
                "--replication-factor".to_string(),
                replication_factor.to_string(),
            ]);
        }
        args.extend(["--create".to_string(), "--topic".to_string(), topic.name.clone()]);
        for (key, value) in topic.config.iter().flatten() {
            args.extend(["--config".to_string(), format!("{key}={value}")]);
        }

        log::info!("Creating topic {}", topic.name);
        self.runner
            .run(&self.topics_command, &args)
            .map_err(Error::during("create topic"))?;
        Ok(())
    }

    fn delete_topic(&self, name: &str) -> Result<()> {
        let mut args = self.topic_connection_args();
        args.extend(["--delete".to_string(), "--topic".to_string(), name.to_string()]);

        log::info!("Deleting topic {name}");
        self.runner
            .run(&self.topics_command, &args)
            .map_err(Error::during("delete topic"))?;
        Ok(())
    }

    fn alter_topic_config(&self, name: &str, update: &ConfigUpdate) -> Result<()> {
        if update.is_empty() {
            log::debug!("No config changes for topic {name}");
            return Ok(());
        }

        let mut args = self.topic_connection_args();
        args.extend(
            ["--alter", "--entity-type", "topics", "--entity-name", name].map(String::from),
        );
        if let Some(add) = update.add_config_arg() {
            args.extend(["--add-config".to_string(), add]);
        }
        if let Some(delete) = update.delete_config_arg() {
            args.extend(["--delete-config".to_string(), delete]);
        }

        log::info!("Updating config of topic {name}");
        self.runner
            .run(&self.configs_command, &args)
            .map_err(Error::during("update topic config"))?;
        Ok(())
    }
}

/// Fully qualified name of this host, as reported by `hostname -f`.
fn local_fqdn<R: CommandRunner>(runner: &R) -> Result<String> {
    let name = runner
        .run("hostname", &["-f".to_string()])
        .map_err(Error::during("determine the local host name"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::CommandFailed {
            message: "hostname -f printed nothing".to_string(),
            stderr: String::new(),
        });
    }
    Ok(name.to_string())
}

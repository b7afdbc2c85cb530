//! Parsers for the text printed by the Kafka command line tools.
//!
//! Each listing has exactly one parsing function here. They are pure: the
//! backend runs the command and hands the captured stdout over.
//!
//! ```text
//! Current ACLs for resource `ResourcePattern(resourceType=TOPIC, name=orders, patternType=LITERAL)`:
//!     (principal=User:alice, host=*, operation=READ, permissionType=ALLOW)
//!
//! Dynamic configs for topic orders are:
//!   retention.ms=1000 sensitive=false synonyms={DYNAMIC_TOPIC_CONFIG:retention.ms=1000}
//!
//! Topic: orders  TopicId: 3vJ...  PartitionCount: 3  ReplicationFactor: 2  Configs: retention.ms=1000
//! ```

use crate::acl::AclEntry;
use crate::error::{Error, Result};
use crate::topic::{ConfigValue, Topic, TopicConfig};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

const ACL_LISTING: &str = "kafka-acls --list";
const CONFIG_LISTING: &str = "kafka-configs --describe";
const TOPIC_LISTING: &str = "kafka-topics --describe";

static ACL_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Current ACLs for resource\s+").expect("valid ACL block regex")
});

static ACL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^`ResourcePattern\(resourceType=([^,]*),\s+name=(.*),\s+patternType=([^,)]*)\)`:$",
    )
    .expect("valid ACL header regex")
});

static ACL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\(principal=(.*),\s+host=([^,]*),\s+operation=([^,]*),\s+permissionType=([^,)]*)\)$",
    )
    .expect("valid ACL line regex")
});

static CONFIG_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^Dynamic configs for topic (.*) are:\s*$").expect("valid config header regex")
});

static CONFIG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s+([^=;\s]+)=([^;\s]*)\s+.*$").expect("valid config line regex")
});

static TOPIC_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^Topic:\s+([0-9a-zA-Z_.-]+)\s+(?:TopicId:\s+\S+\s+)?PartitionCount:\s+([0-9]+)\s+ReplicationFactor:\s+([0-9]+)\s+Configs:\s*(.*)$",
    )
    .expect("valid topic regex")
});

/// Parse `kafka-acls --list` output into one entry per ACL.
///
/// Blocks that do not start with a resource pattern header are skipped.
/// Inside a block every non-blank line must be an ACL; anything else fails
/// the whole listing.
pub fn parse_acl_listing(output: &str) -> Result<Vec<AclEntry>> {
    let mut acls = Vec::new();

    for block in ACL_BLOCK_START.split(output) {
        if block.is_empty() || !block.starts_with("`ResourcePattern") {
            continue;
        }

        let mut lines = block.lines().map(str::trim);
        let header = lines.next().unwrap_or_default();
        let captures = ACL_HEADER
            .captures(header)
            .ok_or_else(|| Error::parse(ACL_LISTING, header, "malformed resource pattern"))?;
        let (resource_type, resource_name, pattern_type) =
            (&captures[1], &captures[2], &captures[3]);

        for line in lines.filter(|l| !l.is_empty()) {
            let acl = ACL_LINE
                .captures(line)
                .ok_or_else(|| Error::parse(ACL_LISTING, line, "malformed ACL entry"))?;
            acls.push(AclEntry::from_listing(
                resource_type,
                resource_name,
                pattern_type,
                &acl[1],
                &acl[2],
                &acl[3],
                &acl[4],
            ));
        }
    }

    Ok(acls)
}

/// Parse `kafka-configs --describe --entity-type topics` output into the
/// dynamic configs of each topic.
pub fn parse_topic_configs(output: &str) -> Result<HashMap<String, TopicConfig>> {
    let mut configs: HashMap<String, TopicConfig> = HashMap::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        if let Some(header) = CONFIG_HEADER.captures(line) {
            let topic = header[1].to_string();
            configs.entry(topic.clone()).or_default();
            current = Some(topic);
            continue;
        }

        if let Some(entry) = CONFIG_LINE.captures(line) {
            let topic = current
                .as_ref()
                .ok_or_else(|| Error::parse(CONFIG_LISTING, line, "config entry before any topic"))?;
            configs
                .entry(topic.clone())
                .or_default()
                .insert(entry[1].to_string(), ConfigValue::from_listing(&entry[2]));
        }
    }

    Ok(configs)
}

/// Parse `kafka-topics --describe` output, keeping the per-topic summary
/// lines and discarding partition detail lines.
pub fn parse_topic_descriptions(output: &str) -> Result<Vec<(String, u32, u32)>> {
    output
        .lines()
        .filter_map(|line| TOPIC_LINE.captures(line).map(|c| (line, c)))
        .map(|(line, c)| {
            let count = |i: usize| {
                c[i].parse::<u32>()
                    .map_err(|_| Error::parse(TOPIC_LISTING, line, "count out of range"))
            };
            Ok((c[1].to_string(), count(2)?, count(3)?))
        })
        .collect()
}

/// Join topic descriptions with their dynamic configs. Topics without a
/// config section get an empty map.
pub fn join_topics(
    descriptions: Vec<(String, u32, u32)>,
    mut configs: HashMap<String, TopicConfig>,
) -> Vec<Topic> {
    descriptions
        .into_iter()
        .map(|(name, partitions, replication_factor)| Topic {
            config: configs.remove(&name).unwrap_or_default(),
            name,
            partitions,
            replication_factor,
        })
        .collect()
}

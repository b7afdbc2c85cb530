use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kafkaform")]
#[command(author = "Alberto Cavalcante")]
#[command(version)]
#[command(about = "Converge Kafka ACLs, topics and Connect connectors to a declared state", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Desired-state catalog (defaults to catalog.toml in the config directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Settings file (defaults to config.toml in the config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Preview what apply would change
    Diff(DiffArgs),

    /// Make the cluster and the Connect worker match the catalog
    Apply(ApplyArgs),

    /// List what currently exists
    List(ListArgs),

    /// Validate the catalog without contacting anything
    Validate,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct DiffArgs {
    /// Only this kind or resource: acls, topics.orders, connectors.sink
    pub target: Option<String>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Only this kind or resource: acls, topics.orders, connectors.sink
    pub target: Option<String>,

    /// Dry run - show what would be done
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Apply without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ListKind {
    Acls,
    Topics,
    Connectors,
}

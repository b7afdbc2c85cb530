mod catalog;
mod cli;
mod commands;
mod config;
mod engine;
mod paths;
mod progress;
mod resource;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        catalog: cli.catalog,
        config: cli.config,
    };

    match run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            if let Some((description, advice)) = category_hint(&e) {
                ui::dim(&format!("{description}: {advice}"));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &Context, command: Command) -> Result<()> {
    match command {
        Command::Diff(args) => commands::reconcile::diff(ctx, args.target.as_deref()),
        Command::Apply(args) => commands::reconcile::apply(
            ctx,
            args.target.as_deref(),
            args.dry_run,
            args.yes,
        ),
        Command::List(args) => commands::list::run(ctx, args.kind, args.json),
        Command::Validate => commands::validate::run(ctx),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "kafkaform", &mut io::stdout());
            Ok(())
        }
    }
}

/// Description and advice for the first categorized library error in the chain
fn category_hint(err: &anyhow::Error) -> Option<(&'static str, &'static str)> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<kafkakit::Error>() {
            let category = e.category();
            Some((category.description(), category.advice()))
        } else if let Some(e) = cause.downcast_ref::<connectkit::Error>() {
            let category = e.category();
            Some((category.description(), category.advice()))
        } else {
            None
        }
    })
}

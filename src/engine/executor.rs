//! Execution engine - runs a plan with terminal confirmation and progress

use anyhow::{Result, bail};
use colored::Colorize;
use declarative::{
    ApplyResult, ConfirmCallback, ExecuteSummary, ExecutionPlan, ProgressCallback, compute_diffs,
};
use indicatif::ProgressBar;
use std::io::IsTerminal;

use crate::progress;

use super::differ::display_diff;

/// Options for execution (includes `yes` for confirmation skip)
#[derive(Debug, Clone, Default)]
pub struct ExecuteOptions {
    /// Don't make changes, just show what would happen
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Asks on the terminal unless `--yes` was given
struct TerminalConfirm {
    yes: bool,
}

impl ConfirmCallback for TerminalConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        if self.yes {
            return Ok(true);
        }
        if !std::io::stdin().is_terminal() {
            bail!("Refusing to apply changes without confirmation; pass --yes to proceed");
        }
        Ok(dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }
}

/// Progress bar over the changed resources
struct BarProgress {
    pb: Option<ProgressBar>,
    verbose: bool,
}

impl ProgressCallback for BarProgress {
    fn on_start(&mut self, count: usize) {
        println!();
        println!("  {} Applying {} changes...", "→".cyan(), count);
        self.pb = Some(progress::bar(count as u64, "Applying"));
    }

    fn on_resource_start(&mut self, _id: &str, description: &str) {
        if let Some(pb) = &self.pb {
            pb.set_message(description.to_string());
        }
    }

    fn on_resource_complete(&mut self, id: &str, result: &ApplyResult) {
        let Some(pb) = &self.pb else { return };
        match result {
            ApplyResult::Failed { error } => {
                pb.println(format!("  {} {}: {}", "✗".red(), id, error));
            }
            ApplyResult::Created | ApplyResult::Modified | ApplyResult::Removed
                if self.verbose =>
            {
                pb.println(format!("  {} {}", "✓".green(), id));
            }
            _ => {}
        }
        pb.inc(1);
    }

    fn on_complete(&mut self) {
        if let Some(pb) = self.pb.take() {
            pb.finish_and_clear();
        }
    }
}

/// Show the diff for a plan, confirm, and apply the changed resources
pub fn execute(plan: ExecutionPlan, opts: &ExecuteOptions) -> Result<ExecuteSummary> {
    let diffs = compute_diffs(&plan.resources)?;
    display_diff(&diffs);

    let mut progress = BarProgress {
        pb: None,
        verbose: opts.verbose,
    };
    let mut confirm = TerminalConfirm { yes: opts.yes };
    let summary = declarative::execute(
        plan,
        &declarative::ExecuteOptions {
            dry_run: opts.dry_run,
        },
        &mut progress,
        &mut confirm,
    )?;

    if summary.skipped > 0 && summary.total_changes() == 0 && summary.failed == 0 {
        println!();
        if opts.dry_run {
            println!("  {} Dry run - no changes made", "ℹ".blue());
        } else {
            println!("  {} Aborted", "✗".red());
        }
        return Ok(summary);
    }

    if summary.total_changes() > 0 || summary.failed > 0 {
        print_summary(&summary);
    }
    Ok(summary)
}

/// Print a one-line summary of an apply
pub fn print_summary(summary: &ExecuteSummary) {
    println!();
    let mut parts = vec![
        format!("{} created", summary.created.to_string().green()),
        format!("{} modified", summary.modified.to_string().yellow()),
        format!("{} removed", summary.removed.to_string().red()),
    ];
    if summary.skipped > 0 {
        parts.push(format!("{} skipped", summary.skipped));
    }
    if summary.failed > 0 {
        parts.push(format!("{} failed", summary.failed.to_string().red().bold()));
    }
    let symbol = if summary.is_success() {
        "✓".green()
    } else {
        "✗".red()
    };
    println!("  {} {}", symbol, parts.join(", "));
}

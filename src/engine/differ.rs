//! Diff display

use colored::Colorize;
use declarative::{DiffSummary, ResourceDiff, ResourceState, group_by_type};
use similar::{ChangeTag, TextDiff};

use crate::ui;

/// Display a list of diffs grouped by resource type
pub fn display_diff(diffs: &[ResourceDiff]) {
    if diffs.is_empty() {
        println!();
        println!("  {} No changes needed", "✓".green());
        return;
    }

    println!();
    for (resource_type, type_diffs) in group_by_type(diffs) {
        println!("{}", ui::type_title(&resource_type).bold());
        for diff in type_diffs {
            display_one(diff);
        }
        println!();
    }

    let summary = DiffSummary::from_diffs(diffs);
    let mut line = format!(
        "Summary: {} to add, {} to change, {} to remove",
        summary.additions.to_string().green(),
        summary.modifications.to_string().yellow(),
        summary.removals.to_string().red()
    );
    if summary.warnings > 0 {
        line.push_str(&format!(
            ", {} not applied",
            summary.warnings.to_string().yellow()
        ));
    }
    println!("{line}");
}

fn display_one(diff: &ResourceDiff) {
    let symbol = if !diff.has_change() {
        "!".yellow()
    } else if diff.is_addition() {
        "+".green()
    } else if diff.is_removal() {
        "-".red()
    } else {
        "~".yellow()
    };
    println!("  {} {}", symbol, diff.description);

    if let (
        ResourceState::Present { details: Some(from) },
        ResourceState::Present { details: Some(to) },
    ) = (&diff.current, &diff.desired)
        && from != to
    {
        print_text_diff(from, to);
    }

    for warning in &diff.warnings {
        println!("      {} {}", "⚠".yellow(), warning.yellow());
    }
}

/// Print changed lines between two renderings
fn print_text_diff(from: &str, to: &str) {
    let text_diff = TextDiff::from_lines(from, to);
    for change in text_diff.iter_all_changes() {
        let line = change.value().trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => println!("      {}", format!("- {line}").red()),
            ChangeTag::Insert => println!("      {}", format!("+ {line}").green()),
            ChangeTag::Equal => {}
        }
    }
}

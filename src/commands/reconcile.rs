//! `diff` and `apply`

use anyhow::{Result, bail};
use declarative::{ExecutionPlan, compute_diffs};

use crate::Context;
use crate::engine::{self, Clients, ExecuteOptions};
use crate::ui;

use super::{load_config, load_desired};

/// Validate, discover and build the plan for a target
fn plan(ctx: &Context, target: Option<&str>) -> Result<Option<ExecutionPlan>> {
    let desired = engine::scope(load_desired(ctx)?, target)?;
    if desired.is_empty() {
        return Ok(None);
    }

    let config = load_config(ctx)?;
    let clients = Clients::for_state(&config, &desired)?;
    let plan = engine::build_plan(desired, &clients)?.filter_by_target(target);
    if plan.is_empty() {
        return Ok(None);
    }
    Ok(Some(plan))
}

fn nothing_declared(ctx: &Context, target: Option<&str>) {
    if ctx.quiet {
        return;
    }
    match target {
        Some(t) => ui::info(&format!("Nothing declared for '{t}'")),
        None => ui::info("Nothing declared in the catalog"),
    }
}

pub fn diff(ctx: &Context, target: Option<&str>) -> Result<()> {
    let Some(plan) = plan(ctx, target)? else {
        nothing_declared(ctx, target);
        return Ok(());
    };

    let diffs = compute_diffs(&plan.resources)?;
    engine::differ::display_diff(&diffs);
    Ok(())
}

pub fn apply(ctx: &Context, target: Option<&str>, dry_run: bool, yes: bool) -> Result<()> {
    let Some(plan) = plan(ctx, target)? else {
        nothing_declared(ctx, target);
        return Ok(());
    };

    let summary = engine::execute(
        plan,
        &ExecuteOptions {
            dry_run,
            yes,
            verbose: ctx.verbose > 0,
        },
    )?;

    if summary.failed > 0 {
        bail!("{} resource(s) failed to apply", summary.failed);
    }
    Ok(())
}

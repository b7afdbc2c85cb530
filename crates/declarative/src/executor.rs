//! Execution engine - applies changed resources one at a time

use crate::context::{ConfirmCallback, ProgressCallback};
use crate::diff::compute_diffs;
use crate::planner::ExecutionPlan;
use crate::resource::Resource;
use crate::types::{ApplyResult, ExecuteOptions, ExecuteSummary};
use anyhow::Result;
use std::collections::HashSet;

/// Execute a plan with the given options and callbacks
///
/// Resources are applied sequentially in plan order. A failing resource is
/// recorded as [`ApplyResult::Failed`] and the run moves on to the next one.
///
/// # Returns
/// Summary of execution results. Resources already in sync count as
/// `no_change`.
pub fn execute<P, C>(
    plan: ExecutionPlan,
    opts: &ExecuteOptions,
    progress: &mut P,
    confirm: &mut C,
) -> Result<ExecuteSummary>
where
    P: ProgressCallback,
    C: ConfirmCallback,
{
    let changed: HashSet<(String, String)> = compute_diffs(&plan.resources)?
        .into_iter()
        .filter(|d| d.has_change())
        .map(|d| (d.resource_type, d.resource_id))
        .collect();

    let in_sync = plan.resources.len() - changed.len();
    let mut summary = ExecuteSummary {
        no_change: in_sync,
        ..Default::default()
    };

    if changed.is_empty() {
        return Ok(summary);
    }

    if opts.dry_run {
        summary.skipped = changed.len();
        return Ok(summary);
    }

    if !confirm.confirm("Apply changes?")? {
        summary.skipped = changed.len();
        return Ok(summary);
    }

    progress.on_start(changed.len());
    for resource in &plan.resources {
        let key = (resource.resource_type().to_string(), resource.id());
        if !changed.contains(&key) {
            continue;
        }
        progress.on_resource_start(&key.1, &resource.description());
        let result = apply_resource(resource.as_ref());
        progress.on_resource_complete(&key.1, &result);
        summary.add_result(&result);
    }
    progress.on_complete();

    Ok(summary)
}

/// Apply a single resource, turning errors into a failed result
fn apply_resource(resource: &dyn Resource) -> ApplyResult {
    log::debug!("Applying {}", resource.description());
    match resource.apply() {
        Ok(result) => result,
        Err(e) => {
            log::debug!("{} failed: {e:#}", resource.description());
            ApplyResult::Failed {
                error: format!("{e:#}"),
            }
        }
    }
}

/// Simple execution without callbacks
///
/// For basic use cases where you don't need progress or confirmation.
pub fn execute_simple(plan: ExecutionPlan, opts: &ExecuteOptions) -> Result<ExecuteSummary> {
    use crate::context::{AutoConfirm, NoProgress};

    execute(plan, opts, &mut NoProgress, &mut AutoConfirm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{AutoDecline, NoProgress};
    use crate::types::ResourceState;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct TestResource {
        id: String,
        should_change: bool,
        fail: bool,
        applied: Arc<AtomicUsize>,
    }

    impl TestResource {
        fn new(id: &str, should_change: bool, applied: &Arc<AtomicUsize>) -> Self {
            Self {
                id: id.into(),
                should_change,
                fail: false,
                applied: Arc::clone(applied),
            }
        }
    }

    impl Resource for TestResource {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn description(&self) -> String {
            format!("Test resource {}", self.id)
        }

        fn resource_type(&self) -> &'static str {
            "test"
        }

        fn current_state(&self) -> Result<ResourceState> {
            if self.should_change {
                Ok(ResourceState::Absent)
            } else {
                Ok(ResourceState::Present { details: None })
            }
        }

        fn desired_state(&self) -> ResourceState {
            ResourceState::Present { details: None }
        }

        fn apply(&self) -> Result<ApplyResult> {
            self.applied.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("Failed to create {}", self.id);
            }
            Ok(ApplyResult::Created)
        }
    }

    #[test]
    fn test_execute_empty_plan() {
        let result = execute_simple(ExecutionPlan::new(), &ExecuteOptions::default()).unwrap();
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_execute_skips_resources_in_sync() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add_resource(Box::new(TestResource::new("a", false, &applied)));
        plan.add_resource(Box::new(TestResource::new("b", true, &applied)));

        let result = execute_simple(plan, &ExecuteOptions::default()).unwrap();
        assert_eq!(result.created, 1);
        assert_eq!(result.no_change, 1);
        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_does_not_stop_the_run() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut failing = TestResource::new("a", true, &applied);
        failing.fail = true;
        let mut plan = ExecutionPlan::new();
        plan.add_resource(Box::new(failing));
        plan.add_resource(Box::new(TestResource::new("b", true, &applied)));

        let result = execute_simple(plan, &ExecuteOptions::default()).unwrap();
        assert_eq!(result.failed, 1);
        assert_eq!(result.created, 1);
        assert!(!result.is_success());
        assert_eq!(applied.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dry_run_applies_nothing() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add_resource(Box::new(TestResource::new("a", true, &applied)));

        let opts = ExecuteOptions { dry_run: true };
        let result = execute_simple(plan, &opts).unwrap();
        assert_eq!(result.skipped, 1);
        assert_eq!(applied.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_declined_confirmation_applies_nothing() {
        let applied = Arc::new(AtomicUsize::new(0));
        let mut plan = ExecutionPlan::new();
        plan.add_resource(Box::new(TestResource::new("a", true, &applied)));

        let result = execute(
            plan,
            &ExecuteOptions::default(),
            &mut NoProgress,
            &mut AutoDecline,
        )
        .unwrap();
        assert_eq!(result.skipped, 1);
        assert_eq!(applied.load(Ordering::SeqCst), 0);
    }
}

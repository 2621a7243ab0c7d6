//! Verification runs with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for a run:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (clients, core) log stage summaries and internal details only.

use evgverify_clients::errors::Result;
use evgverify_clients::yaml::load_snapshot_file;
use evgverify_clients::{ConfigEvaluator, ConfigService, DiffProducer};
use evgverify_core::{log_op_end, log_op_error, log_op_start};
use evgverify_core::{ChangeSet, ConfigStates};
use evgverify_core_types::{RunContext, RunId};
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, Instant};

/// Outcome of one verification run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    pub run_id: RunId,
    /// Branch the change was diffed against; `None` for file comparisons
    pub target_branch: Option<String>,
    pub changes: ChangeSet,
}

impl VerificationReport {
    /// Arguments for `evergreen patch` exercising every affected variant and task
    pub fn patch_args(&self) -> String {
        self.changes.as_patch_args()
    }
}

/// Loads both configuration states of a working tree and analyzes them
pub struct VerificationOrchestrator<'a> {
    git: &'a dyn DiffProducer,
    evaluator: &'a dyn ConfigEvaluator,
}

impl<'a> VerificationOrchestrator<'a> {
    pub fn new(git: &'a dyn DiffProducer, evaluator: &'a dyn ConfigEvaluator) -> Self {
        Self { git, evaluator }
    }

    /// Find the variants and tasks affected by the working tree's pending
    /// change to `project_config`, relative to `target_branch`.
    ///
    /// ## Errors
    ///
    /// - `ExternalService`: git or evergreen failed
    /// - `RestoreFailed`: the pending change could not be re-applied
    /// - `YamlParse` / `InvalidSnapshot`: the evaluated configuration is unusable
    pub fn verify(
        &self,
        ctx: &RunContext,
        project_config: &Path,
        target_branch: &str,
    ) -> Result<VerificationReport> {
        log_op_start!(
            "verify",
            run_id = %ctx.run_id,
            path = %project_config.display(),
            target_branch = target_branch
        );
        tracing::info!("Comparing original and patched evergreen project configuration files.");
        let start = Instant::now();

        let result = ConfigService::new(self.git, self.evaluator)
            .load_config_states(project_config, target_branch)
            .map(|states| report(ctx, Some(target_branch), &states))
            .map_err(|e| {
                log_op_error!(
                    "verify",
                    e.clone(),
                    duration_ms = elapsed_ms(start),
                    run_id = %ctx.run_id
                );
                e.with_run_id(ctx.run_id.clone())
            })?;

        log_op_end!(
            "verify",
            duration_ms = elapsed_ms(start),
            run_id = %ctx.run_id,
            variants_len = result.changes.variants.len(),
            tasks_and_groups_len = result.changes.tasks_and_groups.len()
        );
        Ok(result)
    }
}

/// Analyze two already evaluated configuration files.
///
/// ## Errors
///
/// - `NotFound` / `Io`: a file cannot be read
/// - `YamlParse` / `InvalidSnapshot`: a file is not an evaluated configuration
pub fn compare_files(ctx: &RunContext, original: &Path, patched: &Path) -> Result<VerificationReport> {
    log_op_start!(
        "compare",
        run_id = %ctx.run_id,
        original = %original.display(),
        patched = %patched.display()
    );
    let start = Instant::now();

    let result = load_states(original, patched)
        .map(|states| report(ctx, None, &states))
        .map_err(|e| {
            log_op_error!(
                "compare",
                e.clone(),
                duration_ms = elapsed_ms(start),
                run_id = %ctx.run_id
            );
            e.with_run_id(ctx.run_id.clone())
        })?;

    log_op_end!(
        "compare",
        duration_ms = elapsed_ms(start),
        run_id = %ctx.run_id,
        variants_len = result.changes.variants.len(),
        tasks_and_groups_len = result.changes.tasks_and_groups.len()
    );
    Ok(result)
}

fn load_states(original: &Path, patched: &Path) -> Result<ConfigStates> {
    let original = load_snapshot_file(original).map_err(|e| e.with_section("original"))?;
    let patched = load_snapshot_file(patched).map_err(|e| e.with_section("patched"))?;
    Ok(ConfigStates::new(original, patched))
}

fn elapsed_ms(start: Instant) -> u64 {
    millis(start.elapsed())
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn report(ctx: &RunContext, target_branch: Option<&str>, states: &ConfigStates) -> VerificationReport {
    VerificationReport {
        run_id: ctx.run_id.clone(),
        target_branch: target_branch.map(str::to_string),
        changes: states.analyze(),
    }
}

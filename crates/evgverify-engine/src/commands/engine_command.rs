//! Engine-level commands.

use crate::commands::verify::{compare_files, VerificationOrchestrator, VerificationReport};
use evgverify_clients::errors::Result;
use evgverify_core_types::RunContext;
use std::path::PathBuf;

/// Engine-level commands, one per way of obtaining the two states.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Diff the working tree against a target branch and evaluate both states.
    Verify {
        project_config: PathBuf,
        target_branch: String,
    },
    /// Analyze two already evaluated configuration files.
    Compare { original: PathBuf, patched: PathBuf },
}

/// Apply an engine command within one run.
///
/// `orchestrator` is only used by `Verify`.
pub fn apply_engine_command(
    cmd: EngineCommand,
    ctx: &RunContext,
    orchestrator: &VerificationOrchestrator<'_>,
) -> Result<VerificationReport> {
    match cmd {
        EngineCommand::Verify {
            project_config,
            target_branch,
        } => orchestrator.verify(ctx, &project_config, &target_branch),
        EngineCommand::Compare { original, patched } => compare_files(ctx, &original, &patched),
    }
}

//! Verify command
//!
//! Usage: verify-evg-config-changes verify [--evg-project-config <FILE>] [--target-branch <REF>]

use crate::commands::output::{self, GlobalArgs};
use clap::Args;
use evgverify_clients::{EvergreenCli, GitCli, Tool};
use evgverify_core::errors::{ExError, ExErrorKind};
use evgverify_core_types::RunContext;
use evgverify_engine::{apply_engine_command, EngineCommand, VerificationOrchestrator};
use std::path::PathBuf;

pub const DEFAULT_EVG_PROJECT_CONFIG: &str = "etc/evergreen.yml";
pub const DEFAULT_TARGET_BRANCH: &str = "origin/master";

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Evergreen project configuration file, relative to the repository
    #[arg(long, default_value = DEFAULT_EVG_PROJECT_CONFIG)]
    pub evg_project_config: PathBuf,

    /// The branch that the current changes will be merged into
    #[arg(long, default_value = DEFAULT_TARGET_BRANCH)]
    pub target_branch: String,

    /// Repository working tree to run git and evergreen in
    #[arg(long, default_value = ".")]
    pub repo_dir: PathBuf,

    /// git program
    #[arg(long, default_value = evgverify_clients::git::DEFAULT_GIT_BIN)]
    pub git_bin: PathBuf,

    /// Evergreen CLI program
    #[arg(long, default_value = evgverify_clients::evaluator::DEFAULT_EVERGREEN_BIN)]
    pub evergreen_bin: PathBuf,
}

/// Execute verify command
pub fn execute(
    args: VerifyArgs,
    global: &GlobalArgs,
    ctx: &RunContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = args.repo_dir.join(&args.evg_project_config);
    if !config_path.is_file() {
        return Err(Box::new(
            ExError::new(ExErrorKind::NotFound)
                .with_op("verify")
                .with_message(format!(
                    "Evergreen project configuration {} does not exist",
                    config_path.display()
                )),
        ));
    }

    let git = GitCli::new(Tool::new(args.git_bin).in_dir(&args.repo_dir));
    let evergreen = EvergreenCli::new(Tool::new(args.evergreen_bin).in_dir(&args.repo_dir));
    let orchestrator = VerificationOrchestrator::new(&git, &evergreen);

    let report = apply_engine_command(
        EngineCommand::Verify {
            project_config: args.evg_project_config,
            target_branch: args.target_branch,
        },
        ctx,
        &orchestrator,
    )?;

    output::print(&report, global)
}

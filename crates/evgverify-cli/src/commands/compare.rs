//! Compare command
//!
//! Usage: verify-evg-config-changes compare --original <FILE> --patched <FILE>

use crate::commands::output::{self, GlobalArgs};
use clap::Args;
use evgverify_core_types::RunContext;
use evgverify_engine::compare_files;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Evaluated configuration before the change
    #[arg(long)]
    pub original: PathBuf,

    /// Evaluated configuration after the change
    #[arg(long)]
    pub patched: PathBuf,
}

/// Execute compare command
pub fn execute(
    args: CompareArgs,
    global: &GlobalArgs,
    ctx: &RunContext,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = compare_files(ctx, &args.original, &args.patched)?;
    output::print(&report, global)
}

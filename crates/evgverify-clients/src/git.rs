//! Pending-change patches via the git CLI.

use crate::errors::Result;
use crate::process::Tool;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default git program
pub const DEFAULT_GIT_BIN: &str = "git";

/// Produces and applies the patch holding the pending change
pub trait DiffProducer {
    /// Write a binary patch of the working tree against the merge base of
    /// `target_branch` to `output_file`.
    ///
    /// # Errors
    ///
    /// Fails if the diff cannot be produced.
    fn diff(&self, target_branch: &str, output_file: &Path) -> Result<()>;

    /// Apply `patch_file` to the working tree, or revert it when `reverse`.
    /// An empty patch applies cleanly.
    ///
    /// # Errors
    ///
    /// Fails if the patch does not apply.
    fn apply(&self, patch_file: &Path, reverse: bool) -> Result<()>;
}

/// Runs `git diff` and `git apply`
#[derive(Debug, Clone)]
pub struct GitCli {
    tool: Tool,
}

impl GitCli {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    pub fn diff_args(target_branch: &str, output_file: &Path) -> Vec<OsString> {
        vec![
            "--no-pager".into(),
            "diff".into(),
            "--merge-base".into(),
            target_branch.into(),
            "--output".into(),
            output_file.as_os_str().to_owned(),
            "--binary".into(),
        ]
    }

    pub fn apply_args(patch_file: &Path, reverse: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["apply".into(), "--allow-empty".into()];
        if reverse {
            args.push("--reverse".into());
        }
        args.push(patch_file.as_os_str().to_owned());
        args
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(Tool::new(PathBuf::from(DEFAULT_GIT_BIN)))
    }
}

impl DiffProducer for GitCli {
    fn diff(&self, target_branch: &str, output_file: &Path) -> Result<()> {
        self.tool
            .run(&Self::diff_args(target_branch, output_file))
            .map(|_| ())
    }

    fn apply(&self, patch_file: &Path, reverse: bool) -> Result<()> {
        self.tool
            .run(&Self::apply_args(patch_file, reverse))
            .map(|_| ())
    }
}

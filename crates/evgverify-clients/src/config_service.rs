//! Original and patched configuration states of a working tree
//!
//! The patched state is the working tree as it is. The original state is
//! obtained by temporarily reverting the pending change:
//!
//! 1. diff the working tree against the merge base of the target branch
//! 2. reverse-apply that patch
//! 3. evaluate the configuration
//! 4. re-apply the patch, whether or not evaluation succeeded
//!
//! Step 4 is owned by [`ReverseApplyGuard`], which also re-applies on drop
//! so an unwinding panic cannot leave the tree reverted.

use crate::errors::{io_error, restore_failed, Result};
use crate::evaluator::ConfigEvaluator;
use crate::git::DiffProducer;
use crate::yaml::parse_snapshot_str;
use evgverify_core::model::ConfigStates;
use std::path::Path;
use tempfile::NamedTempFile;

/// Loads both configuration states through the external tools
pub struct ConfigService<'a> {
    git: &'a dyn DiffProducer,
    evaluator: &'a dyn ConfigEvaluator,
}

impl<'a> ConfigService<'a> {
    pub fn new(git: &'a dyn DiffProducer, evaluator: &'a dyn ConfigEvaluator) -> Self {
        Self { git, evaluator }
    }

    /// Evaluate `project_config` without and with the pending change.
    ///
    /// # Errors
    ///
    /// - `ERR_EXTERNAL_SERVICE` if git or the evaluator fail
    /// - `ERR_RESTORE_FAILED` if the pending change could not be re-applied;
    ///   the evaluation error, if there was one, is its source
    /// - `ERR_YAML_PARSE` / `ERR_INVALID_SNAPSHOT` for unusable evaluator output
    pub fn load_config_states(
        &self,
        project_config: &Path,
        target_branch: &str,
    ) -> Result<ConfigStates> {
        let original_text = self.evaluate_original(project_config, target_branch)?;
        let patched_text = self.evaluator.evaluate(project_config)?;
        tracing::info!("Evaluated original and patched evergreen project configuration files.");

        let original = parse_snapshot_str(&original_text)
            .map_err(|e| e.with_section("original"))?;
        let patched = parse_snapshot_str(&patched_text).map_err(|e| e.with_section("patched"))?;
        Ok(ConfigStates::new(original, patched))
    }

    /// Evaluate the configuration with the pending change reverted.
    fn evaluate_original(&self, project_config: &Path, target_branch: &str) -> Result<String> {
        let patch_file = NamedTempFile::new().map_err(|e| io_error("create_patch_file", e))?;
        self.git.diff(target_branch, patch_file.path())?;

        let guard = ReverseApplyGuard::reverse(self.git, patch_file.path())?;
        let evaluated = self.evaluator.evaluate(project_config);

        match guard.restore() {
            Ok(()) => evaluated,
            Err(restore_err) => Err(restore_failed(&restore_err, evaluated.err())),
        }
    }
}

/// Keeps a patch reverse-applied until restored or dropped
pub struct ReverseApplyGuard<'a> {
    git: &'a dyn DiffProducer,
    patch_file: &'a Path,
    armed: bool,
}

impl<'a> ReverseApplyGuard<'a> {
    /// Reverse-apply `patch_file`.
    ///
    /// # Errors
    ///
    /// Fails if the patch cannot be reverted; the tree is then unchanged
    /// and nothing will be re-applied.
    pub fn reverse(git: &'a dyn DiffProducer, patch_file: &'a Path) -> Result<Self> {
        git.apply(patch_file, true)?;
        tracing::debug!(patch_file = %patch_file.display(), "Reverse-applied pending patch.");
        Ok(Self {
            git,
            patch_file,
            armed: true,
        })
    }

    /// Re-apply the patch.
    ///
    /// # Errors
    ///
    /// Fails if the patch no longer applies.
    pub fn restore(mut self) -> Result<()> {
        self.armed = false;
        self.git.apply(self.patch_file, false)?;
        tracing::debug!(patch_file = %self.patch_file.display(), "Re-applied pending patch.");
        Ok(())
    }
}

impl Drop for ReverseApplyGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = self.git.apply(self.patch_file, false) {
            tracing::error!(
                patch_file = %self.patch_file.display(),
                err.code = err.code(),
                "Failed to re-apply pending patch; restore it manually with `git apply`."
            );
        }
    }
}

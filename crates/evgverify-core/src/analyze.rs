//! Change-propagation analysis entry point.

use crate::changes::ChangeSet;
use crate::checks::Stage;
use crate::model::{ConfigSnapshot, ConfigStates};

/// Compute which functions, tasks, task groups and build variants of the
/// patched configuration are affected by the change from `original`.
///
/// Runs the four stages in [`Stage::ORDER`] over a fresh [`ChangeSet`].
/// Never fails: malformed input is rejected earlier, when the snapshots are
/// built.
pub fn analyze(original: &ConfigSnapshot, patched: &ConfigSnapshot) -> ChangeSet {
    let mut changes = ChangeSet::new();
    for stage in Stage::ORDER {
        stage.run(original, patched, &mut changes);
    }
    tracing::debug!(
        functions_len = changes.functions.len(),
        tasks_and_groups_len = changes.tasks_and_groups.len(),
        variants_len = changes.variants.len(),
        "Analysis finished."
    );
    changes
}

impl ConfigStates {
    /// Analyze this pair of states
    pub fn analyze(&self) -> ChangeSet {
        analyze(&self.original, &self.patched)
    }
}

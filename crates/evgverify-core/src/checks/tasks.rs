//! Task definition changes.

use crate::changes::{ChangeReason, ChangeSet, EntityKind};
use crate::checks::summarize;
use crate::model::commands::referenced_functions;
use crate::model::entity::index_by_name;
use crate::model::ConfigSnapshot;

/// Key holding a task's command list
pub const COMMANDS_KEY: &str = "commands";

/// Flag every task of the patched state that is new, differs structurally,
/// or calls a function already flagged by the functions stage.
pub fn check(original: &ConfigSnapshot, patched: &ConfigSnapshot, changes: &mut ChangeSet) {
    let original_tasks = index_by_name(original.tasks());
    let mut updated: Vec<(&str, ChangeReason)> = Vec::new();

    for task in patched.tasks() {
        let reason = match original_tasks.get(task.name()) {
            None => Some(ChangeReason::Added),
            Some(original_task) if !task.same_definition(original_task) => {
                Some(ChangeReason::DefinitionChanged)
            }
            Some(_) => referenced_functions(task.field(COMMANDS_KEY))
                .into_iter()
                .find(|func| changes.functions.contains(*func))
                .map(|func| ChangeReason::CallsChangedFunction {
                    function: func.to_string(),
                }),
        };
        if let Some(reason) = reason {
            updated.push((task.name(), reason));
        }
    }

    for (name, reason) in &updated {
        tracing::debug!(stage = "tasks", entity_name = *name, reason = %reason, "Task changed.");
    }
    tracing::info!(
        stage = "tasks",
        tasks = %summarize(updated.iter().map(|(name, _)| *name)),
        "Found updated tasks."
    );

    for (name, reason) in updated {
        changes.add_task_or_group(EntityKind::Task, name, reason);
    }
}

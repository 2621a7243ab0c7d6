//! Task group definition changes.
//!
//! A group is checked in order, stopping at the first hit: new, structurally
//! different, lists a changed task, calls a changed function from one of its
//! setup/teardown hooks.

use crate::changes::{ChangeReason, ChangeSet, EntityKind};
use crate::checks::summarize;
use crate::model::commands::referenced_functions;
use crate::model::entity::{index_by_name, Entity};
use crate::model::{ConfigSnapshot, TASK_GROUP_HOOKS};
use std::collections::BTreeSet;

/// Key listing a group's member tasks
pub const TASKS_KEY: &str = "tasks";

pub fn check(original: &ConfigSnapshot, patched: &ConfigSnapshot, changes: &mut ChangeSet) {
    let original_groups = index_by_name(original.task_groups());
    let mut updated: Vec<(&str, ChangeReason)> = Vec::new();

    for group in patched.task_groups() {
        let reason = match original_groups.get(group.name()) {
            None => Some(ChangeReason::Added),
            Some(original_group) if !group.same_definition(original_group) => {
                Some(ChangeReason::DefinitionChanged)
            }
            Some(_) => dependency_reason(group, changes),
        };
        if let Some(reason) = reason {
            updated.push((group.name(), reason));
        }
    }

    for (name, reason) in &updated {
        tracing::debug!(stage = "task_groups", entity_name = *name, reason = %reason, "Task group changed.");
    }
    tracing::info!(
        stage = "task_groups",
        task_groups = %summarize(updated.iter().map(|(name, _)| *name)),
        "Found updated task groups."
    );

    for (name, reason) in updated {
        changes.add_task_or_group(EntityKind::TaskGroup, name, reason);
    }
}

/// Reason an unchanged group is still affected by earlier stages, if any
fn dependency_reason(group: &Entity, changes: &ChangeSet) -> Option<ChangeReason> {
    if let Some(task) = group
        .listed_names(TASKS_KEY)
        .into_iter()
        .find(|task| changes.tasks_and_groups.contains(*task))
    {
        return Some(ChangeReason::IncludesChangedTask {
            task: task.to_string(),
        });
    }

    hook_functions(group)
        .into_iter()
        .find(|func| changes.functions.contains(*func))
        .map(|func| ChangeReason::CallsChangedFunction {
            function: func.to_string(),
        })
}

/// Functions invoked by any of the group's setup/teardown hooks
pub fn hook_functions(group: &Entity) -> BTreeSet<&str> {
    TASK_GROUP_HOOKS
        .iter()
        .flat_map(|hook| referenced_functions(group.field(hook)))
        .collect()
}

//! Build variant changes and the tasks they require.
//!
//! A variant that is new, or whose `expansions` or `run_on` changed, needs
//! every task it lists. Otherwise each of its task overrides is compared with
//! the original variant's override of the same name; added or changed
//! overrides are required. The variant itself is flagged when any task it
//! lists was required by its own overrides or was flagged by an earlier
//! stage.

use crate::changes::{ChangeReason, ChangeSet, EntityKind};
use crate::checks::summarize;
use crate::model::{BuildVariant, ConfigSnapshot};
use std::collections::BTreeSet;

pub fn check(original: &ConfigSnapshot, patched: &ConfigSnapshot, changes: &mut ChangeSet) {
    let original_variants = original.build_variants_by_name();
    let group_names: BTreeSet<&str> = patched.task_groups().iter().map(|g| g.name()).collect();

    let mut updated_variants: Vec<(&str, ChangeReason)> = Vec::new();
    let mut required: Vec<(&str, ChangeReason)> = Vec::new();

    for variant in patched.build_variants() {
        let Some(original_variant) = original_variants.get(variant.name()) else {
            require_all(variant, ChangeReason::Added, &mut updated_variants, &mut required);
            continue;
        };

        if variant.expansions() != original_variant.expansions() {
            require_all(
                variant,
                ChangeReason::ExpansionsChanged,
                &mut updated_variants,
                &mut required,
            );
            continue;
        }

        if variant.run_on() != original_variant.run_on() {
            require_all(
                variant,
                ChangeReason::RunOnChanged,
                &mut updated_variants,
                &mut required,
            );
            continue;
        }

        let changed_overrides = changed_overrides(variant, original_variant);
        for task in &changed_overrides {
            required.push((
                *task,
                ChangeReason::TaskOverrideChanged {
                    variant: variant.name().to_string(),
                },
            ));
        }

        if let Some(task) = variant
            .task_names()
            .find(|task| changed_overrides.contains(task) || changes.tasks_and_groups.contains(*task))
        {
            updated_variants.push((
                variant.name(),
                ChangeReason::IncludesChangedTask {
                    task: task.to_string(),
                },
            ));
        }
    }

    for (name, reason) in &updated_variants {
        tracing::debug!(stage = "variants", entity_name = *name, reason = %reason, "Build variant changed.");
    }
    tracing::info!(
        stage = "variants",
        variants = %summarize(updated_variants.iter().map(|(name, _)| *name)),
        tasks_and_groups = %summarize(required.iter().map(|(name, _)| *name)),
        "Found updated variants."
    );

    for (name, reason) in updated_variants {
        changes.add_variant(name, reason);
    }
    for (name, reason) in required {
        let kind = if group_names.contains(name) {
            EntityKind::TaskGroup
        } else {
            EntityKind::Task
        };
        changes.add_task_or_group(kind, name, reason);
    }
}

/// Flag a variant and require every task it lists.
fn require_all<'a>(
    variant: &'a BuildVariant,
    reason: ChangeReason,
    updated_variants: &mut Vec<(&'a str, ChangeReason)>,
    required: &mut Vec<(&'a str, ChangeReason)>,
) {
    updated_variants.push((variant.name(), reason));
    for task in variant.task_names() {
        required.push((
            task,
            ChangeReason::RequiredByVariant {
                variant: variant.name().to_string(),
            },
        ));
    }
}

/// Task overrides that are new in the patched variant or differ structurally
/// from the original variant's override of the same name.
pub fn changed_overrides<'a>(
    variant: &'a BuildVariant,
    original_variant: &BuildVariant,
) -> BTreeSet<&'a str> {
    let original_tasks = original_variant.tasks_by_name();
    variant
        .tasks()
        .iter()
        .filter(|task| match original_tasks.get(task.name()) {
            None => true,
            Some(original_task) => !task.same_definition(original_task),
        })
        .map(|task| task.name())
        .collect()
}

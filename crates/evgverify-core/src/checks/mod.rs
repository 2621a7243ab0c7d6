//! Change detection stages
//!
//! Each stage compares one section of the original and patched snapshots and
//! adds what it flags to the shared [`ChangeSet`]. A stage reads the sets
//! filled by earlier stages, so they must run in [`Stage::ORDER`]:
//! functions, tasks, task groups, build variants.
//!
//! Within a stage, flagged names are collected first and added to the
//! change set after the whole section has been scanned.

pub mod functions;
pub mod task_groups;
pub mod tasks;
pub mod variants;

use crate::changes::ChangeSet;
use crate::model::ConfigSnapshot;
use std::collections::BTreeSet;

/// One analysis stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Functions,
    Tasks,
    TaskGroups,
    Variants,
}

impl Stage {
    /// Evaluation order; each stage depends on all stages before it
    pub const ORDER: [Stage; 4] = [
        Stage::Functions,
        Stage::Tasks,
        Stage::TaskGroups,
        Stage::Variants,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Functions => "functions",
            Stage::Tasks => "tasks",
            Stage::TaskGroups => "task_groups",
            Stage::Variants => "variants",
        }
    }

    /// Run this stage against the two snapshots
    pub fn run(self, original: &ConfigSnapshot, patched: &ConfigSnapshot, changes: &mut ChangeSet) {
        match self {
            Stage::Functions => functions::check(original, patched, changes),
            Stage::Tasks => tasks::check(original, patched, changes),
            Stage::TaskGroups => task_groups::check(original, patched, changes),
            Stage::Variants => variants::check(original, patched, changes),
        }
    }
}

/// Render a set of names for a log line, `none` when empty
pub(crate) fn summarize<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let names: BTreeSet<&str> = names.into_iter().collect();
    if names.is_empty() {
        "none".to_string()
    } else {
        names.into_iter().collect::<Vec<_>>().join(", ")
    }
}

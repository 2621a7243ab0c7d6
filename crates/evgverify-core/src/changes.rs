//! Accumulated configuration changes
//!
//! A [`ChangeSet`] is created empty for one analysis run and grows
//! monotonically as each stage adds the names it flags. Sets are ordered so
//! rendered output is deterministic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Kind of named configuration entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Function,
    Task,
    TaskGroup,
    BuildVariant,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Function => "function",
            EntityKind::Task => "task",
            EntityKind::TaskGroup => "task_group",
            EntityKind::BuildVariant => "build_variant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an entity was flagged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeReason {
    /// Present only in the patched state
    Added,
    /// Definition differs structurally from the original
    DefinitionChanged,
    /// Invokes a changed function from its commands or hooks
    CallsChangedFunction { function: String },
    /// Lists a changed task or task group
    IncludesChangedTask { task: String },
    /// Build variant `expansions` differ
    ExpansionsChanged,
    /// Build variant `run_on` differs
    RunOnChanged,
    /// A build variant's override of this task was added or changed
    TaskOverrideChanged { variant: String },
    /// Listed by a build variant that is new or whose environment changed
    RequiredByVariant { variant: String },
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeReason::Added => write!(f, "added"),
            ChangeReason::DefinitionChanged => write!(f, "definition changed"),
            ChangeReason::CallsChangedFunction { function } => {
                write!(f, "calls changed function '{}'", function)
            }
            ChangeReason::IncludesChangedTask { task } => {
                write!(f, "includes changed task '{}'", task)
            }
            ChangeReason::ExpansionsChanged => write!(f, "expansions changed"),
            ChangeReason::RunOnChanged => write!(f, "run_on changed"),
            ChangeReason::TaskOverrideChanged { variant } => {
                write!(f, "task override changed in variant '{}'", variant)
            }
            ChangeReason::RequiredByVariant { variant } => {
                write!(f, "required by changed variant '{}'", variant)
            }
        }
    }
}

/// First reason recorded for a flagged entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: EntityKind,
    pub name: String,
    pub reason: ChangeReason,
}

/// Changed entity names found so far in one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Changed function names
    pub functions: BTreeSet<String>,
    /// Changed or required task and task group names (one shared namespace)
    pub tasks_and_groups: BTreeSet<String>,
    /// Changed build variant names
    pub variants: BTreeSet<String>,
    /// First reason per (kind, name), for reporting
    #[serde(with = "records")]
    reasons: BTreeMap<(EntityKind, String), ChangeReason>,
}

impl ChangeSet {
    /// Create an empty change set
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a function. Returns `true` if it was not flagged before.
    pub fn add_function(&mut self, name: &str, reason: ChangeReason) -> bool {
        self.record(EntityKind::Function, name, reason);
        self.functions.insert(name.to_string())
    }

    /// Flag a task or task group. Returns `true` if the name was not flagged before.
    pub fn add_task_or_group(&mut self, kind: EntityKind, name: &str, reason: ChangeReason) -> bool {
        self.record(kind, name, reason);
        self.tasks_and_groups.insert(name.to_string())
    }

    /// Flag a build variant. Returns `true` if it was not flagged before.
    pub fn add_variant(&mut self, name: &str, reason: ChangeReason) -> bool {
        self.record(EntityKind::BuildVariant, name, reason);
        self.variants.insert(name.to_string())
    }

    fn record(&mut self, kind: EntityKind, name: &str, reason: ChangeReason) {
        self.reasons
            .entry((kind, name.to_string()))
            .or_insert(reason);
    }

    /// Build variants that must be exercised
    pub fn changed_variants(&self) -> &BTreeSet<String> {
        &self.variants
    }

    /// Tasks and task groups that must be exercised
    pub fn required_tasks_and_groups(&self) -> &BTreeSet<String> {
        &self.tasks_and_groups
    }

    /// True when no stage flagged anything
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.tasks_and_groups.is_empty() && self.variants.is_empty()
    }

    /// The first recorded reason for an entity, if flagged
    pub fn reason(&self, kind: EntityKind, name: &str) -> Option<&ChangeReason> {
        self.reasons.get(&(kind, name.to_string()))
    }

    /// All change records ordered by kind then name
    pub fn records(&self) -> Vec<ChangeRecord> {
        self.reasons
            .iter()
            .map(|((kind, name), reason)| ChangeRecord {
                kind: *kind,
                name: name.clone(),
                reason: reason.clone(),
            })
            .collect()
    }

    /// Render `evergreen patch` arguments: one `-v <variant>` per changed
    /// variant followed by one `-t <task>` per required task or group.
    pub fn as_patch_args(&self) -> String {
        self.variants
            .iter()
            .map(|v| format!("-v {}", v))
            .chain(self.tasks_and_groups.iter().map(|t| format!("-t {}", t)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Serialize the reason map as a flat list of records.
mod records {
    use super::{ChangeReason, ChangeRecord, EntityKind};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        reasons: &BTreeMap<(EntityKind, String), ChangeReason>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        reasons
            .iter()
            .map(|((kind, name), reason)| ChangeRecord {
                kind: *kind,
                name: name.clone(),
                reason: reason.clone(),
            })
            .collect::<Vec<_>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<(EntityKind, String), ChangeReason>, D::Error> {
        let records = Vec::<ChangeRecord>::deserialize(deserializer)?;
        Ok(records
            .into_iter()
            .map(|r| ((r.kind, r.name), r.reason))
            .collect())
    }
}

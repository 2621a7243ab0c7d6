//! Evaluated configuration snapshots
//!
//! Only the four sections the analysis reads are parsed. Every other
//! top-level key is ignored. A missing or `null` section is an empty
//! collection.

use crate::errors::VerifyError;
use crate::model::entity::{value_kind, BuildVariant, Entity};
use crate::model::{SECTION_BUILD_VARIANTS, SECTION_FUNCTIONS, SECTION_TASKS, SECTION_TASK_GROUPS};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// One fully evaluated project configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    functions: BTreeMap<String, Value>,
    tasks: Vec<Entity>,
    task_groups: Vec<Entity>,
    build_variants: Vec<BuildVariant>,
}

impl ConfigSnapshot {
    /// Build a snapshot from a canonical configuration value.
    ///
    /// `null` (an empty document) yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// - `SnapshotNotMapping`: the root is neither a mapping nor `null`
    /// - `SectionTypeMismatch`: `functions` is not a mapping, or another
    ///   section is not a sequence
    /// - `EntityNotMapping` / `EntityMissingName`: a section entry is not a
    ///   named mapping
    pub fn from_value(value: Value) -> Result<Self, VerifyError> {
        let mut root = match value {
            Value::Null => return Ok(Self::default()),
            Value::Object(root) => root,
            other => {
                return Err(VerifyError::SnapshotNotMapping {
                    found: value_kind(&other).to_string(),
                })
            }
        };

        let functions = match take_section(&mut root, SECTION_FUNCTIONS) {
            None => BTreeMap::new(),
            Some(Value::Object(map)) => map.into_iter().collect(),
            Some(other) => {
                return Err(VerifyError::SectionTypeMismatch {
                    section: SECTION_FUNCTIONS.to_string(),
                    expected: "mapping",
                    found: value_kind(&other).to_string(),
                })
            }
        };

        let tasks = sequence_section(&mut root, SECTION_TASKS, Entity::from_value)?;
        let task_groups = sequence_section(&mut root, SECTION_TASK_GROUPS, Entity::from_value)?;
        let build_variants =
            sequence_section(&mut root, SECTION_BUILD_VARIANTS, BuildVariant::from_value)?;

        let snapshot = Self {
            functions,
            tasks,
            task_groups,
            build_variants,
        };
        snapshot.warn_on_duplicate_names();
        Ok(snapshot)
    }

    /// Function bodies keyed by function name
    pub fn functions(&self) -> &BTreeMap<String, Value> {
        &self.functions
    }

    pub fn tasks(&self) -> &[Entity] {
        &self.tasks
    }

    pub fn task_groups(&self) -> &[Entity] {
        &self.task_groups
    }

    pub fn build_variants(&self) -> &[BuildVariant] {
        &self.build_variants
    }

    /// Build variants keyed by name; the last duplicate wins
    pub fn build_variants_by_name(&self) -> BTreeMap<&str, &BuildVariant> {
        self.build_variants.iter().map(|v| (v.name(), v)).collect()
    }

    fn warn_on_duplicate_names(&self) {
        let sections: [(&str, Vec<&str>); 3] = [
            (SECTION_TASKS, self.tasks.iter().map(Entity::name).collect()),
            (
                SECTION_TASK_GROUPS,
                self.task_groups.iter().map(Entity::name).collect(),
            ),
            (
                SECTION_BUILD_VARIANTS,
                self.build_variants.iter().map(BuildVariant::name).collect(),
            ),
        ];
        for (section, names) in sections {
            let mut seen = BTreeSet::new();
            for name in names {
                if !seen.insert(name) {
                    tracing::warn!(
                        section = section,
                        entity_name = name,
                        "Duplicate name in section; the last definition is used."
                    );
                }
            }
        }
    }
}

/// Original and patched states of the same project configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigStates {
    pub original: ConfigSnapshot,
    pub patched: ConfigSnapshot,
}

impl ConfigStates {
    pub fn new(original: ConfigSnapshot, patched: ConfigSnapshot) -> Self {
        Self { original, patched }
    }
}

/// Remove a section from the root, treating `null` as absent.
fn take_section(root: &mut Map<String, Value>, section: &str) -> Option<Value> {
    match root.remove(section) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn sequence_section<T>(
    root: &mut Map<String, Value>,
    section: &str,
    parse: fn(&str, usize, Value) -> Result<T, VerifyError>,
) -> Result<Vec<T>, VerifyError> {
    match take_section(root, section) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse(section, index, item))
            .collect(),
        Some(other) => Err(VerifyError::SectionTypeMismatch {
            section: section.to_string(),
            expected: "sequence",
            found: value_kind(&other).to_string(),
        }),
    }
}

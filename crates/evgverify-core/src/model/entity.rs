//! Named configuration entities
//!
//! Every task, task group, build variant and variant task override is a
//! mapping with a unique `name`. The full mapping is kept as the entity's
//! definition so two states can be compared structurally.

use crate::errors::VerifyError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Key holding an entity's name
pub const NAME_KEY: &str = "name";

/// A named mapping from one section of an evaluated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    definition: Value,
}

impl Entity {
    /// Build an entity from entry `index` of `section`.
    ///
    /// # Errors
    ///
    /// - `EntityNotMapping`: the entry is not a mapping
    /// - `EntityMissingName`: the mapping has no string `name`
    pub fn from_value(section: &str, index: usize, value: Value) -> Result<Self, VerifyError> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(VerifyError::EntityNotMapping {
                    section: section.to_string(),
                    index,
                    found: value_kind(&other).to_string(),
                })
            }
        };
        let name = fields
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| VerifyError::EntityMissingName {
                section: section.to_string(),
                index,
            })?
            .to_string();
        Ok(Self {
            name,
            definition: Value::Object(fields),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entity's full definition (always a mapping)
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.definition.get(key)
    }

    /// Structural equality of the full definitions
    pub fn same_definition(&self, other: &Entity) -> bool {
        self.definition == other.definition
    }

    /// Names listed under a sequence field, e.g. a task group's `tasks`.
    ///
    /// Plain strings and mappings carrying a string `name` both count.
    pub fn listed_names(&self, key: &str) -> Vec<&str> {
        let Some(Value::Array(items)) = self.field(key) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(name) => Some(name.as_str()),
                Value::Object(fields) => fields.get(NAME_KEY).and_then(Value::as_str),
                _ => None,
            })
            .collect()
    }
}

/// A build variant together with its task overrides
#[derive(Debug, Clone, PartialEq)]
pub struct BuildVariant {
    entity: Entity,
    tasks: Vec<Entity>,
}

impl BuildVariant {
    /// Key listing a variant's tasks
    pub const TASKS_KEY: &'static str = "tasks";
    pub const EXPANSIONS_KEY: &'static str = "expansions";
    pub const RUN_ON_KEY: &'static str = "run_on";

    /// Build a variant from entry `index` of `buildvariants`, parsing its
    /// task overrides.
    ///
    /// # Errors
    ///
    /// Fails if the variant or any of its task entries is not a named mapping.
    pub fn from_value(section: &str, index: usize, value: Value) -> Result<Self, VerifyError> {
        let entity = Entity::from_value(section, index, value)?;
        let task_section = format!("{}.{}.{}", section, entity.name(), Self::TASKS_KEY);
        let tasks = match entity.field(Self::TASKS_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Entity::from_value(&task_section, i, item.clone()))
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(VerifyError::SectionTypeMismatch {
                    section: task_section,
                    expected: "sequence",
                    found: value_kind(other).to_string(),
                })
            }
        };
        Ok(Self { entity, tasks })
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Task overrides in declaration order
    pub fn tasks(&self) -> &[Entity] {
        &self.tasks
    }

    /// Names of all tasks and task groups the variant runs
    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(Entity::name)
    }

    /// `expansions`, with a missing or null value read as an empty mapping
    pub fn expansions(&self) -> Value {
        match self.entity.field(Self::EXPANSIONS_KEY) {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(value) => value.clone(),
        }
    }

    /// `run_on`, with a missing or null value read as an empty sequence
    pub fn run_on(&self) -> Value {
        match self.entity.field(Self::RUN_ON_KEY) {
            None | Some(Value::Null) => Value::Array(Vec::new()),
            Some(value) => value.clone(),
        }
    }

    /// Task overrides keyed by name; the last duplicate wins
    pub fn tasks_by_name(&self) -> BTreeMap<&str, &Entity> {
        index_by_name(&self.tasks)
    }
}

/// Index entities by name; when a name repeats, the last definition wins.
pub fn index_by_name(entities: &[Entity]) -> BTreeMap<&str, &Entity> {
    entities.iter().map(|e| (e.name(), e)).collect()
}

/// Short human name of a JSON value's type, used in shape errors
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_requires_string_name() {
        let err = Entity::from_value("tasks", 2, json!({"commands": []})).unwrap_err();
        assert_eq!(
            err,
            VerifyError::EntityMissingName {
                section: "tasks".to_string(),
                index: 2
            }
        );

        let err = Entity::from_value("tasks", 0, json!("lint")).unwrap_err();
        assert!(matches!(err, VerifyError::EntityNotMapping { .. }));
    }

    #[test]
    fn test_same_definition_ignores_key_order() {
        let a = Entity::from_value("tasks", 0, json!({"name": "t", "a": 1, "b": [1, 2]})).unwrap();
        let b = Entity::from_value("tasks", 0, json!({"b": [1, 2], "a": 1, "name": "t"})).unwrap();
        let c = Entity::from_value("tasks", 0, json!({"name": "t", "a": 1, "b": [2, 1]})).unwrap();
        assert!(a.same_definition(&b));
        assert!(!a.same_definition(&c));
    }

    #[test]
    fn test_listed_names_accepts_strings_and_named_mappings() {
        let group = Entity::from_value(
            "task_groups",
            0,
            json!({"name": "g", "tasks": ["t1", {"name": "t2"}, 3]}),
        )
        .unwrap();
        assert_eq!(group.listed_names("tasks"), vec!["t1", "t2"]);
        assert!(group.listed_names("missing").is_empty());
    }

    #[test]
    fn test_variant_defaults_for_missing_expansions_and_run_on() {
        let variant =
            BuildVariant::from_value("buildvariants", 0, json!({"name": "v", "tasks": null}))
                .unwrap();
        assert_eq!(variant.expansions(), json!({}));
        assert_eq!(variant.run_on(), json!([]));
        assert!(variant.tasks().is_empty());
    }

    #[test]
    fn test_variant_task_entries_must_be_named() {
        let err = BuildVariant::from_value(
            "buildvariants",
            0,
            json!({"name": "v", "tasks": [{"name": "t1"}, {"distros": ["d"]}]}),
        )
        .unwrap_err();
        assert_eq!(
            err,
            VerifyError::EntityMissingName {
                section: "buildvariants.v.tasks".to_string(),
                index: 1
            }
        );
    }

    #[test]
    fn test_index_by_name_last_duplicate_wins() {
        let entities = vec![
            Entity::from_value("tasks", 0, json!({"name": "t", "v": 1})).unwrap(),
            Entity::from_value("tasks", 1, json!({"name": "t", "v": 2})).unwrap(),
        ];
        let index = index_by_name(&entities);
        assert_eq!(index.len(), 1);
        assert_eq!(index["t"].field("v"), Some(&json!(2)));
    }
}

//! Evaluated project configuration model
//!
//! A [`ConfigSnapshot`] is one fully evaluated project configuration.
//! [`ConfigStates`] pairs the state before and after the pending change.

pub mod commands;
pub mod entity;
pub mod snapshot;

pub use entity::{BuildVariant, Entity};
pub use snapshot::{ConfigSnapshot, ConfigStates};

/// Top-level section holding reusable functions
pub const SECTION_FUNCTIONS: &str = "functions";
/// Top-level section holding tasks
pub const SECTION_TASKS: &str = "tasks";
/// Top-level section holding task groups
pub const SECTION_TASK_GROUPS: &str = "task_groups";
/// Top-level section holding build variants
pub const SECTION_BUILD_VARIANTS: &str = "buildvariants";

/// Task group keys whose command lists may invoke functions
pub const TASK_GROUP_HOOKS: [&str; 4] = [
    "setup_group",
    "teardown_group",
    "setup_task",
    "teardown_task",
];

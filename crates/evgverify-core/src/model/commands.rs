//! Command list helpers
//!
//! Tasks and task group hooks hold lists of commands. A command that calls a
//! reusable function names it under the `func` key.

use serde_json::Value;
use std::collections::BTreeSet;

/// Key under which a command names the function it invokes
pub const FUNC_KEY: &str = "func";

/// Collect the function names invoked by a command list.
///
/// `None`, `null` and non-sequence values yield nothing. Entries that are not
/// mappings, or whose `func` is not a string, are skipped.
pub fn referenced_functions(commands: Option<&Value>) -> BTreeSet<&str> {
    let Some(Value::Array(commands)) = commands else {
        return BTreeSet::new();
    };
    commands
        .iter()
        .filter_map(|command| command.get(FUNC_KEY))
        .filter_map(Value::as_str)
        .collect()
}

//! Functions stage tests.

mod common;

use evgverify_core::checks::functions;
use evgverify_core::{ChangeReason, ChangeSet, EntityKind};
use serde_json::json;
use common::{names, snapshot};

// Scenario A: a function body changes
#[test]
fn test_changed_function_body_is_flagged() {
    let original = snapshot(json!({"functions": {"f1": ["echo a"]}}));
    let patched = snapshot(json!({"functions": {"f1": ["echo b"]}}));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert_eq!(names(&changes.functions), vec!["f1"]);
    assert_eq!(
        changes.reason(EntityKind::Function, "f1"),
        Some(&ChangeReason::DefinitionChanged)
    );
}

#[test]
fn test_new_function_is_flagged_as_added() {
    let original = snapshot(json!({"functions": {"f1": ["echo a"]}}));
    let patched = snapshot(json!({"functions": {"f1": ["echo a"], "f2": ["echo c"]}}));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert_eq!(names(&changes.functions), vec!["f2"]);
    assert_eq!(
        changes.reason(EntityKind::Function, "f2"),
        Some(&ChangeReason::Added)
    );
}

#[test]
fn test_removed_function_is_not_reported() {
    let original = snapshot(json!({"functions": {"f1": ["echo a"], "gone": ["echo x"]}}));
    let patched = snapshot(json!({"functions": {"f1": ["echo a"]}}));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert!(changes.functions.is_empty());
}

#[test]
fn test_key_order_inside_function_body_is_not_a_change() {
    let original = snapshot(json!({
        "functions": {"f1": [{"command": "shell.exec", "params": {"script": "x", "shell": "bash"}}]}
    }));
    let patched = snapshot(json!({
        "functions": {"f1": [{"params": {"shell": "bash", "script": "x"}, "command": "shell.exec"}]}
    }));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert!(changes.functions.is_empty());
}

#[test]
fn test_reordered_command_steps_are_a_change() {
    let original = snapshot(json!({"functions": {"f1": ["step one", "step two"]}}));
    let patched = snapshot(json!({"functions": {"f1": ["step two", "step one"]}}));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert_eq!(names(&changes.functions), vec!["f1"]);
}

#[test]
fn test_missing_functions_section_in_original_flags_all_as_added() {
    let original = snapshot(json!({}));
    let patched = snapshot(json!({"functions": {"a": [], "b": null}}));

    let mut changes = ChangeSet::new();
    functions::check(&original, &patched, &mut changes);

    assert_eq!(names(&changes.functions), vec!["a", "b"]);
}

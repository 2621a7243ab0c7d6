//! Build variants stage tests.

mod common;

use common::{analyze_json, base_project, names};
use evgverify_core::{ChangeReason, EntityKind};
use serde_json::json;

// Scenario D: unchanged variant listing a changed task
#[test]
fn test_variant_listing_changed_task_is_flagged() {
    let variant = json!({"name": "v1", "run_on": ["rhel80"], "tasks": [{"name": "t1"}]});
    let changes = analyze_json(
        json!({"tasks": [{"name": "t1", "tags": ["a"]}], "buildvariants": [variant.clone()]}),
        json!({"tasks": [{"name": "t1", "tags": ["b"]}], "buildvariants": [variant]}),
    );

    assert_eq!(names(&changes.variants), vec!["v1"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["t1"]);
    assert_eq!(
        changes.reason(EntityKind::BuildVariant, "v1"),
        Some(&ChangeReason::IncludesChangedTask {
            task: "t1".to_string()
        })
    );
}

// Scenario E: new variant listing an unchanged task
#[test]
fn test_new_variant_requires_all_its_tasks() {
    let original = json!({
        "tasks": [{"name": "t9"}],
        "buildvariants": [{"name": "v1", "tasks": [{"name": "t9"}]}]
    });
    let mut patched = original.clone();
    patched["buildvariants"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "v2", "tasks": [{"name": "t9"}]}));

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["v2"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["t9"]);
    assert_eq!(
        changes.reason(EntityKind::BuildVariant, "v2"),
        Some(&ChangeReason::Added)
    );
    assert_eq!(
        changes.reason(EntityKind::Task, "t9"),
        Some(&ChangeReason::RequiredByVariant {
            variant: "v2".to_string()
        })
    );
}

#[test]
fn test_changed_expansions_require_all_tasks() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"][0]["expansions"]["compile_flags"] = json!("-j16");

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["v1"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["t1"]);
    assert_eq!(
        changes.reason(EntityKind::BuildVariant, "v1"),
        Some(&ChangeReason::ExpansionsChanged)
    );
}

#[test]
fn test_added_expansions_on_variant_without_any_is_a_change() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"][1]["expansions"] = json!({"python": "/opt/python3"});

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["v2"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["g1"]);
    assert_eq!(
        changes.reason(EntityKind::TaskGroup, "g1"),
        Some(&ChangeReason::RequiredByVariant {
            variant: "v2".to_string()
        })
    );
}

#[test]
fn test_empty_expansions_equal_missing_expansions() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"][1]["expansions"] = json!({});

    let changes = analyze_json(original, patched);

    assert!(changes.is_empty());
}

#[test]
fn test_changed_run_on_requires_all_tasks() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"][2]["run_on"] = json!(["windows-2022"]);

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["v3"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["t3"]);
    assert_eq!(
        changes.reason(EntityKind::BuildVariant, "v3"),
        Some(&ChangeReason::RunOnChanged)
    );
}

#[test]
fn test_changed_task_override_requires_only_that_task() {
    let original = json!({
        "tasks": [{"name": "compile"}, {"name": "lint"}],
        "buildvariants": [{
            "name": "linux",
            "run_on": ["rhel80"],
            "tasks": [{"name": "compile"}, {"name": "lint", "distros": ["small"]}]
        }]
    });
    let mut patched = original.clone();
    patched["buildvariants"][0]["tasks"][1]["distros"] = json!(["large"]);

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["linux"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["lint"]);
    assert_eq!(
        changes.reason(EntityKind::Task, "lint"),
        Some(&ChangeReason::TaskOverrideChanged {
            variant: "linux".to_string()
        })
    );
}

#[test]
fn test_task_added_to_existing_variant_is_required() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"][0]["tasks"]
        .as_array_mut()
        .unwrap()
        .push(json!({"name": "t2"}));

    let changes = analyze_json(original, patched);

    assert_eq!(names(&changes.variants), vec!["v1"]);
    assert_eq!(names(&changes.tasks_and_groups), vec!["t2"]);
}

#[test]
fn test_task_removed_from_variant_is_not_a_change() {
    let original = json!({
        "tasks": [{"name": "a"}, {"name": "b"}],
        "buildvariants": [{"name": "v", "tasks": [{"name": "a"}, {"name": "b"}]}]
    });
    let patched = json!({
        "tasks": [{"name": "a"}, {"name": "b"}],
        "buildvariants": [{"name": "v", "tasks": [{"name": "a"}]}]
    });

    let changes = analyze_json(original, patched);

    assert!(changes.is_empty());
}

#[test]
fn test_variant_not_listing_changed_task_is_not_flagged() {
    let original = base_project();
    let mut patched = original.clone();
    patched["tasks"][1]["commands"][1] = json!({"command": "attach.artifacts"});

    let changes = analyze_json(original, patched);

    // t2 changed but no variant runs it
    assert_eq!(names(&changes.tasks_and_groups), vec!["t2"]);
    assert!(changes.variants.is_empty());
}

#[test]
fn test_removed_variant_is_not_reported() {
    let original = base_project();
    let mut patched = original.clone();
    patched["buildvariants"].as_array_mut().unwrap().remove(2);

    let changes = analyze_json(original, patched);

    assert!(changes.is_empty());
}

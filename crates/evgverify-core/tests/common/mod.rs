//! Shared fixtures for analysis tests.

use evgverify_core::{analyze, ChangeSet, ConfigSnapshot};
use serde_json::{json, Value};

/// Build a snapshot from a JSON fixture
#[allow(dead_code)]
pub fn snapshot(value: Value) -> ConfigSnapshot {
    ConfigSnapshot::from_value(value).expect("fixture must be a valid snapshot")
}

/// Analyze two JSON fixtures
#[allow(dead_code)]
pub fn analyze_json(original: Value, patched: Value) -> ChangeSet {
    analyze(&snapshot(original), &snapshot(patched))
}

/// A small project exercising every section:
///
/// - `t1` calls `f1`, `t2` calls `f2`, `t3` calls nothing
/// - `g1` groups `t3` and runs `f2` in `setup_group`
/// - `v1` runs `t1`, `v2` runs `g1`, `v3` runs `t3`
#[allow(dead_code)]
pub fn base_project() -> Value {
    json!({
        "functions": {
            "f1": [{"command": "shell.exec", "params": {"script": "echo a"}}],
            "f2": [{"command": "shell.exec", "params": {"script": "echo setup"}}]
        },
        "tasks": [
            {"name": "t1", "commands": [{"func": "f1"}]},
            {"name": "t2", "commands": [{"func": "f2"}, {"command": "attach.results"}]},
            {"name": "t3", "commands": [{"command": "shell.exec"}]}
        ],
        "task_groups": [
            {
                "name": "g1",
                "max_hosts": 1,
                "setup_group": [{"func": "f2"}],
                "teardown_group": null,
                "tasks": ["t3"]
            }
        ],
        "buildvariants": [
            {
                "name": "v1",
                "run_on": ["rhel80-small"],
                "expansions": {"compile_flags": "-j8"},
                "tasks": [{"name": "t1"}]
            },
            {
                "name": "v2",
                "run_on": ["ubuntu2204"],
                "tasks": [{"name": "g1"}]
            },
            {
                "name": "v3",
                "run_on": ["windows"],
                "tasks": [{"name": "t3", "distros": ["windows-large"]}]
            }
        ]
    })
}

/// Collect a name set into a sorted vector for assertions
#[allow(dead_code)]
pub fn names(set: &std::collections::BTreeSet<String>) -> Vec<&str> {
    set.iter().map(String::as_str).collect()
}

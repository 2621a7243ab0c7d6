//! Original/patched state loading against a simulated working tree.

use evgverify_clients::errors::Result;
use evgverify_clients::{ConfigEvaluator, ConfigService, DiffProducer, ReverseApplyGuard};
use evgverify_core::errors::{ExError, ExErrorKind};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

const ORIGINAL_YAML: &str = "
functions:
  f1:
    - command: shell.exec
      params: {script: echo a}
tasks:
  - name: t1
    commands: [{func: f1}]
buildvariants:
  - name: v1
    run_on: [rhel80]
    tasks: [{name: t1}]
";

const PATCHED_YAML: &str = "
functions:
  f1:
    - command: shell.exec
      params: {script: echo b}
tasks:
  - name: t1
    commands: [{func: f1}]
buildvariants:
  - name: v1
    run_on: [rhel80]
    tasks: [{name: t1}]
";

/// Working tree that is either patched or reverted
struct FakeTree {
    reverted: Cell<bool>,
    calls: RefCell<Vec<String>>,
    patch_file: RefCell<Option<PathBuf>>,
    fail_reapply: bool,
}

impl FakeTree {
    fn new() -> Self {
        Self {
            reverted: Cell::new(false),
            calls: RefCell::new(Vec::new()),
            patch_file: RefCell::new(None),
            fail_reapply: false,
        }
    }

    fn failing_reapply() -> Self {
        Self {
            fail_reapply: true,
            ..Self::new()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl DiffProducer for FakeTree {
    fn diff(&self, target_branch: &str, output_file: &Path) -> Result<()> {
        self.calls.borrow_mut().push(format!("diff {}", target_branch));
        std::fs::write(output_file, "diff --git a/etc/evergreen.yml b/etc/evergreen.yml\n")
            .map_err(|e| ExError::new(ExErrorKind::Io).with_message(e.to_string()))?;
        *self.patch_file.borrow_mut() = Some(output_file.to_path_buf());
        Ok(())
    }

    fn apply(&self, patch_file: &Path, reverse: bool) -> Result<()> {
        assert_eq!(self.patch_file.borrow().as_deref(), Some(patch_file));
        assert!(patch_file.exists(), "patch file must exist while applied");
        self.calls
            .borrow_mut()
            .push(if reverse { "reverse" } else { "apply" }.to_string());
        if !reverse && self.fail_reapply {
            return Err(ExError::new(ExErrorKind::ExternalService).with_message("patch does not apply"));
        }
        self.reverted.set(reverse);
        Ok(())
    }
}

/// Evaluator reading the fake tree's state
struct FakeEvaluator<'a> {
    tree: &'a FakeTree,
    fail_original: bool,
    panic_original: bool,
}

impl<'a> FakeEvaluator<'a> {
    fn new(tree: &'a FakeTree) -> Self {
        Self {
            tree,
            fail_original: false,
            panic_original: false,
        }
    }
}

impl ConfigEvaluator for FakeEvaluator<'_> {
    fn evaluate(&self, project_config: &Path) -> Result<String> {
        assert_eq!(project_config, Path::new("etc/evergreen.yml"));
        let reverted = self.tree.reverted.get();
        self.tree
            .calls
            .borrow_mut()
            .push(format!("evaluate reverted={}", reverted));
        if reverted && self.panic_original {
            panic!("evaluator crashed");
        }
        if reverted && self.fail_original {
            return Err(ExError::new(ExErrorKind::ExternalService).with_message("evaluate failed"));
        }
        Ok(if reverted { ORIGINAL_YAML } else { PATCHED_YAML }.to_string())
    }
}

#[test]
fn test_loads_original_then_patched_and_restores_tree() {
    let tree = FakeTree::new();
    let evaluator = FakeEvaluator::new(&tree);
    let service = ConfigService::new(&tree, &evaluator);

    let states = service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
        .unwrap();

    assert_eq!(
        tree.calls(),
        vec![
            "diff origin/master",
            "reverse",
            "evaluate reverted=true",
            "apply",
            "evaluate reverted=false"
        ]
    );
    assert!(!tree.reverted.get());

    let changes = states.analyze();
    assert_eq!(changes.as_patch_args(), "-v v1 -t t1");
}

#[test]
fn test_patch_file_is_removed_after_loading() {
    let tree = FakeTree::new();
    let evaluator = FakeEvaluator::new(&tree);
    let service = ConfigService::new(&tree, &evaluator);

    service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/main")
        .unwrap();

    let patch_file = tree.patch_file.borrow().clone().unwrap();
    assert!(!patch_file.exists());
}

#[test]
fn test_failed_original_evaluation_still_restores_tree() {
    let tree = FakeTree::new();
    let evaluator = FakeEvaluator {
        fail_original: true,
        ..FakeEvaluator::new(&tree)
    };
    let service = ConfigService::new(&tree, &evaluator);

    let err = service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ExternalService);
    assert_eq!(err.message(), "evaluate failed");
    assert_eq!(
        tree.calls(),
        vec!["diff origin/master", "reverse", "evaluate reverted=true", "apply"]
    );
    assert!(!tree.reverted.get());
}

#[test]
fn test_restore_failure_is_reported_with_evaluation_error() {
    let tree = FakeTree::failing_reapply();
    let evaluator = FakeEvaluator {
        fail_original: true,
        ..FakeEvaluator::new(&tree)
    };
    let service = ConfigService::new(&tree, &evaluator);

    let err = service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::RestoreFailed);
    assert!(err.message().contains("patch does not apply"));
    assert_eq!(
        err.source_error().map(ExError::message),
        Some("evaluate failed")
    );
}

#[test]
fn test_restore_failure_after_successful_evaluation() {
    let tree = FakeTree::failing_reapply();
    let evaluator = FakeEvaluator::new(&tree);
    let service = ConfigService::new(&tree, &evaluator);

    let err = service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::RestoreFailed);
    assert!(err.source_error().is_none());
    // The patched state is never evaluated from a reverted tree
    assert!(!tree.calls().contains(&"evaluate reverted=false".to_string()));
}

#[test]
fn test_guard_reapplies_on_panic() {
    let tree = FakeTree::new();
    let evaluator = FakeEvaluator {
        panic_original: true,
        ..FakeEvaluator::new(&tree)
    };
    let service = ConfigService::new(&tree, &evaluator);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        service.load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
    }));

    assert!(outcome.is_err());
    assert!(!tree.reverted.get());
    assert_eq!(tree.calls().last().map(String::as_str), Some("apply"));
}

#[test]
fn test_guard_restore_applies_once() {
    let tree = FakeTree::new();
    let patch = tempfile::NamedTempFile::new().unwrap();
    tree.diff("origin/master", patch.path()).unwrap();

    let guard = ReverseApplyGuard::reverse(&tree, patch.path()).unwrap();
    assert!(tree.reverted.get());
    guard.restore().unwrap();

    assert!(!tree.reverted.get());
    assert_eq!(tree.calls(), vec!["diff origin/master", "reverse", "apply"]);
}

#[test]
fn test_invalid_evaluator_output_names_the_state() {
    struct BrokenOriginal<'a>(&'a FakeTree);
    impl ConfigEvaluator for BrokenOriginal<'_> {
        fn evaluate(&self, _project_config: &Path) -> Result<String> {
            Ok(if self.0.reverted.get() {
                "tasks: {t1: {}}".to_string()
            } else {
                PATCHED_YAML.to_string()
            })
        }
    }

    let tree = FakeTree::new();
    let evaluator = BrokenOriginal(&tree);
    let service = ConfigService::new(&tree, &evaluator);

    let err = service
        .load_config_states(Path::new("etc/evergreen.yml"), "origin/master")
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidSnapshot);
    assert_eq!(err.section(), Some("original"));
    assert!(!tree.reverted.get());
}

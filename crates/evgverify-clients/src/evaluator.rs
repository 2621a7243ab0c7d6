//! Project configuration evaluation via the Evergreen CLI.

use crate::errors::Result;
use crate::process::Tool;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default Evergreen CLI program
pub const DEFAULT_EVERGREEN_BIN: &str = "evergreen";

/// Produces the fully evaluated text of a project configuration
pub trait ConfigEvaluator {
    /// Evaluate the configuration at `project_config`, resolving includes
    /// and templating.
    ///
    /// # Errors
    ///
    /// Fails if the evaluator cannot be run or rejects the configuration.
    fn evaluate(&self, project_config: &Path) -> Result<String>;
}

/// Evaluates configurations with `evergreen evaluate`
#[derive(Debug, Clone)]
pub struct EvergreenCli {
    tool: Tool,
}

impl EvergreenCli {
    pub fn new(tool: Tool) -> Self {
        Self { tool }
    }

    pub fn evaluate_args(project_config: &Path) -> Vec<OsString> {
        vec![
            "evaluate".into(),
            "--path".into(),
            project_config.as_os_str().to_owned(),
        ]
    }
}

impl Default for EvergreenCli {
    fn default() -> Self {
        Self::new(Tool::new(PathBuf::from(DEFAULT_EVERGREEN_BIN)))
    }
}

impl ConfigEvaluator for EvergreenCli {
    fn evaluate(&self, project_config: &Path) -> Result<String> {
        self.tool.run(&Self::evaluate_args(project_config))
    }
}

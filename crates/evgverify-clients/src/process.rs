//! Blocking execution of external command-line tools.

use crate::errors::{tool_failed, tool_spawn, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// An external program run from a fixed working directory
#[derive(Debug, Clone)]
pub struct Tool {
    program: PathBuf,
    current_dir: Option<PathBuf>,
}

impl Tool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            current_dir: None,
        }
    }

    /// Run the tool from `dir` instead of the process working directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// Run the tool to completion and return its stdout.
    ///
    /// # Errors
    ///
    /// `ERR_EXTERNAL_SERVICE` if the program cannot be started or exits
    /// with a non-zero status; stderr is carried in the message.
    pub fn run(&self, args: &[OsString]) -> Result<String> {
        let name = self.program.display().to_string();
        tracing::debug!(
            tool = %name,
            args = ?args,
            cwd = ?self.current_dir,
            "Running external command."
        );

        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|e| tool_spawn(&name, e))?;
        if !output.status.success() {
            return Err(tool_failed(&name, output.status, &output.stderr));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evgverify_core::errors::ExErrorKind;

    #[test]
    fn test_missing_program_is_external_service_error() {
        let tool = Tool::new("evgverify-no-such-program-7f3a");
        let err = tool.run(&[]).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert_eq!(err.op(), Some("evgverify-no-such-program-7f3a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_returned() {
        let tool = Tool::new("sh");
        let out = tool
            .run(&["-c".into(), "printf 'functions: {}'".into()])
            .unwrap();
        assert_eq!(out, "functions: {}");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_carries_stderr() {
        let tool = Tool::new("sh");
        let err = tool
            .run(&["-c".into(), "echo 'fatal: bad revision' >&2; exit 128".into()])
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::ExternalService);
        assert!(err.message().contains("fatal: bad revision"));
        assert!(err.message().contains("128"));
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_in_configured_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let tool = Tool::new("pwd").in_dir(dir.path());
        let out = tool.run(&[]).unwrap();
        let reported = std::fs::canonicalize(out.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}

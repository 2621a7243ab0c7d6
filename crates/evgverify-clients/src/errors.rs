//! Error handling for evgverify-clients
//!
//! Wraps evgverify-core ExError with client-specific helpers

use evgverify_core::errors::{ExError, ExErrorKind, VerifyError};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    let kind = if err.kind() == std::io::ErrorKind::NotFound {
        ExErrorKind::NotFound
    } else {
        ExErrorKind::Io
    };
    ExError::new(kind)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a YAML parse error
pub fn yaml_parse(err: serde_yaml::Error) -> ExError {
    ExError::from(VerifyError::YamlParse {
        message: err.to_string(),
    })
    .with_op("parse_config")
}

/// Create an error for an external tool that could not be started
pub fn tool_spawn(tool: &str, err: std::io::Error) -> ExError {
    VerifyError::ToolSpawn {
        tool: tool.to_string(),
        message: err.to_string(),
    }
    .into()
}

/// Create an error for an external tool that exited unsuccessfully
pub fn tool_failed(tool: &str, status: std::process::ExitStatus, stderr: &[u8]) -> ExError {
    VerifyError::ToolFailed {
        tool: tool.to_string(),
        status: status.to_string(),
        stderr: String::from_utf8_lossy(stderr).trim().to_string(),
    }
    .into()
}

/// Create an error for a working tree that could not be restored after the
/// pending patch was reverse-applied. The evaluation error, if any, is kept
/// as the source.
pub fn restore_failed(restore_err: &ExError, evaluate_err: Option<ExError>) -> ExError {
    let err = ExError::new(ExErrorKind::RestoreFailed)
        .with_op("reapply_patch")
        .with_message(format!(
            "Failed to re-apply the pending patch; the working tree may be missing local changes: {}",
            restore_err
        ));
    match evaluate_err {
        Some(source) => err.with_source(source),
        None => err,
    }
}

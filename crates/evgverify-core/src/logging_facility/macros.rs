//! Canonical logging macros
//!
//! Lifecycle events for the operations the engine runs (`verify`,
//! `compare`). Every event carries the emitting module as `component`, the
//! operation as `op` and the lifecycle step as `event`; callers add the run
//! id and whatever describes the input or outcome.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use evgverify_core::log_op_start;
/// # use evgverify_core_types::RunContext;
/// let ctx = RunContext::new();
/// log_op_start!(
///     "verify",
///     run_id = %ctx.run_id,
///     path = "etc/evergreen.yml",
///     target_branch = "origin/master"
/// );
/// log_op_start!("compare", run_id = %ctx.run_id, original = "before.yml", patched = "after.yml");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// The run outcome sizes go after `duration_ms`.
///
/// ```
/// # use evgverify_core::log_op_end;
/// # use evgverify_core::{analyze, ConfigSnapshot};
/// let changes = analyze(&ConfigSnapshot::default(), &ConfigSnapshot::default());
/// log_op_end!(
///     "compare",
///     duration_ms = 42,
///     variants_len = changes.variants.len(),
///     tasks_and_groups_len = changes.tasks_and_groups.len()
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into `ExError`, so a tool failure can be
/// logged as the `VerifyError` it was raised as. The error's code lands in
/// `err.code`.
///
/// # Example
///
/// ```
/// # use evgverify_core::log_op_error;
/// # use evgverify_core::errors::VerifyError;
/// let err = VerifyError::ToolFailed {
///     tool: "git".to_string(),
///     status: "exit status: 128".to_string(),
///     stderr: "fatal: bad revision 'origin/nope'".to_string(),
/// };
/// log_op_error!("verify", err, duration_ms = 10, target_branch = "origin/nope");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = ex_err.message(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = evgverify_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            message = ex_err.message(),
            $($field)*
        );
    }};
}

//! evgverify Core - change-propagation analysis for Evergreen project configs
//!
//! This crate compares two evaluated states of an Evergreen project
//! configuration and finds what a pending change affects:
//! - Configuration snapshot model (functions, tasks, task groups, build variants)
//! - Four ordered detection stages sharing one change accumulator
//! - The `ChangeSet` result rendered as `evergreen patch` arguments
//! - Error and structured logging facilities shared by the workspace
//!
//! Loading snapshots (git, evergreen CLI, YAML) lives in `evgverify-clients`.

pub mod analyze;
pub mod changes;
pub mod checks;
pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use analyze::analyze;
pub use changes::{ChangeReason, ChangeRecord, ChangeSet, EntityKind};
pub use checks::Stage;
pub use errors::{ExError, ExErrorKind, Result, VerifyError};
pub use model::{BuildVariant, ConfigSnapshot, ConfigStates, Entity};

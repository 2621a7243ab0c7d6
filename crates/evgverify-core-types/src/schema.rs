//! Canonical schema constants for structured logging and events
//!
//! Field keys emitted by the logging macros and the analysis stages, as read
//! back by the test capture layer.

// Canonical field keys for structured logging
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Analysis fields
pub const FIELD_STAGE: &str = "stage";
pub const FIELD_ENTITY_NAME: &str = "entity_name";
pub const FIELD_REASON: &str = "reason";

// Run outcome sizes
pub const FIELD_VARIANTS_LEN: &str = "variants_len";
pub const FIELD_TASKS_AND_GROUPS_LEN: &str = "tasks_and_groups_len";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

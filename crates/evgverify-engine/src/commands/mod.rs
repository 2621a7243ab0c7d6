//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate between
//! configuration loading and the core analysis.

pub mod engine_command;
pub mod verify;

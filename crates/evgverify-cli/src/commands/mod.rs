//! CLI command implementations

pub mod compare;
pub mod output;
pub mod verify;

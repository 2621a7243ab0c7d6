//! evgverify Engine - Orchestration layer
//!
//! Coordinates configuration loading (evgverify-clients) with the
//! change-propagation analysis (evgverify-core) for one verification run,
//! and owns the run's lifecycle logging.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand};
pub use commands::verify::{compare_files, VerificationOrchestrator, VerificationReport};

//! evgverify Clients - external tooling and configuration loading
//!
//! Provides:
//! - Canonical YAML loading of evaluated configurations
//! - Evergreen CLI (`evergreen evaluate`) and git CLI (`git diff`, `git apply`)
//!   behind the `ConfigEvaluator` and `DiffProducer` traits
//! - Original/patched state loading with guaranteed restore of the working tree

pub mod config_service;
pub mod errors;
pub mod evaluator;
pub mod git;
pub mod process;
pub mod yaml;

// Re-export key types
pub use config_service::{ConfigService, ReverseApplyGuard};
pub use errors::Result;
pub use evaluator::{ConfigEvaluator, EvergreenCli};
pub use git::{DiffProducer, GitCli};
pub use process::Tool;

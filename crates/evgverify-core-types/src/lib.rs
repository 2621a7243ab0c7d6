//! Core types shared across evgverify facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Run identity**: RunId, RunContext
//! - **Schema constants**: Canonical field keys and event names

pub mod run;
pub mod schema;

pub use run::{RunContext, RunId};

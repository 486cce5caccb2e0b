//! Core domain model types for adflow.
//!
//! This module contains:
//! - Stage names and execution status enums
//! - The per-item outcome type produced by single-create stages

mod outcome;
mod status;

pub use outcome::ItemOutcome;
pub use status::{StageName, StageStatus};

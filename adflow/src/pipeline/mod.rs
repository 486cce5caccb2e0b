//! Deployment execution.
//!
//! This module provides:
//! - The batch mutator that submits operations in bounded chunks
//! - The deployment engine running the five stages in order
//! - The serializable report of a finished run

mod batch;
mod engine;
mod report;

pub use batch::{BatchMutator, BatchReceipt};
pub use engine::DeploymentEngine;
pub use report::DeploymentReport;

/// Maximum number of operations the platform accepts in one mutate call.
pub const MAX_OPERATIONS_PER_CALL: usize = 500;

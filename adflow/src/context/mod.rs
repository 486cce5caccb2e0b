//! Run-scoped state for a deployment.
//!
//! This module provides:
//! - The write-once identifier map resolving natural keys to handles
//! - The ordered result log
//! - The deployment context threaded through every stage

mod deployment;
mod identifiers;
mod log;

pub use deployment::DeploymentContext;
pub use identifiers::{AdGroupKey, IdentifierKind, IdentifierMap};
pub use log::{LogEntry, LogOutcome, ResultLog};

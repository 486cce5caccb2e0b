//! Testing utilities for adflow deployments.
//!
//! This module provides:
//! - Input fixtures and an in-memory deployment harness
//! - Assertions over deployment reports
//! - The failure-injecting in-memory client

mod assertions;
mod fixtures;

pub use assertions::{
    assert_clean, assert_log_contains, assert_log_excludes, assert_log_lines,
    assert_stage_status,
};
pub use fixtures::{
    dry_run_settings, full_input, keyword_rows, single_keyword_input, TestDeployment,
};
pub use crate::client::{FailureRule, InMemoryAdsClient, InMemoryConnector, Submission};

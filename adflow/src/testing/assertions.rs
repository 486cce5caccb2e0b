//! Assertions over deployment reports.

use crate::core::{StageName, StageStatus};
use crate::pipeline::DeploymentReport;

/// Asserts that a stage finished with the expected status.
///
/// # Panics
///
/// Panics if the stage is missing from the report or has another status.
pub fn assert_stage_status(report: &DeploymentReport, stage: StageName, expected: StageStatus) {
    let actual = report
        .stage(stage)
        .map(|r| r.status)
        .unwrap_or_else(|| panic!("stage {stage} missing from report"));
    assert_eq!(
        actual, expected,
        "Expected stage {stage} to be {expected}, got {actual}"
    );
}

/// Asserts that the rendered log equals the expected lines.
///
/// # Panics
///
/// Panics if the lines differ.
pub fn assert_log_lines(report: &DeploymentReport, expected: &[&str]) {
    let actual = report.log.lines();
    assert_eq!(actual, expected, "Result log mismatch");
}

/// Asserts that some log line contains `needle`.
///
/// # Panics
///
/// Panics if no line matches.
pub fn assert_log_contains(report: &DeploymentReport, needle: &str) {
    assert!(
        report.log.lines().iter().any(|line| line.contains(needle)),
        "Expected a log line containing '{needle}', got {:?}",
        report.log.lines()
    );
}

/// Asserts that no log line contains `needle`.
///
/// # Panics
///
/// Panics if a line matches.
pub fn assert_log_excludes(report: &DeploymentReport, needle: &str) {
    let lines = report.log.lines();
    assert!(
        !lines.iter().any(|line| line.contains(needle)),
        "Expected no log line containing '{needle}', got {lines:?}"
    );
}

/// Asserts that the run logged no failures.
///
/// # Panics
///
/// Panics if any failure was logged.
pub fn assert_clean(report: &DeploymentReport) {
    assert!(
        report.is_clean(),
        "Expected no failures, got {:?}",
        report.log.lines()
    );
}

//! The ordered, human-readable outcome trail of a deployment.

use crate::core::StageName;
use crate::errors::ConnectionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a log entry reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutcome {
    /// Something was created.
    Success,
    /// Something could not be created.
    Failure,
}

impl LogOutcome {
    /// The marker every rendered line starts with.
    #[must_use]
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
        }
    }
}

/// One line of the result log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Success or failure.
    pub outcome: LogOutcome,
    /// The stage that produced the entry; `None` for connection setup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<StageName>,
    /// Human-readable description.
    pub message: String,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

impl LogEntry {
    /// Returns true for success entries.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == LogOutcome::Success
    }

    /// Returns true for failure entries.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome == LogOutcome::Failure
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.outcome.marker(), self.message)
    }
}

/// Ordered sequence of outcome records for one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLog {
    entries: Vec<LogEntry>,
}

impl ResultLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log holding the single top-level failure of an aborted run.
    #[must_use]
    pub fn from_connection_error(err: &ConnectionError) -> Self {
        let mut log = Self::new();
        log.push(None, LogOutcome::Failure, err.log_line());
        log
    }

    /// Appends a success entry.
    pub fn success(&mut self, stage: StageName, message: impl Into<String>) {
        self.push(Some(stage), LogOutcome::Success, message.into());
    }

    /// Appends a failure entry.
    pub fn failure(&mut self, stage: StageName, message: impl Into<String>) {
        self.push(Some(stage), LogOutcome::Failure, message.into());
    }

    fn push(&mut self, stage: Option<StageName>, outcome: LogOutcome, message: String) {
        self.entries.push(LogEntry {
            outcome,
            stage,
            message,
            recorded_at: Utc::now(),
        });
    }

    /// Returns all entries in order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Returns entries produced by one stage.
    pub fn for_stage(&self, stage: StageName) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.stage == Some(stage))
    }

    /// Renders every entry as a marker-prefixed line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    /// Returns the number of success entries.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    /// Returns the number of failure entries.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_failure()).count()
    }

    /// Returns true if any failure was logged.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(LogEntry::is_failure)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_preserves_order_and_markers() {
        let mut log = ResultLog::new();
        log.success(StageName::Campaigns, "Campaign Created: CampA");
        log.failure(StageName::Campaigns, "Campaign Error (CampB): quota");

        assert_eq!(
            log.lines(),
            vec![
                "✅ Campaign Created: CampA".to_string(),
                "❌ Campaign Error (CampB): quota".to_string(),
            ]
        );
        assert_eq!(log.success_count(), 1);
        assert_eq!(log.failure_count(), 1);
        assert!(log.has_failures());
    }

    #[test]
    fn test_for_stage_filters() {
        let mut log = ResultLog::new();
        log.success(StageName::Campaigns, "a");
        log.success(StageName::Keywords, "b");

        let keywords: Vec<_> = log.for_stage(StageName::Keywords).collect();
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].message, "b");
    }

    #[test]
    fn test_connection_failure_log() {
        let log = ResultLog::from_connection_error(&ConnectionError::setup("invalid_grant"));

        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].stage, None);
        assert_eq!(
            log.lines()[0],
            "❌ Critical Connection Error: Client setup failed: invalid_grant"
        );
    }

    #[test]
    fn test_log_serialization() {
        let mut log = ResultLog::new();
        log.success(StageName::Ads, "Created 2 RSAs.");

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["entries"][0]["outcome"], "success");
        assert_eq!(json["entries"][0]["stage"], "ads");
    }
}

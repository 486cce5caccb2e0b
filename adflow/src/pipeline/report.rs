//! The outcome of one deployment run.

use crate::client::CustomerId;
use crate::context::{IdentifierMap, ResultLog};
use crate::core::StageName;
use crate::stages::StageReport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

/// Everything a finished deployment produced.
#[derive(Debug, Clone, Serialize)]
pub struct DeploymentReport {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// The target account.
    pub customer_id: CustomerId,
    /// When the first stage started.
    pub started_at: DateTime<Utc>,
    /// When the last stage finished.
    pub finished_at: DateTime<Utc>,
    /// One entry per stage, in execution order.
    pub stages: Vec<StageReport>,
    /// The ordered outcome trail.
    pub log: ResultLog,
    /// Handles created during the run.
    pub identifiers: IdentifierMap,
}

impl DeploymentReport {
    /// Returns the report of one stage.
    #[must_use]
    pub fn stage(&self, stage: StageName) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }

    /// Returns true if no failure was logged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.log.has_failures()
    }

    /// Total wall time in milliseconds.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_ms(&self) -> f64 {
        (self.finished_at - self.started_at)
            .num_microseconds()
            .map_or(0.0, |us| us as f64 / 1000.0)
    }

    /// Converts to a JSON value.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Writes the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), crate::errors::AdflowError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

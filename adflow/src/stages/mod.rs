//! Stage trait and the five deployment stages.
//!
//! Each stage consumes one input table plus the identifier map filled by the
//! stages before it, creates its resources, and records outcomes in the
//! result log. Stages never fail as a whole; failures end up as log lines.

mod ad_groups;
mod ads;
mod campaigns;
mod keywords;
mod sitelinks;

pub use ad_groups::AdGroupStage;
pub use ads::AdStage;
pub use campaigns::{amount_micros, CampaignStage};
pub use keywords::KeywordStage;
pub use sitelinks::SitelinkStage;

use crate::context::DeploymentContext;
use crate::core::{StageName, StageStatus};
use crate::input::DeploymentInput;
use crate::resources::{Operation, Resource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use tracing::{error, info};

/// Trait for deployment stages.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> StageName;

    /// Returns true if the identifier map holds the parents this stage needs.
    fn is_ready(&self, ctx: &DeploymentContext<'_>) -> bool;

    /// Executes the stage against its input table.
    async fn execute(&self, ctx: &mut DeploymentContext<'_>, input: &DeploymentInput)
        -> StageTally;
}

/// Counts produced by one stage execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTally {
    /// Resources created.
    pub created: usize,
    /// Resources whose creation failed or was abandoned.
    pub failed: usize,
    /// Rows dropped because a parent was missing.
    pub dropped: usize,
}

impl StageTally {
    /// Adds another tally to this one.
    pub fn absorb(&mut self, other: StageTally) {
        self.created += other.created;
        self.failed += other.failed;
        self.dropped += other.dropped;
    }
}

/// Summary of one stage in a deployment report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    /// The stage.
    pub stage: StageName,
    /// How it finished.
    pub status: StageStatus,
    /// Resources created.
    pub created: usize,
    /// Resources whose creation failed or was abandoned.
    pub failed: usize,
    /// Rows dropped because a parent was missing.
    pub dropped: usize,
    /// Wall time in milliseconds.
    pub duration_ms: f64,
}

impl StageReport {
    /// Report of a stage that did not run.
    #[must_use]
    pub fn skipped(stage: StageName) -> Self {
        Self {
            stage,
            status: StageStatus::Skip,
            created: 0,
            failed: 0,
            dropped: 0,
            duration_ms: 0.0,
        }
    }

    /// Report of an executed stage.
    #[must_use]
    pub fn from_tally(stage: StageName, tally: StageTally, duration_ms: f64) -> Self {
        Self {
            stage,
            status: StageStatus::from_counts(tally.created, tally.failed),
            created: tally.created,
            failed: tally.failed,
            dropped: tally.dropped,
            duration_ms,
        }
    }
}

/// The five stages in execution order.
#[must_use]
pub fn default_stages() -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(CampaignStage),
        Box::new(AdGroupStage),
        Box::new(KeywordStage),
        Box::new(AdStage),
        Box::new(SitelinkStage),
    ]
}

/// Submits a stage's bulk operations inside one failure boundary and logs a
/// single aggregate line. An empty operation list logs nothing.
pub(crate) async fn submit_aggregate<R: Resource>(
    ctx: &mut DeploymentContext<'_>,
    stage: StageName,
    operations: &[Operation<R>],
    success: impl FnOnce(usize) -> String + Send,
    failure_label: &str,
) -> StageTally {
    if operations.is_empty() {
        return StageTally::default();
    }

    match ctx.mutator().submit(operations).await {
        Ok(receipt) => {
            info!(
                stage = %stage,
                created = receipt.operations,
                chunks = receipt.chunks,
                "Batch submitted"
            );
            ctx.log.success(stage, success(receipt.operations));
            StageTally {
                created: receipt.operations,
                ..StageTally::default()
            }
        }
        Err(err) => {
            error!(
                stage = %stage,
                committed = err.committed_operations,
                abandoned_chunks = err.abandoned_chunks(),
                error = %err,
                "Batch submission failed"
            );
            ctx.log.failure(stage, format!("{failure_label}: {err}"));
            StageTally {
                created: err.committed_operations,
                failed: operations.len() - err.committed_operations,
                dropped: 0,
            }
        }
    }
}

/// Keeps the first item for every key, preserving input order.
pub(crate) fn first_seen<T, K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stages_follow_order() {
        let names: Vec<StageName> = default_stages().iter().map(|s| s.name()).collect();
        assert_eq!(names, StageName::ORDER.to_vec());
    }

    #[test]
    fn test_first_seen_keeps_order() {
        let kept = first_seen(vec![("a", 1), ("b", 2), ("a", 3), ("c", 4)], |(k, _)| *k);
        assert_eq!(kept, vec![("a", 1), ("b", 2), ("c", 4)]);
    }

    #[test]
    fn test_report_from_tally() {
        let tally = StageTally {
            created: 2,
            failed: 1,
            dropped: 4,
        };
        let report = StageReport::from_tally(StageName::Keywords, tally, 1.5);

        assert_eq!(report.status, StageStatus::Partial);
        assert_eq!(report.dropped, 4);
        assert_eq!(StageReport::skipped(StageName::Ads).status, StageStatus::Skip);
    }

    #[test]
    fn test_tally_absorb() {
        let mut tally = StageTally::default();
        tally.absorb(StageTally {
            created: 1,
            failed: 2,
            dropped: 3,
        });
        tally.absorb(StageTally {
            created: 1,
            failed: 0,
            dropped: 0,
        });
        assert_eq!(tally.created, 2);
        assert_eq!(tally.failed, 2);
        assert_eq!(tally.dropped, 3);
    }
}

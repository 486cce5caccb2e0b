//! The context object threaded through every stage of one deployment.

use super::{IdentifierMap, ResultLog};
use crate::client::{AdsClient, CustomerId};
use crate::config::DeployConfig;
use crate::core::StageName;
use crate::events::EventSink;
use crate::pipeline::BatchMutator;
use tracing::debug;

/// Everything a stage needs: the client, the run configuration, and the
/// run-scoped identifier map and result log.
///
/// The context is created empty for every run and owned by it; stages get
/// exclusive access in turn.
pub struct DeploymentContext<'a> {
    client: &'a dyn AdsClient,
    customer_id: &'a CustomerId,
    config: &'a DeployConfig,
    events: &'a dyn EventSink,
    /// Handles created so far in this run.
    pub identifiers: IdentifierMap,
    /// Outcome trail of this run.
    pub log: ResultLog,
}

impl std::fmt::Debug for DeploymentContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentContext")
            .field("customer_id", &self.customer_id)
            .field("config", &self.config)
            .field("identifiers", &self.identifiers)
            .field("log_entries", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl<'a> DeploymentContext<'a> {
    /// Creates a fresh context for one run.
    #[must_use]
    pub fn new(
        client: &'a dyn AdsClient,
        customer_id: &'a CustomerId,
        config: &'a DeployConfig,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            client,
            customer_id,
            config,
            events,
            identifiers: IdentifierMap::new(),
            log: ResultLog::new(),
        }
    }

    /// Returns the run configuration.
    #[must_use]
    pub fn config(&self) -> &'a DeployConfig {
        self.config
    }

    /// Returns the target account.
    #[must_use]
    pub fn customer_id(&self) -> &'a CustomerId {
        self.customer_id
    }

    /// Returns the event sink.
    #[must_use]
    pub fn events(&self) -> &'a dyn EventSink {
        self.events
    }

    /// Returns a batch mutator bound to this run's client and account.
    #[must_use]
    pub fn mutator(&self) -> BatchMutator<'a> {
        BatchMutator::new(self.client, self.customer_id, self.config.batch_chunk_size)
            .with_event_sink(self.events)
    }

    /// Records a child row whose parent is missing.
    ///
    /// Silent unless `report_unresolved` is configured, in which case a
    /// failure line is logged.
    pub fn unresolved(&mut self, stage: StageName, message: impl Into<String>) {
        let message = message.into();
        debug!(stage = %stage, %message, "Unresolved reference dropped");
        if self.config.report_unresolved {
            self.log.failure(stage, message);
        }
    }

    /// Consumes the context, returning the identifier map and result log.
    #[must_use]
    pub fn into_parts(self) -> (IdentifierMap, ResultLog) {
        (self.identifiers, self.log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::InMemoryAdsClient;
    use crate::events::NoOpEventSink;

    #[test]
    fn test_unresolved_is_silent_by_default() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);

        ctx.unresolved(StageName::Keywords, "missing ad group");
        assert!(ctx.log.is_empty());
    }

    #[test]
    fn test_unresolved_logged_when_configured() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default().with_report_unresolved(true);
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);

        ctx.unresolved(StageName::Keywords, "missing ad group");
        assert_eq!(ctx.log.failure_count(), 1);
    }
}

//! The deployment engine.

use super::DeploymentReport;
use crate::client::{AdsClient, Connector, CustomerId};
use crate::config::{ClientSettings, DeployConfig};
use crate::context::DeploymentContext;
use crate::errors::ConnectionError;
use crate::events::{
    EventSink, NoOpEventSink, DEPLOY_COMPLETED, DEPLOY_STARTED, STAGE_COMPLETED, STAGE_SKIPPED,
    STAGE_STARTED,
};
use crate::input::DeploymentInput;
use crate::stages::{default_stages, Stage, StageReport};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use uuid::Uuid;

/// Runs the five stages in fixed order against one account.
///
/// Every call starts with an empty identifier map and result log, so
/// deploying the same input twice creates every resource twice.
pub struct DeploymentEngine {
    config: DeployConfig,
    events: Arc<dyn EventSink>,
    stages: Vec<Box<dyn Stage>>,
}

impl std::fmt::Debug for DeploymentEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentEngine")
            .field("config", &self.config)
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

impl Default for DeploymentEngine {
    fn default() -> Self {
        Self::new(DeployConfig::default())
    }
}

impl DeploymentEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: DeployConfig) -> Self {
        Self {
            config,
            events: Arc::new(NoOpEventSink),
            stages: default_stages(),
        }
    }

    /// Sets the progress event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    /// Establishes the client and runs a deployment.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the settings are incomplete, the customer
    /// id is unusable or the connector fails. No stage runs in that case.
    pub async fn deploy(
        &self,
        connector: &dyn Connector,
        settings: &ClientSettings,
        input: &DeploymentInput,
    ) -> Result<DeploymentReport, ConnectionError> {
        let (client, customer_id) = self.connect(connector, settings).await.map_err(|err| {
            error!(error = %err, "Deployment aborted before any stage");
            err
        })?;
        Ok(self.run(client.as_ref(), &customer_id, input).await)
    }

    async fn connect(
        &self,
        connector: &dyn Connector,
        settings: &ClientSettings,
    ) -> Result<(Arc<dyn AdsClient>, CustomerId), ConnectionError> {
        settings.validate()?;
        let customer_id = CustomerId::parse(&settings.customer_id)?;
        let client = connector.connect(settings).await?;
        info!(customer_id = %customer_id, "Connected to ads platform");
        Ok((client, customer_id))
    }

    /// Runs the stages with an already connected client.
    pub async fn run(
        &self,
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        input: &DeploymentInput,
    ) -> DeploymentReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let run_start = Instant::now();
        let events = self.events.as_ref();

        info!(
            run_id = %run_id,
            customer_id = %customer_id,
            rows = input.row_count(),
            "Deployment started"
        );
        events
            .emit(
                DEPLOY_STARTED,
                Some(serde_json::json!({
                    "run_id": run_id.to_string(),
                    "customer_id": customer_id.as_str(),
                })),
            )
            .await;

        let mut ctx = DeploymentContext::new(client, customer_id, &self.config, events);
        let mut reports = Vec::with_capacity(self.stages.len());

        for stage in &self.stages {
            let name = stage.name();

            if !stage.is_ready(&ctx) {
                info!(stage = %name, "Stage skipped, prerequisites missing");
                events
                    .emit(
                        STAGE_SKIPPED,
                        Some(serde_json::json!({
                            "stage": name,
                            "reason": "no parent resources were created",
                        })),
                    )
                    .await;
                reports.push(StageReport::skipped(name));
                continue;
            }

            info!(stage = %name, "{}", name.progress_message());
            events
                .emit(
                    STAGE_STARTED,
                    Some(serde_json::json!({
                        "stage": name,
                        "message": name.progress_message(),
                    })),
                )
                .await;

            let stage_start = Instant::now();
            let tally = stage.execute(&mut ctx, input).await;
            let duration_ms = stage_start.elapsed().as_secs_f64() * 1000.0;
            let report = StageReport::from_tally(name, tally, duration_ms);

            info!(
                stage = %name,
                status = %report.status,
                created = report.created,
                failed = report.failed,
                dropped = report.dropped,
                duration_ms,
                "Stage completed"
            );
            events
                .emit(STAGE_COMPLETED, serde_json::to_value(&report).ok())
                .await;
            reports.push(report);
        }

        let (identifiers, log) = ctx.into_parts();
        let total_ms = run_start.elapsed().as_secs_f64() * 1000.0;

        info!(
            run_id = %run_id,
            successes = log.success_count(),
            failures = log.failure_count(),
            duration_ms = total_ms,
            "Deployment completed"
        );
        events
            .emit(
                DEPLOY_COMPLETED,
                Some(serde_json::json!({
                    "run_id": run_id.to_string(),
                    "successes": log.success_count(),
                    "failures": log.failure_count(),
                    "duration_ms": total_ms,
                })),
            )
            .await;

        DeploymentReport {
            run_id,
            customer_id: customer_id.clone(),
            started_at,
            finished_at: Utc::now(),
            stages: reports,
            log,
            identifiers,
        }
    }
}

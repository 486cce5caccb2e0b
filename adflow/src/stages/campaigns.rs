//! Budget and campaign creation.

use super::{first_seen, Stage, StageTally};
use crate::context::DeploymentContext;
use crate::core::{ItemOutcome, StageName};
use crate::errors::PerItemCreateError;
use crate::input::{CampaignSpec, DeploymentInput};
use crate::pipeline::BatchMutator;
use crate::resources::{
    AdvertisingChannelType, BudgetDeliveryMethod, Campaign, CampaignBudget, CampaignHandle,
    CampaignStatus, ManualCpc, NetworkSettings, Operation, ResourceKind,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, warn};

const MICROS_PER_UNIT: f64 = 1_000_000.0;

/// Converts a currency amount to micros, truncating sub-micro fractions.
///
/// Products within a millionth of a whole micro are rounded to it, so that
/// `0.1` becomes `100_000` rather than losing a micro to float noise.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn amount_micros(amount: f64) -> Result<i64, String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(format!("daily budget must be a positive amount, got {amount}"));
    }

    let scaled = amount * MICROS_PER_UNIT;
    let rounded = scaled.round();
    let micros = if (scaled - rounded).abs() < 1e-6 {
        rounded
    } else {
        scaled.trunc()
    };

    if micros >= i64::MAX as f64 {
        return Err(format!("daily budget {amount} is too large"));
    }
    if micros < 1.0 {
        return Err(format!("daily budget {amount} is below one micro"));
    }

    Ok(micros as i64)
}

/// Creates one budget and one campaign per distinct (name, amount) pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct CampaignStage;

impl CampaignStage {
    fn budget_name(ctx: &DeploymentContext<'_>, campaign: &str, sequence: usize) -> String {
        format!(
            "{campaign}{}{}-{sequence}",
            ctx.config().budget_name_separator,
            Utc::now().format("%Y%m%d%H%M%S%6f"),
        )
    }

    async fn create(
        mutator: &BatchMutator<'_>,
        spec: &CampaignSpec,
        budget_name: String,
    ) -> Result<CampaignHandle, PerItemCreateError> {
        let amount_micros = amount_micros(spec.daily_budget).map_err(|reason| {
            PerItemCreateError::invalid_input(ResourceKind::CampaignBudget, &spec.name, reason)
        })?;

        let budget = mutator
            .create_one(&Operation::create(CampaignBudget {
                name: budget_name,
                amount_micros,
                delivery_method: BudgetDeliveryMethod::Standard,
            }))
            .await
            .map_err(|e| PerItemCreateError::remote(ResourceKind::CampaignBudget, &spec.name, e))?;

        debug!(campaign = %spec.name, budget = %budget, "Budget created");

        mutator
            .create_one(&Operation::create(Campaign {
                name: spec.name.clone(),
                advertising_channel_type: AdvertisingChannelType::Search,
                status: CampaignStatus::Paused,
                manual_cpc: ManualCpc {
                    enhanced_cpc_enabled: false,
                },
                campaign_budget: budget,
                network_settings: NetworkSettings::search_only(),
            }))
            .await
            .map_err(|e| PerItemCreateError::remote(ResourceKind::Campaign, &spec.name, e))
    }
}

#[async_trait]
impl Stage for CampaignStage {
    fn name(&self) -> StageName {
        StageName::Campaigns
    }

    fn is_ready(&self, _ctx: &DeploymentContext<'_>) -> bool {
        true
    }

    async fn execute(
        &self,
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
    ) -> StageTally {
        let distinct = first_seen(&input.campaigns, |spec| {
            (spec.name.clone(), spec.daily_budget.to_bits())
        });
        let mutator = ctx.mutator();

        let mut outcomes = Vec::with_capacity(distinct.len());
        for (sequence, spec) in distinct.into_iter().enumerate() {
            let budget_name = Self::budget_name(ctx, &spec.name, sequence);
            let result = Self::create(&mutator, spec, budget_name).await;
            outcomes.push(ItemOutcome::from_result(spec.name.clone(), result));
        }

        let mut tally = StageTally::default();
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Created { key, handle } => {
                    info!(campaign = %key, handle = %handle, "Campaign created");
                    if let Err(conflict) = ctx.identifiers.insert_campaign(key.clone(), handle) {
                        warn!(error = %conflict, "Keeping the first campaign handle");
                    }
                    ctx.log
                        .success(StageName::Campaigns, format!("Campaign Created: {key}"));
                    tally.created += 1;
                }
                ItemOutcome::Failed { key, error } => {
                    warn!(campaign = %key, error = %error, "Campaign creation failed");
                    ctx.log
                        .failure(StageName::Campaigns, format!("Campaign Error ({key}): {error}"));
                    tally.failed += 1;
                }
            }
        }
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{CustomerId, FailureRule, InMemoryAdsClient};
    use crate::config::DeployConfig;
    use crate::events::NoOpEventSink;

    #[test]
    fn test_amount_micros() {
        assert_eq!(amount_micros(50.0), Ok(50_000_000));
        assert_eq!(amount_micros(0.1), Ok(100_000));
        assert_eq!(amount_micros(12.345_678_9), Ok(12_345_678));
        assert!(amount_micros(0.0).is_err());
        assert!(amount_micros(-5.0).is_err());
        assert!(amount_micros(f64::NAN).is_err());
        assert!(amount_micros(1e-9).is_err());
    }

    #[tokio::test]
    async fn test_duplicate_rows_create_once() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);
        let input = DeploymentInput::new().with_campaigns(vec![
            CampaignSpec::new("CampA", 50.0),
            CampaignSpec::new("CampA", 50.0),
            CampaignSpec::new("CampB", 10.0),
        ]);

        let tally = CampaignStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.created, 2);
        assert_eq!(client.call_count(ResourceKind::CampaignBudget), 2);
        assert_eq!(client.call_count(ResourceKind::Campaign), 2);
        assert_eq!(
            ctx.log.lines(),
            vec!["✅ Campaign Created: CampA", "✅ Campaign Created: CampB"]
        );
    }

    #[tokio::test]
    async fn test_campaign_defaults() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);
        let input = DeploymentInput::new().with_campaigns(vec![CampaignSpec::new("CampA", 50.0)]);

        CampaignStage.execute(&mut ctx, &input).await;

        let budget = client.submissions_for(ResourceKind::CampaignBudget)[0].payloads[0].clone();
        assert_eq!(budget["amount_micros"], 50_000_000);
        assert!(budget["name"].as_str().unwrap().starts_with("CampA - "));

        let campaign = client.submissions_for(ResourceKind::Campaign)[0].payloads[0].clone();
        assert_eq!(campaign["status"], "PAUSED");
        assert_eq!(campaign["advertising_channel_type"], "SEARCH");
        assert_eq!(campaign["manual_cpc"]["enhanced_cpc_enabled"], false);
        assert_eq!(campaign["network_settings"]["target_content_network"], false);
        assert_eq!(campaign["campaign_budget"], "customers/1/campaignBudgets/1");
        assert!(ctx.identifiers.campaign("CampA").is_some());
    }

    #[tokio::test]
    async fn test_failure_is_logged_and_next_item_continues() {
        let client = InMemoryAdsClient::new().with_rule(
            FailureRule::on(ResourceKind::Campaign)
                .with_label("CampA")
                .with_message("duplicate campaign name"),
        );
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);
        let input = DeploymentInput::new().with_campaigns(vec![
            CampaignSpec::new("CampA", 50.0),
            CampaignSpec::new("CampB", 10.0),
        ]);

        let tally = CampaignStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.created, 1);
        assert_eq!(tally.failed, 1);
        assert_eq!(
            ctx.log.lines(),
            vec![
                "❌ Campaign Error (CampA): duplicate campaign name",
                "✅ Campaign Created: CampB",
            ]
        );
        assert!(ctx.identifiers.campaign("CampA").is_none());
        // the orphaned budget is not cleaned up
        assert_eq!(client.created_count(ResourceKind::CampaignBudget), 2);
    }

    #[tokio::test]
    async fn test_invalid_budget_makes_no_remote_call() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);
        let input = DeploymentInput::new().with_campaigns(vec![CampaignSpec::new("CampA", -1.0)]);

        let tally = CampaignStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.failed, 1);
        assert!(client.submissions().is_empty());
        assert!(ctx.log.lines()[0].starts_with("❌ Campaign Error (CampA): invalid campaign budget input"));
    }

    #[tokio::test]
    async fn test_same_name_different_budget_keeps_first_handle() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);
        let input = DeploymentInput::new().with_campaigns(vec![
            CampaignSpec::new("CampA", 50.0),
            CampaignSpec::new("CampA", 75.0),
        ]);

        let tally = CampaignStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.created, 2);
        assert_eq!(
            ctx.identifiers.campaign("CampA").unwrap().resource_name(),
            "customers/1/campaigns/1"
        );
    }
}

//! Ad group creation.

use super::{first_seen, Stage, StageTally};
use crate::context::{DeploymentContext, IdentifierKind};
use crate::core::{ItemOutcome, StageName};
use crate::errors::PerItemCreateError;
use crate::input::DeploymentInput;
use crate::resources::{AdGroup, AdGroupType, Operation, ResourceKind};
use async_trait::async_trait;
use tracing::{info, warn};

/// Creates one ad group per distinct (campaign, ad group) pair whose
/// campaign exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdGroupStage;

#[async_trait]
impl Stage for AdGroupStage {
    fn name(&self) -> StageName {
        StageName::AdGroups
    }

    fn is_ready(&self, ctx: &DeploymentContext<'_>) -> bool {
        !ctx.identifiers.is_empty(IdentifierKind::Campaign)
    }

    async fn execute(
        &self,
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
    ) -> StageTally {
        let keys = first_seen(input.ad_groups.iter().map(|row| row.key()), Clone::clone);
        let mutator = ctx.mutator();
        let bid = ctx.config().default_cpc_bid_micros;
        let mut tally = StageTally::default();

        let mut outcomes = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(campaign) = ctx.identifiers.campaign(&key.campaign).cloned() else {
                tally.dropped += 1;
                ctx.unresolved(
                    StageName::AdGroups,
                    format!("Ad Group Skipped ({key}): campaign not created"),
                );
                continue;
            };

            let result = mutator
                .create_one(&Operation::create(AdGroup {
                    name: key.ad_group.clone(),
                    campaign,
                    ad_group_type: AdGroupType::SearchStandard,
                    cpc_bid_micros: bid,
                }))
                .await
                .map_err(|e| PerItemCreateError::remote(ResourceKind::AdGroup, key.to_string(), e));
            outcomes.push(ItemOutcome::from_result(key, result));
        }

        for outcome in outcomes {
            match outcome {
                ItemOutcome::Created { key, handle } => {
                    info!(ad_group = %key, handle = %handle, "Ad group created");
                    let message = format!("Ad Group Created: {}", key.ad_group);
                    if let Err(conflict) = ctx.identifiers.insert_ad_group(key, handle) {
                        warn!(error = %conflict, "Keeping the first ad group handle");
                    }
                    ctx.log.success(StageName::AdGroups, message);
                    tally.created += 1;
                }
                ItemOutcome::Failed { key, error } => {
                    warn!(ad_group = %key, error = %error, "Ad group creation failed");
                    ctx.log
                        .failure(StageName::AdGroups, format!("Ad Group Error ({key}): {error}"));
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
    use crate::context::AdGroupKey;
    use crate::events::NoOpEventSink;
    use crate::input::AdGroupSpec;
    use crate::resources::CampaignHandle;

    fn seeded<'a>(
        client: &'a InMemoryAdsClient,
        customer: &'a CustomerId,
        config: &'a DeployConfig,
    ) -> DeploymentContext<'a> {
        let mut ctx = DeploymentContext::new(client, customer, config, &NoOpEventSink);
        ctx.identifiers
            .insert_campaign("CampA", CampaignHandle::from_resource_name("customers/1/campaigns/7"))
            .unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_not_ready_without_campaigns() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let ctx = DeploymentContext::new(&client, &customer, &config, &NoOpEventSink);

        assert!(!AdGroupStage.is_ready(&ctx));
        assert!(AdGroupStage.is_ready(&seeded(&client, &customer, &config)));
    }

    #[tokio::test]
    async fn test_dedup_and_silent_drop() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = seeded(&client, &customer, &config);
        let input = DeploymentInput::new().with_ad_groups(vec![
            AdGroupSpec::new("CampA", "AG1"),
            AdGroupSpec::new("CampA", "AG1"),
            AdGroupSpec::new("CampZ", "AG1"),
        ]);

        let tally = AdGroupStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.created, 1);
        assert_eq!(tally.dropped, 1);
        assert_eq!(client.call_count(ResourceKind::AdGroup), 1);
        assert_eq!(ctx.log.lines(), vec!["✅ Ad Group Created: AG1"]);

        let payload = client.submissions_for(ResourceKind::AdGroup)[0].payloads[0].clone();
        assert_eq!(payload["campaign"], "customers/1/campaigns/7");
        assert_eq!(payload["cpc_bid_micros"], 2_000_000);
        assert_eq!(payload["ad_group_type"], "SEARCH_STANDARD");
        assert!(ctx.identifiers.ad_group(&AdGroupKey::new("CampA", "AG1")).is_some());
    }

    #[tokio::test]
    async fn test_unresolved_reported_when_configured() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default().with_report_unresolved(true);
        let mut ctx = seeded(&client, &customer, &config);
        let input =
            DeploymentInput::new().with_ad_groups(vec![AdGroupSpec::new("CampZ", "AG9")]);

        AdGroupStage.execute(&mut ctx, &input).await;

        assert_eq!(
            ctx.log.lines(),
            vec!["❌ Ad Group Skipped (CampZ / AG9): campaign not created"]
        );
    }

    #[tokio::test]
    async fn test_failure_names_the_pair() {
        let client = InMemoryAdsClient::new()
            .with_rule(FailureRule::on(ResourceKind::AdGroup).with_message("bad bid"));
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = seeded(&client, &customer, &config);
        let input = DeploymentInput::new().with_ad_groups(vec![AdGroupSpec::new("CampA", "AG1")]);

        let tally = AdGroupStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.failed, 1);
        assert_eq!(ctx.log.lines(), vec!["❌ Ad Group Error (CampA / AG1): bad bid"]);
        assert!(ctx.identifiers.is_empty(IdentifierKind::AdGroup));
    }
}

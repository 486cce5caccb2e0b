//! Keyword criteria, submitted in bulk.

use super::{submit_aggregate, Stage, StageTally};
use crate::context::{DeploymentContext, IdentifierKind};
use crate::core::StageName;
use crate::input::DeploymentInput;
use crate::resources::{AdGroupCriterion, KeywordInfo, KeywordMatchType, Operation};
use async_trait::async_trait;
use tracing::debug;

/// Adds every keyword whose ad group exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordStage;

#[async_trait]
impl Stage for KeywordStage {
    fn name(&self) -> StageName {
        StageName::Keywords
    }

    fn is_ready(&self, ctx: &DeploymentContext<'_>) -> bool {
        !ctx.identifiers.is_empty(IdentifierKind::AdGroup)
    }

    async fn execute(
        &self,
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
    ) -> StageTally {
        let mut dropped = 0;
        let mut operations = Vec::with_capacity(input.keywords.len());

        for row in &input.keywords {
            let key = row.ad_group_key();
            match ctx.identifiers.ad_group(&key) {
                Some(ad_group) => operations.push(Operation::create(AdGroupCriterion {
                    ad_group: ad_group.clone(),
                    keyword: KeywordInfo {
                        text: row.keyword.clone(),
                        match_type: KeywordMatchType::from_label(&row.match_type),
                    },
                })),
                None => {
                    dropped += 1;
                    ctx.unresolved(
                        StageName::Keywords,
                        format!("Keyword Skipped ({key}, '{}'): ad group not created", row.keyword),
                    );
                }
            }
        }

        debug!(operations = operations.len(), dropped, "Keyword operations built");

        let mut tally = submit_aggregate(
            ctx,
            StageName::Keywords,
            &operations,
            |count| format!("Added {count} Keywords."),
            "Keyword Error",
        )
        .await;
        tally.dropped = dropped;
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
    use crate::input::KeywordSpec;
    use crate::resources::{AdGroupHandle, ResourceKind};

    fn seeded<'a>(
        client: &'a InMemoryAdsClient,
        customer: &'a CustomerId,
        config: &'a DeployConfig,
    ) -> DeploymentContext<'a> {
        let mut ctx = DeploymentContext::new(client, customer, config, &NoOpEventSink);
        ctx.identifiers
            .insert_ad_group(
                AdGroupKey::new("CampA", "AG1"),
                AdGroupHandle::from_resource_name("customers/1/adGroups/3"),
            )
            .unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_match_types_and_silent_drop() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = seeded(&client, &customer, &config);
        let input = DeploymentInput::new().with_keywords(vec![
            KeywordSpec::new("CampA", "AG1", "running shoes", "Broad Match"),
            KeywordSpec::new("CampA", "AG1", "trail shoes", "[Exact] Match"),
            KeywordSpec::new("CampA", "AG1", "red shoes", "Phrase"),
            KeywordSpec::new("CampA", "AG1", "blue shoes", "Unknown"),
            KeywordSpec::new("CampA", "AG2", "orphan", "Exact"),
        ]);

        let tally = KeywordStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.created, 4);
        assert_eq!(tally.dropped, 1);
        assert_eq!(ctx.log.lines(), vec!["✅ Added 4 Keywords."]);

        let submission = client.submissions_for(ResourceKind::AdGroupCriterion)[0].clone();
        let match_types: Vec<&str> = submission
            .payloads
            .iter()
            .map(|p| p["keyword"]["match_type"].as_str().unwrap())
            .collect();
        assert_eq!(match_types, vec!["BROAD", "EXACT", "PHRASE", "UNSPECIFIED"]);
        assert_eq!(submission.payloads[0]["keyword"]["text"], "running shoes");
        assert_eq!(submission.payloads[0]["ad_group"], "customers/1/adGroups/3");
    }

    #[tokio::test]
    async fn test_batch_failure_logs_one_error() {
        let client = InMemoryAdsClient::new().with_rule(
            FailureRule::on(ResourceKind::AdGroupCriterion).with_message("policy violation"),
        );
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = seeded(&client, &customer, &config);
        let input = DeploymentInput::new().with_keywords(vec![
            KeywordSpec::new("CampA", "AG1", "a", "Exact"),
            KeywordSpec::new("CampA", "AG1", "b", "Exact"),
        ]);

        let tally = KeywordStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.failed, 2);
        assert_eq!(ctx.log.lines(), vec!["❌ Keyword Error: policy violation"]);
    }

    #[tokio::test]
    async fn test_nothing_resolvable_logs_nothing() {
        let client = InMemoryAdsClient::new();
        let customer = CustomerId::parse("1").unwrap();
        let config = DeployConfig::default();
        let mut ctx = seeded(&client, &customer, &config);
        let input = DeploymentInput::new()
            .with_keywords(vec![KeywordSpec::new("CampB", "AG1", "a", "Exact")]);

        let tally = KeywordStage.execute(&mut ctx, &input).await;

        assert_eq!(tally.dropped, 1);
        assert!(ctx.log.is_empty());
        assert!(client.submissions().is_empty());
    }
}

//! Input fixtures and a deployment harness for tests.

use std::sync::Arc;

use crate::client::{FailureRule, InMemoryAdsClient, InMemoryConnector};
use crate::config::{ClientSettings, DeployConfig};
use crate::errors::ConnectionError;
use crate::events::CollectingEventSink;
use crate::input::{
    AdGroupSpec, AdSpec, CampaignSpec, DeploymentInput, KeywordSpec, SitelinkAssociationSpec,
};
use crate::pipeline::{DeploymentEngine, DeploymentReport};

/// Settings that pass validation, for dry runs.
#[must_use]
pub fn dry_run_settings() -> ClientSettings {
    ClientSettings::new("dry-run-token", "123-456-7890")
}

/// One campaign with one ad group and one exact keyword.
#[must_use]
pub fn single_keyword_input() -> DeploymentInput {
    DeploymentInput::new()
        .with_campaigns(vec![CampaignSpec::new("CampA", 50.0)])
        .with_ad_groups(vec![AdGroupSpec::new("CampA", "AG1")])
        .with_keywords(vec![KeywordSpec::new("CampA", "AG1", "shoes", "Exact")])
}

/// `count` keyword rows under one ad group, texts `kw-0` onwards.
#[must_use]
pub fn keyword_rows(campaign: &str, ad_group: &str, count: usize) -> Vec<KeywordSpec> {
    (0..count)
        .map(|i| KeywordSpec::new(campaign, ad_group, format!("kw-{i}"), "Phrase"))
        .collect()
}

/// An input touching every stage: two campaigns, two ad groups, keywords,
/// ads and sitelinks.
#[must_use]
pub fn full_input() -> DeploymentInput {
    DeploymentInput::new()
        .with_campaigns(vec![
            CampaignSpec::new("CampA", 50.0),
            CampaignSpec::new("CampB", 20.0),
        ])
        .with_ad_groups(vec![
            AdGroupSpec::new("CampA", "AG1"),
            AdGroupSpec::new("CampB", "AG2"),
        ])
        .with_keywords(vec![
            KeywordSpec::new("CampA", "AG1", "running shoes", "Broad"),
            KeywordSpec::new("CampB", "AG2", "hiking boots", "Phrase"),
        ])
        .with_ads(vec![
            AdSpec::new("CampA", "AG1", "https://example.com/running")
                .with_headline(1, "Running Shoes")
                .with_headline(2, "Free Shipping")
                .with_headline(3, "Shop Now")
                .with_description(1, "Lightweight shoes for every runner."),
            AdSpec::new("CampB", "AG2", "https://example.com/hiking")
                .with_headline(1, "Hiking Boots")
                .with_headline(2, "Waterproof")
                .with_headline(3, "Trail Ready")
                .with_description(1, "Boots built for the trail."),
        ])
        .with_sitelinks(vec![
            SitelinkAssociationSpec::new("A1", "CampA", "Sale", "https://example.com/sale"),
            SitelinkAssociationSpec::new("A1", "CampB", "Sale", "https://example.com/sale"),
            SitelinkAssociationSpec::new("A2", "CampA", "Contact", "https://example.com/contact"),
        ])
}

/// A deployment engine wired to an in-memory client and a collecting sink.
pub struct TestDeployment {
    /// The client every run talks to.
    pub client: Arc<InMemoryAdsClient>,
    /// Events emitted by every run.
    pub events: Arc<CollectingEventSink>,
    /// The engine under test.
    pub engine: DeploymentEngine,
}

impl TestDeployment {
    /// Creates a harness with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DeployConfig::default())
    }

    /// Creates a harness with the given configuration.
    #[must_use]
    pub fn with_config(config: DeployConfig) -> Self {
        let events = Arc::new(CollectingEventSink::new());
        Self {
            client: Arc::new(InMemoryAdsClient::new()),
            engine: DeploymentEngine::new(config).with_event_sink(events.clone()),
            events,
        }
    }

    /// Makes matching client calls fail.
    #[must_use]
    pub fn failing(self, rule: FailureRule) -> Self {
        self.client.fail_when(rule);
        self
    }

    /// Runs a deployment through the in-memory connector.
    pub async fn deploy(
        &self,
        settings: &ClientSettings,
        input: &DeploymentInput,
    ) -> Result<DeploymentReport, ConnectionError> {
        let connector = InMemoryConnector::new(self.client.clone());
        self.engine.deploy(&connector, settings, input).await
    }

    /// Runs a deployment with valid dry-run settings.
    pub async fn run(&self, input: &DeploymentInput) -> Result<DeploymentReport, ConnectionError> {
        self.deploy(&dry_run_settings(), input).await
    }
}

impl Default for TestDeployment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_rows() {
        let rows = keyword_rows("CampA", "AG1", 3);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].keyword, "kw-2");
    }

    #[test]
    fn test_full_input_covers_every_table() {
        let input = full_input();
        assert!(!input.campaigns.is_empty());
        assert!(!input.ad_groups.is_empty());
        assert!(!input.keywords.is_empty());
        assert!(!input.ads.is_empty());
        assert!(!input.sitelinks.is_empty());
    }

    #[tokio::test]
    async fn test_harness_runs() {
        let harness = TestDeployment::new();
        let report = harness.run(&single_keyword_input()).await.unwrap();

        assert_eq!(report.log.success_count(), 3);
        assert!(!harness.events.is_empty());
    }
}

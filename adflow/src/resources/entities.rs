//! Resources created by a deployment and the operations that carry them.

use super::{
    AdGroupAdStatus, AdGroupHandle, AdGroupType, AdvertisingChannelType, AssetFieldType,
    AssetHandle, BudgetDeliveryMethod, BudgetHandle, CampaignHandle, CampaignStatus,
    KeywordMatchType, ResourceKind,
};
use crate::client::{AdsClient, CustomerId, MutateResponse};
use crate::errors::RemoteError;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;

/// A resource type the engine can create on the platform.
///
/// Each implementation routes its operations to the matching mutate endpoint
/// of [`AdsClient`].
#[async_trait]
pub trait Resource: Debug + Clone + Serialize + Send + Sync + 'static {
    /// The platform resource type.
    const KIND: ResourceKind;

    /// A short human-readable label used in logs and failure matching.
    fn label(&self) -> String;

    /// Submits a batch of create operations to this resource's endpoint.
    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError>;
}

/// A create operation for one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation<R> {
    /// The resource to create.
    pub create: R,
}

impl<R> Operation<R> {
    /// Wraps a resource in a create operation.
    #[must_use]
    pub fn create(resource: R) -> Self {
        Self { create: resource }
    }
}

/// Create operation for a campaign budget.
pub type CampaignBudgetOperation = Operation<CampaignBudget>;
/// Create operation for a campaign.
pub type CampaignOperation = Operation<Campaign>;
/// Create operation for an ad group.
pub type AdGroupOperation = Operation<AdGroup>;
/// Create operation for a keyword criterion.
pub type AdGroupCriterionOperation = Operation<AdGroupCriterion>;
/// Create operation for an ad.
pub type AdGroupAdOperation = Operation<AdGroupAd>;
/// Create operation for an asset.
pub type AssetOperation = Operation<Asset>;
/// Create operation for a campaign-asset link.
pub type CampaignAssetOperation = Operation<CampaignAsset>;

/// A daily budget referenced by exactly one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignBudget {
    /// Budget name; must be unique in the account.
    pub name: String,
    /// Daily amount in micros of the account currency.
    pub amount_micros: i64,
    /// Delivery method.
    pub delivery_method: BudgetDeliveryMethod,
}

/// Manual CPC bidding settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ManualCpc {
    /// Whether enhanced CPC adjustments are on.
    pub enhanced_cpc_enabled: bool,
}

/// Network targeting of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkSettings {
    /// Serve on the search engine results page.
    pub target_google_search: bool,
    /// Serve on search partner sites.
    pub target_search_network: bool,
    /// Serve on the content network.
    pub target_content_network: bool,
}

impl NetworkSettings {
    /// Search-only targeting: search and search partners, no content network.
    #[must_use]
    pub fn search_only() -> Self {
        Self {
            target_google_search: true,
            target_search_network: true,
            target_content_network: false,
        }
    }
}

/// A search campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Campaign {
    /// Campaign name.
    pub name: String,
    /// Advertising channel.
    pub advertising_channel_type: AdvertisingChannelType,
    /// Serving status.
    pub status: CampaignStatus,
    /// Bidding settings.
    pub manual_cpc: ManualCpc,
    /// The budget paired with this campaign.
    pub campaign_budget: BudgetHandle,
    /// Network targeting.
    pub network_settings: NetworkSettings,
}

/// An ad group inside a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdGroup {
    /// Ad group name.
    pub name: String,
    /// Parent campaign.
    pub campaign: CampaignHandle,
    /// Ad group type.
    pub ad_group_type: AdGroupType,
    /// Default max CPC bid in micros.
    pub cpc_bid_micros: i64,
}

/// Keyword text and match type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordInfo {
    /// The keyword text, verbatim.
    pub text: String,
    /// The match type.
    pub match_type: KeywordMatchType,
}

/// A keyword criterion inside an ad group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdGroupCriterion {
    /// Parent ad group.
    pub ad_group: AdGroupHandle,
    /// The keyword.
    pub keyword: KeywordInfo,
}

/// One text variant of a responsive ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdTextAsset {
    /// The text.
    pub text: String,
}

impl AdTextAsset {
    /// Creates a text asset.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A responsive search ad.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResponsiveSearchAd {
    /// Headline variants, in input slot order.
    pub headlines: Vec<AdTextAsset>,
    /// Description variants, in input slot order.
    pub descriptions: Vec<AdTextAsset>,
}

/// Ad content.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Ad {
    /// Landing pages.
    pub final_urls: Vec<String>,
    /// Responsive search ad body.
    pub responsive_search_ad: ResponsiveSearchAd,
}

/// An ad inside an ad group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdGroupAd {
    /// Parent ad group.
    pub ad_group: AdGroupHandle,
    /// Serving status.
    pub status: AdGroupAdStatus,
    /// The ad.
    pub ad: Ad,
}

/// Sitelink payload of an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitelinkAsset {
    /// Display text of the link.
    pub link_text: String,
}

/// A reusable link asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Sitelink payload.
    pub sitelink_asset: SitelinkAsset,
    /// Landing pages.
    pub final_urls: Vec<String>,
}

/// A link between a campaign and an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignAsset {
    /// The campaign.
    pub campaign: CampaignHandle,
    /// The asset.
    pub asset: AssetHandle,
    /// Placement of the asset.
    pub field_type: AssetFieldType,
}

#[async_trait]
impl Resource for CampaignBudget {
    const KIND: ResourceKind = ResourceKind::CampaignBudget;

    fn label(&self) -> String {
        self.name.clone()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_campaign_budgets(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for Campaign {
    const KIND: ResourceKind = ResourceKind::Campaign;

    fn label(&self) -> String {
        self.name.clone()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_campaigns(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for AdGroup {
    const KIND: ResourceKind = ResourceKind::AdGroup;

    fn label(&self) -> String {
        self.name.clone()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_ad_groups(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for AdGroupCriterion {
    const KIND: ResourceKind = ResourceKind::AdGroupCriterion;

    fn label(&self) -> String {
        self.keyword.text.clone()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_ad_group_criteria(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for AdGroupAd {
    const KIND: ResourceKind = ResourceKind::AdGroupAd;

    fn label(&self) -> String {
        self.ad.final_urls.first().cloned().unwrap_or_default()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_ad_group_ads(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for Asset {
    const KIND: ResourceKind = ResourceKind::Asset;

    fn label(&self) -> String {
        self.sitelink_asset.link_text.clone()
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_assets(customer_id, operations).await
    }
}

#[async_trait]
impl Resource for CampaignAsset {
    const KIND: ResourceKind = ResourceKind::CampaignAsset;

    fn label(&self) -> String {
        format!("{} -> {}", self.campaign, self.asset)
    }

    async fn mutate(
        client: &dyn AdsClient,
        customer_id: &CustomerId,
        operations: &[Operation<Self>],
    ) -> Result<MutateResponse, RemoteError> {
        client.mutate_campaign_assets(customer_id, operations).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_only_network_settings() {
        let settings = NetworkSettings::search_only();
        assert!(settings.target_google_search);
        assert!(settings.target_search_network);
        assert!(!settings.target_content_network);
    }

    #[test]
    fn test_operation_serializes_create_payload() {
        let op = Operation::create(CampaignBudget {
            name: "CampA - 1".to_string(),
            amount_micros: 50_000_000,
            delivery_method: BudgetDeliveryMethod::Standard,
        });

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["create"]["amount_micros"], 50_000_000);
        assert_eq!(json["create"]["delivery_method"], "STANDARD");
    }

    #[test]
    fn test_campaign_asset_label_names_both_sides() {
        let link = CampaignAsset {
            campaign: CampaignHandle::from_resource_name("customers/1/campaigns/1"),
            asset: AssetHandle::from_resource_name("customers/1/assets/9"),
            field_type: AssetFieldType::Sitelink,
        };

        assert_eq!(
            link.label(),
            "customers/1/campaigns/1 -> customers/1/assets/9"
        );
    }
}

//! The remote collaborator surface consumed by the engine.
//!
//! The platform exposes one mutate endpoint per resource type. Transport,
//! authentication and retries live behind [`AdsClient`] implementations.

mod memory;

pub use memory::{FailureRule, InMemoryAdsClient, InMemoryConnector, Submission};

use crate::config::ClientSettings;
use crate::errors::{ConnectionError, RemoteError};
use crate::resources::{
    AdGroupAdOperation, AdGroupCriterionOperation, AdGroupOperation, AssetOperation,
    CampaignAssetOperation, CampaignBudgetOperation, CampaignOperation,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A normalized advertiser account number (digits only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(String);

impl CustomerId {
    /// Parses a customer id, accepting the dashed `123-456-7890` display form.
    pub fn parse(raw: &str) -> Result<Self, ConnectionError> {
        let digits: String = raw.trim().chars().filter(|c| *c != '-').collect();

        if digits.is_empty() {
            return Err(ConnectionError::missing("customer_id"));
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConnectionError::InvalidCustomerId {
                value: raw.to_string(),
                reason: "must contain only digits and dashes".to_string(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resource names created by a successful mutate call, in operation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MutateResponse {
    /// One resource name per submitted operation.
    pub results: Vec<String>,
}

impl MutateResponse {
    /// Creates a response from resource names.
    #[must_use]
    pub fn new(results: Vec<String>) -> Self {
        Self { results }
    }
}

/// A live handle to the ads platform.
///
/// Every method accepts a batch of create operations for one resource type
/// and returns either all created resource names or a fault.
#[async_trait]
pub trait AdsClient: Send + Sync {
    /// Creates campaign budgets.
    async fn mutate_campaign_budgets(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignBudgetOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Creates campaigns.
    async fn mutate_campaigns(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Creates ad groups.
    async fn mutate_ad_groups(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Creates keyword criteria.
    async fn mutate_ad_group_criteria(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupCriterionOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Creates ads.
    async fn mutate_ad_group_ads(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupAdOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Creates assets.
    async fn mutate_assets(
        &self,
        customer_id: &CustomerId,
        operations: &[AssetOperation],
    ) -> Result<MutateResponse, RemoteError>;

    /// Links assets to campaigns.
    async fn mutate_campaign_assets(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignAssetOperation],
    ) -> Result<MutateResponse, RemoteError>;
}

/// Builds a client handle from connection settings.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Establishes a client.
    async fn connect(&self, settings: &ClientSettings)
        -> Result<Arc<dyn AdsClient>, ConnectionError>;
}

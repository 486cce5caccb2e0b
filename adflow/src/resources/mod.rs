//! Typed remote resources and their create operations.
//!
//! This module contains:
//! - Enumerations supplied by the platform schema
//! - Opaque resource handles returned by the platform
//! - The resources the engine creates, wrapped in [`Operation`]s

mod entities;
mod enums;
mod handle;

pub use entities::{
    Ad, AdGroup, AdGroupAd, AdGroupAdOperation, AdGroupCriterion, AdGroupCriterionOperation,
    AdGroupOperation, AdTextAsset, Asset, AssetOperation, Campaign, CampaignAsset,
    CampaignAssetOperation, CampaignBudget, CampaignBudgetOperation, CampaignOperation,
    KeywordInfo, ManualCpc, NetworkSettings, Operation, Resource, ResponsiveSearchAd,
    SitelinkAsset,
};
pub use enums::{
    AdGroupAdStatus, AdGroupType, AdvertisingChannelType, AssetFieldType, BudgetDeliveryMethod,
    CampaignStatus, KeywordMatchType, ResourceKind,
};
pub use handle::{AdGroupHandle, AssetHandle, BudgetHandle, CampaignHandle, Handle};

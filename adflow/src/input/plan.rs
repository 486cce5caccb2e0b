//! The normalized tables handed to the engine, and the plan file they are
//! loaded from.

use super::{
    join_sitelinks, AdGroupSpec, AdSpec, CampaignSpec, KeywordSpec, SitelinkAssetSpec,
    SitelinkAssociationSpec, SitelinkLinkRow, StructureRow,
};
use crate::errors::AdflowError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every input table of one deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentInput {
    /// Campaign rows, possibly repeated.
    #[serde(default)]
    pub campaigns: Vec<CampaignSpec>,
    /// Ad group rows, possibly repeated.
    #[serde(default)]
    pub ad_groups: Vec<AdGroupSpec>,
    /// Keyword rows.
    #[serde(default)]
    pub keywords: Vec<KeywordSpec>,
    /// Ad rows.
    #[serde(default)]
    pub ads: Vec<AdSpec>,
    /// Pre-joined sitelink rows.
    #[serde(default)]
    pub sitelinks: Vec<SitelinkAssociationSpec>,
}

impl DeploymentInput {
    /// Creates an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Projects structure sheet rows into the campaign and ad group tables.
    #[must_use]
    pub fn from_structure(rows: &[StructureRow]) -> Self {
        Self {
            campaigns: rows.iter().map(StructureRow::campaign_spec).collect(),
            ad_groups: rows.iter().filter_map(StructureRow::ad_group_spec).collect(),
            ..Self::default()
        }
    }

    /// Sets the campaign table.
    #[must_use]
    pub fn with_campaigns(mut self, campaigns: Vec<CampaignSpec>) -> Self {
        self.campaigns = campaigns;
        self
    }

    /// Sets the ad group table.
    #[must_use]
    pub fn with_ad_groups(mut self, ad_groups: Vec<AdGroupSpec>) -> Self {
        self.ad_groups = ad_groups;
        self
    }

    /// Sets the keyword table.
    #[must_use]
    pub fn with_keywords(mut self, keywords: Vec<KeywordSpec>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Sets the ad table.
    #[must_use]
    pub fn with_ads(mut self, ads: Vec<AdSpec>) -> Self {
        self.ads = ads;
        self
    }

    /// Sets the sitelink table.
    #[must_use]
    pub fn with_sitelinks(mut self, sitelinks: Vec<SitelinkAssociationSpec>) -> Self {
        self.sitelinks = sitelinks;
        self
    }

    /// Returns the total number of rows across all tables.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.campaigns.len()
            + self.ad_groups.len()
            + self.keywords.len()
            + self.ads.len()
            + self.sitelinks.len()
    }

    /// Returns true if every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }
}

/// The uploaded sheets of one deployment, as stored in a plan file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    /// Structure sheet.
    #[serde(default)]
    pub structure: Vec<StructureRow>,
    /// Keywords sheet.
    #[serde(default)]
    pub keywords: Vec<KeywordSpec>,
    /// Ads sheet.
    #[serde(default)]
    pub ads: Vec<AdSpec>,
    /// Sitelink assets sheet.
    #[serde(default)]
    pub sitelink_assets: Vec<SitelinkAssetSpec>,
    /// Sitelink associations sheet.
    #[serde(default)]
    pub sitelink_associations: Vec<SitelinkLinkRow>,
}

impl DeploymentPlan {
    /// Loads a plan from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AdflowError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Builds the engine input: projects the structure sheet and joins the
    /// sitelink sheets.
    #[must_use]
    pub fn into_input(self) -> DeploymentInput {
        let sitelinks = join_sitelinks(&self.sitelink_assets, &self.sitelink_associations);
        DeploymentInput::from_structure(&self.structure)
            .with_keywords(self.keywords)
            .with_ads(self.ads)
            .with_sitelinks(sitelinks)
    }
}

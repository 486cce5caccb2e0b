//! Platform schema enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The resource types that have a mutate endpoint on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A shared daily budget.
    CampaignBudget,
    /// A search campaign.
    Campaign,
    /// An ad group inside a campaign.
    AdGroup,
    /// A keyword criterion inside an ad group.
    AdGroupCriterion,
    /// An ad inside an ad group.
    AdGroupAd,
    /// A reusable asset such as a sitelink.
    Asset,
    /// A link between a campaign and an asset.
    CampaignAsset,
}

impl ResourceKind {
    /// Returns the collection segment used in resource names.
    #[must_use]
    pub fn collection(&self) -> &'static str {
        match self {
            Self::CampaignBudget => "campaignBudgets",
            Self::Campaign => "campaigns",
            Self::AdGroup => "adGroups",
            Self::AdGroupCriterion => "adGroupCriteria",
            Self::AdGroupAd => "adGroupAds",
            Self::Asset => "assets",
            Self::CampaignAsset => "campaignAssets",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CampaignBudget => write!(f, "campaign budget"),
            Self::Campaign => write!(f, "campaign"),
            Self::AdGroup => write!(f, "ad group"),
            Self::AdGroupCriterion => write!(f, "keyword"),
            Self::AdGroupAd => write!(f, "ad"),
            Self::Asset => write!(f, "asset"),
            Self::CampaignAsset => write!(f, "campaign asset"),
        }
    }
}

/// Keyword match type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeywordMatchType {
    /// Left for the platform to decide.
    #[default]
    Unspecified,
    /// Broad match.
    Broad,
    /// Phrase match.
    Phrase,
    /// Exact match.
    Exact,
}

impl KeywordMatchType {
    /// Classifies a free-text match-type label.
    ///
    /// The label is lowercased and tested for the substrings `broad`,
    /// `phrase` and `exact`, in that order; the first hit wins. A label that
    /// contains none of them stays [`KeywordMatchType::Unspecified`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("broad") {
            Self::Broad
        } else if label.contains("phrase") {
            Self::Phrase
        } else if label.contains("exact") {
            Self::Exact
        } else {
            Self::Unspecified
        }
    }
}

impl fmt::Display for KeywordMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unspecified => write!(f, "unspecified"),
            Self::Broad => write!(f, "broad"),
            Self::Phrase => write!(f, "phrase"),
            Self::Exact => write!(f, "exact"),
        }
    }
}

/// Serving status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampaignStatus {
    /// Serving.
    Enabled,
    /// Created but not serving.
    Paused,
}

/// Advertising channel of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvertisingChannelType {
    /// Search network campaigns.
    Search,
}

/// How a budget is spent over the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetDeliveryMethod {
    /// Spread evenly over the day.
    Standard,
}

/// Ad group type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupType {
    /// Standard search ad group.
    SearchStandard,
}

/// Serving status of an ad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdGroupAdStatus {
    /// Serving.
    Enabled,
    /// Not serving.
    Paused,
}

/// Placement of an asset linked to a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetFieldType {
    /// Sitelink extension.
    Sitelink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_type_from_label() {
        assert_eq!(KeywordMatchType::from_label("Broad Match"), KeywordMatchType::Broad);
        assert_eq!(KeywordMatchType::from_label("[Exact] Match"), KeywordMatchType::Exact);
        assert_eq!(KeywordMatchType::from_label("Phrase"), KeywordMatchType::Phrase);
        assert_eq!(KeywordMatchType::from_label("Unknown"), KeywordMatchType::Unspecified);
    }

    #[test]
    fn test_match_type_is_case_insensitive() {
        assert_eq!(KeywordMatchType::from_label("EXACT"), KeywordMatchType::Exact);
        assert_eq!(KeywordMatchType::from_label("pHrAsE match"), KeywordMatchType::Phrase);
    }

    #[test]
    fn test_match_type_priority_order() {
        // broad wins over anything after it
        assert_eq!(
            KeywordMatchType::from_label("exact or broad"),
            KeywordMatchType::Broad
        );
        assert_eq!(
            KeywordMatchType::from_label("exact phrase"),
            KeywordMatchType::Phrase
        );
    }

    #[test]
    fn test_match_type_empty_label() {
        assert_eq!(KeywordMatchType::from_label(""), KeywordMatchType::Unspecified);
    }

    #[test]
    fn test_resource_kind_display_and_collection() {
        assert_eq!(ResourceKind::AdGroupCriterion.to_string(), "keyword");
        assert_eq!(ResourceKind::CampaignAsset.collection(), "campaignAssets");
    }

    #[test]
    fn test_match_type_serialize() {
        let json = serde_json::to_string(&KeywordMatchType::Exact).unwrap();
        assert_eq!(json, r#""EXACT""#);
    }
}

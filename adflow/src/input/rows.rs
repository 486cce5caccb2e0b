//! Typed rows of the structure and keyword tables.

use crate::context::AdGroupKey;
use serde::{Deserialize, Serialize};

/// One campaign with its daily budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSpec {
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub name: String,
    /// Daily budget in account currency units.
    #[serde(rename = "Campaign Daily Budget")]
    pub daily_budget: f64,
}

impl CampaignSpec {
    /// Creates a campaign row.
    #[must_use]
    pub fn new(name: impl Into<String>, daily_budget: f64) -> Self {
        Self {
            name: name.into(),
            daily_budget,
        }
    }
}

/// One ad group of a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdGroupSpec {
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub campaign: String,
    /// Ad group name.
    #[serde(rename = "Ad Group")]
    pub ad_group: String,
}

impl AdGroupSpec {
    /// Creates an ad group row.
    #[must_use]
    pub fn new(campaign: impl Into<String>, ad_group: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            ad_group: ad_group.into(),
        }
    }

    /// Returns the structured key of the ad group.
    #[must_use]
    pub fn key(&self) -> AdGroupKey {
        AdGroupKey::new(self.campaign.clone(), self.ad_group.clone())
    }
}

/// One keyword of an ad group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSpec {
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub campaign: String,
    /// Ad group name.
    #[serde(rename = "Ad Group")]
    pub ad_group: String,
    /// Keyword text, used verbatim.
    #[serde(rename = "Keyword")]
    pub keyword: String,
    /// Free-text match type label.
    #[serde(rename = "Match Type", default)]
    pub match_type: String,
}

impl KeywordSpec {
    /// Creates a keyword row.
    #[must_use]
    pub fn new(
        campaign: impl Into<String>,
        ad_group: impl Into<String>,
        keyword: impl Into<String>,
        match_type: impl Into<String>,
    ) -> Self {
        Self {
            campaign: campaign.into(),
            ad_group: ad_group.into(),
            keyword: keyword.into(),
            match_type: match_type.into(),
        }
    }

    /// Returns the key of the parent ad group.
    #[must_use]
    pub fn ad_group_key(&self) -> AdGroupKey {
        AdGroupKey::new(self.campaign.clone(), self.ad_group.clone())
    }
}

/// One row of the structure sheet.
///
/// The sheet repeats the campaign columns on every ad group row; it is
/// projected into [`CampaignSpec`] and [`AdGroupSpec`] tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRow {
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub campaign: String,
    /// Daily budget of the campaign.
    #[serde(rename = "Campaign Daily Budget")]
    pub daily_budget: f64,
    /// Ad group name; rows without one only declare the campaign.
    #[serde(rename = "Ad Group", default, skip_serializing_if = "Option::is_none")]
    pub ad_group: Option<String>,
}

impl StructureRow {
    /// Creates a structure row.
    #[must_use]
    pub fn new(campaign: impl Into<String>, daily_budget: f64, ad_group: Option<&str>) -> Self {
        Self {
            campaign: campaign.into(),
            daily_budget,
            ad_group: ad_group.map(str::to_string),
        }
    }

    /// The campaign columns of the row.
    #[must_use]
    pub fn campaign_spec(&self) -> CampaignSpec {
        CampaignSpec::new(self.campaign.clone(), self.daily_budget)
    }

    /// The ad group columns of the row, if it names an ad group.
    #[must_use]
    pub fn ad_group_spec(&self) -> Option<AdGroupSpec> {
        self.ad_group
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .map(|name| AdGroupSpec::new(self.campaign.clone(), name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_spec_uses_sheet_columns() {
        let row: CampaignSpec =
            serde_json::from_str(r#"{"Campaign": "CampA", "Campaign Daily Budget": 50.0}"#)
                .unwrap();
        assert_eq!(row, CampaignSpec::new("CampA", 50.0));
    }

    #[test]
    fn test_keyword_spec_missing_match_type() {
        let row: KeywordSpec = serde_json::from_str(
            r#"{"Campaign": "CampA", "Ad Group": "AG1", "Keyword": "shoes"}"#,
        )
        .unwrap();
        assert_eq!(row.match_type, "");
        assert_eq!(row.ad_group_key(), AdGroupKey::new("CampA", "AG1"));
    }

    #[test]
    fn test_structure_row_projection() {
        let row = StructureRow::new("CampA", 10.0, Some("AG1"));
        assert_eq!(row.campaign_spec(), CampaignSpec::new("CampA", 10.0));
        assert_eq!(row.ad_group_spec(), Some(AdGroupSpec::new("CampA", "AG1")));

        let bare = StructureRow::new("CampA", 10.0, Some("  "));
        assert!(bare.ad_group_spec().is_none());
    }
}

//! Sitelink asset and association rows, and the join producing the
//! sitelink table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One sitelink asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SitelinkAssetSpec {
    /// Stable asset identifier.
    #[serde(rename = "Asset ID")]
    pub asset_id: String,
    /// Display text of the link.
    #[serde(rename = "Link Text")]
    pub link_text: String,
    /// Landing page.
    #[serde(rename = "Final URL")]
    pub final_url: String,
}

impl SitelinkAssetSpec {
    /// Creates an asset row.
    #[must_use]
    pub fn new(
        asset_id: impl Into<String>,
        link_text: impl Into<String>,
        final_url: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            link_text: link_text.into(),
            final_url: final_url.into(),
        }
    }
}

/// One row of the associations sheet: an asset to attach to a campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitelinkLinkRow {
    /// Asset identifier.
    #[serde(rename = "Asset ID")]
    pub asset_id: String,
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub campaign: String,
}

impl SitelinkLinkRow {
    /// Creates an association row.
    #[must_use]
    pub fn new(asset_id: impl Into<String>, campaign: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            campaign: campaign.into(),
        }
    }
}

/// One row of the pre-joined sitelink table.
///
/// The asset columns are `None` when the association names an asset id the
/// assets sheet does not define; such rows are not valid assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SitelinkAssociationSpec {
    /// Asset identifier.
    #[serde(rename = "Asset ID")]
    pub asset_id: String,
    /// Campaign name.
    #[serde(rename = "Campaign")]
    pub campaign: String,
    /// Display text of the link.
    #[serde(rename = "Link Text", default)]
    pub link_text: Option<String>,
    /// Landing page.
    #[serde(rename = "Final URL", default)]
    pub final_url: Option<String>,
}

impl SitelinkAssociationSpec {
    /// Creates a joined row with asset fields.
    #[must_use]
    pub fn new(
        asset_id: impl Into<String>,
        campaign: impl Into<String>,
        link_text: impl Into<String>,
        final_url: impl Into<String>,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            campaign: campaign.into(),
            link_text: Some(link_text.into()),
            final_url: Some(final_url.into()),
        }
    }

    /// Creates a joined row whose asset id matched nothing.
    #[must_use]
    pub fn unmatched(asset_id: impl Into<String>, campaign: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            campaign: campaign.into(),
            link_text: None,
            final_url: None,
        }
    }

    /// The asset described by the row, if its asset fields are present.
    #[must_use]
    pub fn asset(&self) -> Option<SitelinkAssetSpec> {
        match (&self.link_text, &self.final_url) {
            (Some(link_text), Some(final_url)) => Some(SitelinkAssetSpec::new(
                self.asset_id.clone(),
                link_text.clone(),
                final_url.clone(),
            )),
            _ => None,
        }
    }
}

/// Left-joins association rows onto asset rows by asset id.
///
/// Output follows association order. An association whose id matches
/// several asset rows yields one row per match, in asset order; one whose
/// id matches none yields a row with null asset fields.
#[must_use]
pub fn join_sitelinks(
    assets: &[SitelinkAssetSpec],
    associations: &[SitelinkLinkRow],
) -> Vec<SitelinkAssociationSpec> {
    let mut by_id: HashMap<&str, Vec<&SitelinkAssetSpec>> = HashMap::new();
    for asset in assets {
        by_id.entry(asset.asset_id.as_str()).or_default().push(asset);
    }

    let mut joined = Vec::with_capacity(associations.len());
    for link in associations {
        match by_id.get(link.asset_id.as_str()) {
            Some(matches) => joined.extend(matches.iter().map(|asset| {
                SitelinkAssociationSpec::new(
                    link.asset_id.clone(),
                    link.campaign.clone(),
                    asset.link_text.clone(),
                    asset.final_url.clone(),
                )
            })),
            None => joined.push(SitelinkAssociationSpec::unmatched(
                link.asset_id.clone(),
                link.campaign.clone(),
            )),
        }
    }
    joined
}

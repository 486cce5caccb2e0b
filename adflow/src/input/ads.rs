//! Responsive search ad rows with sparse headline and description slots.

use crate::context::AdGroupKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of headline columns in the ads sheet.
pub const HEADLINE_SLOTS: usize = 15;
/// Number of description columns in the ads sheet.
pub const DESCRIPTION_SLOTS: usize = 4;

/// One responsive search ad.
///
/// Headline and description slots keep their sheet position; empty cells
/// are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawAdRow", into = "RawAdRow")]
pub struct AdSpec {
    /// Campaign name.
    pub campaign: String,
    /// Ad group name.
    pub ad_group: String,
    /// `Headline 1` to `Headline 15`.
    pub headlines: [Option<String>; HEADLINE_SLOTS],
    /// `Description 1` to `Description 4`.
    pub descriptions: [Option<String>; DESCRIPTION_SLOTS],
    /// Landing page, passed through unvalidated.
    pub final_url: String,
}

impl AdSpec {
    /// Creates an ad row with every slot empty.
    #[must_use]
    pub fn new(
        campaign: impl Into<String>,
        ad_group: impl Into<String>,
        final_url: impl Into<String>,
    ) -> Self {
        Self {
            campaign: campaign.into(),
            ad_group: ad_group.into(),
            headlines: Default::default(),
            descriptions: Default::default(),
            final_url: final_url.into(),
        }
    }

    /// Fills a headline slot (1-based). Out of range slots are ignored.
    #[must_use]
    pub fn with_headline(mut self, slot: usize, text: impl Into<String>) -> Self {
        if let Some(cell) = slot.checked_sub(1).and_then(|i| self.headlines.get_mut(i)) {
            *cell = Some(text.into());
        }
        self
    }

    /// Fills a description slot (1-based). Out of range slots are ignored.
    #[must_use]
    pub fn with_description(mut self, slot: usize, text: impl Into<String>) -> Self {
        if let Some(cell) = slot.checked_sub(1).and_then(|i| self.descriptions.get_mut(i)) {
            *cell = Some(text.into());
        }
        self
    }

    /// Populated headlines, in slot order.
    pub fn present_headlines(&self) -> impl Iterator<Item = &str> {
        self.headlines.iter().filter_map(Option::as_deref)
    }

    /// Populated descriptions, in slot order.
    pub fn present_descriptions(&self) -> impl Iterator<Item = &str> {
        self.descriptions.iter().filter_map(Option::as_deref)
    }

    /// Returns the key of the parent ad group.
    #[must_use]
    pub fn ad_group_key(&self) -> AdGroupKey {
        AdGroupKey::new(self.campaign.clone(), self.ad_group.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAdRow {
    #[serde(rename = "Campaign")]
    campaign: String,
    #[serde(rename = "Ad Group")]
    ad_group: String,
    #[serde(rename = "Final URL", default)]
    final_url: String,
    #[serde(flatten)]
    cells: BTreeMap<String, serde_json::Value>,
}

fn cell_text(value: Option<&serde_json::Value>) -> Option<String> {
    let text = match value? {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

impl From<RawAdRow> for AdSpec {
    fn from(raw: RawAdRow) -> Self {
        let mut spec = AdSpec::new(raw.campaign, raw.ad_group, raw.final_url);
        for (i, slot) in spec.headlines.iter_mut().enumerate() {
            *slot = cell_text(raw.cells.get(&format!("Headline {}", i + 1)));
        }
        for (i, slot) in spec.descriptions.iter_mut().enumerate() {
            *slot = cell_text(raw.cells.get(&format!("Description {}", i + 1)));
        }
        spec
    }
}

impl From<AdSpec> for RawAdRow {
    fn from(spec: AdSpec) -> Self {
        let mut cells = BTreeMap::new();
        for (i, text) in spec.headlines.into_iter().enumerate() {
            if let Some(text) = text {
                cells.insert(format!("Headline {}", i + 1), serde_json::Value::String(text));
            }
        }
        for (i, text) in spec.descriptions.into_iter().enumerate() {
            if let Some(text) = text {
                cells.insert(
                    format!("Description {}", i + 1),
                    serde_json::Value::String(text),
                );
            }
        }
        Self {
            campaign: spec.campaign,
            ad_group: spec.ad_group,
            final_url: spec.final_url,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_headlines_keep_slot_order() {
        let row: AdSpec = serde_json::from_value(serde_json::json!({
            "Campaign": "CampA",
            "Ad Group": "AG1",
            "Final URL": "https://example.com",
            "Headline 1": "Fast Shoes",
            "Headline 2": "Free Returns",
            "Headline 3": null,
            "Headline 4": "",
            "Headline 5": "Shop Now",
            "Description 2": "Best prices",
        }))
        .unwrap();

        assert_eq!(
            row.present_headlines().collect::<Vec<_>>(),
            vec!["Fast Shoes", "Free Returns", "Shop Now"]
        );
        assert_eq!(row.headlines[4].as_deref(), Some("Shop Now"));
        assert_eq!(row.present_descriptions().collect::<Vec<_>>(), vec!["Best prices"]);
        assert_eq!(row.final_url, "https://example.com");
    }

    #[test]
    fn test_numeric_cells_are_stringified() {
        let row: AdSpec = serde_json::from_value(serde_json::json!({
            "Campaign": "CampA",
            "Ad Group": "AG1",
            "Final URL": "https://example.com",
            "Headline 1": 2024,
        }))
        .unwrap();

        assert_eq!(row.headlines[0].as_deref(), Some("2024"));
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let row: AdSpec = serde_json::from_value(serde_json::json!({
            "Campaign": "CampA",
            "Ad Group": "AG1",
            "Final URL": "https://example.com",
            "Headline 16": "overflow",
            "Path 1": "shoes",
        }))
        .unwrap();

        assert_eq!(row.present_headlines().count(), 0);
    }

    #[test]
    fn test_serialize_writes_only_present_slots() {
        let row = AdSpec::new("CampA", "AG1", "https://example.com")
            .with_headline(2, "Second")
            .with_description(1, "First");

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Headline 2"], "Second");
        assert_eq!(json["Description 1"], "First");
        assert!(json.get("Headline 1").is_none());

        let back: AdSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, row);
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let row = AdSpec::new("CampA", "AG1", "u").with_headline(0, "x").with_headline(16, "y");
        assert_eq!(row.present_headlines().count(), 0);
    }
}

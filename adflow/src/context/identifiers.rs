//! Natural key to remote handle mappings for one deployment run.

use crate::errors::IdentifierConflictError;
use crate::resources::{AdGroupHandle, AssetHandle, CampaignHandle};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

/// The three independent mappings kept by an [`IdentifierMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Campaign name to campaign handle.
    Campaign,
    /// Campaign and ad group name to ad group handle.
    AdGroup,
    /// Asset id to asset handle.
    Asset,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campaign => write!(f, "campaign"),
            Self::AdGroup => write!(f, "ad group"),
            Self::Asset => write!(f, "asset"),
        }
    }
}

/// Structured key of an ad group: its campaign name plus its own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AdGroupKey {
    /// Campaign name.
    pub campaign: String,
    /// Ad group name.
    pub ad_group: String,
}

impl AdGroupKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(campaign: impl Into<String>, ad_group: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
            ad_group: ad_group.into(),
        }
    }
}

impl fmt::Display for AdGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.campaign, self.ad_group)
    }
}

/// Resolves natural keys to handles created earlier in the same run.
///
/// Every mapping is write-once: a second insert for the same key is rejected
/// and the first handle stays. Absence of a key means the item was never
/// created or its creation failed. Nothing here outlives the run, so
/// deploying the same input twice creates everything twice.
#[derive(Debug, Default, Clone)]
pub struct IdentifierMap {
    campaigns: HashMap<String, CampaignHandle>,
    ad_groups: HashMap<AdGroupKey, AdGroupHandle>,
    assets: HashMap<String, AssetHandle>,
}

impl IdentifierMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a campaign name to its handle.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierConflictError` if the name is already mapped.
    pub fn insert_campaign(
        &mut self,
        name: impl Into<String>,
        handle: CampaignHandle,
    ) -> Result<(), IdentifierConflictError> {
        insert_once(&mut self.campaigns, name.into(), handle, IdentifierKind::Campaign)
    }

    /// Maps an ad group key to its handle.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierConflictError` if the key is already mapped.
    pub fn insert_ad_group(
        &mut self,
        key: AdGroupKey,
        handle: AdGroupHandle,
    ) -> Result<(), IdentifierConflictError> {
        insert_once(&mut self.ad_groups, key, handle, IdentifierKind::AdGroup)
    }

    /// Maps an asset id to its handle.
    ///
    /// # Errors
    ///
    /// Returns `IdentifierConflictError` if the id is already mapped.
    pub fn insert_asset(
        &mut self,
        asset_id: impl Into<String>,
        handle: AssetHandle,
    ) -> Result<(), IdentifierConflictError> {
        insert_once(&mut self.assets, asset_id.into(), handle, IdentifierKind::Asset)
    }

    /// Looks up a campaign handle.
    #[must_use]
    pub fn campaign(&self, name: &str) -> Option<&CampaignHandle> {
        self.campaigns.get(name)
    }

    /// Looks up an ad group handle.
    #[must_use]
    pub fn ad_group(&self, key: &AdGroupKey) -> Option<&AdGroupHandle> {
        self.ad_groups.get(key)
    }

    /// Looks up an asset handle.
    #[must_use]
    pub fn asset(&self, asset_id: &str) -> Option<&AssetHandle> {
        self.assets.get(asset_id)
    }

    /// Returns the number of entries of one kind.
    #[must_use]
    pub fn len(&self, kind: IdentifierKind) -> usize {
        match kind {
            IdentifierKind::Campaign => self.campaigns.len(),
            IdentifierKind::AdGroup => self.ad_groups.len(),
            IdentifierKind::Asset => self.assets.len(),
        }
    }

    /// Returns true if no mapping of that kind exists.
    #[must_use]
    pub fn is_empty(&self, kind: IdentifierKind) -> bool {
        self.len(kind) == 0
    }

    /// Converts to a dictionary representation with sorted keys.
    #[must_use]
    pub fn to_dict(&self) -> serde_json::Value {
        let campaigns: serde_json::Map<String, serde_json::Value> = sorted(&self.campaigns)
            .into_iter()
            .map(|(k, v)| (k.clone(), serde_json::json!(v.resource_name())))
            .collect();

        let ad_groups: Vec<serde_json::Value> = sorted(&self.ad_groups)
            .into_iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "campaign": k.campaign,
                    "ad_group": k.ad_group,
                    "handle": v.resource_name(),
                })
            })
            .collect();

        let assets: serde_json::Map<String, serde_json::Value> = sorted(&self.assets)
            .into_iter()
            .map(|(k, v)| (k.clone(), serde_json::json!(v.resource_name())))
            .collect();

        serde_json::json!({
            "campaigns": campaigns,
            "ad_groups": ad_groups,
            "assets": assets,
        })
    }
}

impl Serialize for IdentifierMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

fn insert_once<K, V>(
    map: &mut HashMap<K, V>,
    key: K,
    value: V,
    kind: IdentifierKind,
) -> Result<(), IdentifierConflictError>
where
    K: std::hash::Hash + Eq + fmt::Display,
{
    match map.entry(key) {
        Entry::Occupied(entry) => Err(IdentifierConflictError::new(kind, entry.key().to_string())),
        Entry::Vacant(entry) => {
            entry.insert(value);
            Ok(())
        }
    }
}

fn sorted<K: Ord, V>(map: &HashMap<K, V>) -> Vec<(&K, &V)> {
    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_insert_and_get() {
        let mut map = IdentifierMap::new();
        map.insert_campaign("CampA", CampaignHandle::from_resource_name("c/1"))
            .unwrap();

        assert_eq!(map.campaign("CampA").unwrap().resource_name(), "c/1");
        assert!(map.campaign("CampB").is_none());
        assert_eq!(map.len(IdentifierKind::Campaign), 1);
        assert!(map.is_empty(IdentifierKind::AdGroup));
    }

    #[test]
    fn test_write_once_keeps_first_handle() {
        let mut map = IdentifierMap::new();
        map.insert_campaign("CampA", CampaignHandle::from_resource_name("c/1"))
            .unwrap();

        let err = map
            .insert_campaign("CampA", CampaignHandle::from_resource_name("c/2"))
            .unwrap_err();

        assert_eq!(err.kind, IdentifierKind::Campaign);
        assert_eq!(map.campaign("CampA").unwrap().resource_name(), "c/1");
    }

    #[test]
    fn test_structured_ad_group_key_has_no_delimiter_collisions() {
        let mut map = IdentifierMap::new();
        map.insert_ad_group(
            AdGroupKey::new("a|b", "c"),
            AdGroupHandle::from_resource_name("g/1"),
        )
        .unwrap();
        map.insert_ad_group(
            AdGroupKey::new("a", "b|c"),
            AdGroupHandle::from_resource_name("g/2"),
        )
        .unwrap();

        assert_eq!(map.len(IdentifierKind::AdGroup), 2);
        assert_eq!(
            map.ad_group(&AdGroupKey::new("a", "b|c")).unwrap().resource_name(),
            "g/2"
        );
    }

    #[test]
    fn test_asset_conflict() {
        let mut map = IdentifierMap::new();
        map.insert_asset("A1", AssetHandle::from_resource_name("a/1")).unwrap();
        assert!(map.insert_asset("A1", AssetHandle::from_resource_name("a/2")).is_err());
    }

    #[test]
    fn test_to_dict() {
        let mut map = IdentifierMap::new();
        map.insert_campaign("CampA", CampaignHandle::from_resource_name("c/1"))
            .unwrap();
        map.insert_ad_group(
            AdGroupKey::new("CampA", "AG1"),
            AdGroupHandle::from_resource_name("g/1"),
        )
        .unwrap();

        let dict = map.to_dict();
        assert_eq!(dict["campaigns"]["CampA"], "c/1");
        assert_eq!(dict["ad_groups"][0]["ad_group"], "AG1");
        assert!(dict["assets"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_ad_group_key_display() {
        assert_eq!(AdGroupKey::new("CampA", "AG1").to_string(), "CampA / AG1");
    }
}

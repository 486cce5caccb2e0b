//! Opaque handles to resources created on the platform.

use super::{Asset, AdGroup, Campaign, CampaignBudget};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A platform-assigned resource name, typed by the resource it refers to.
///
/// Handles only come back from mutate responses; the engine never builds one
/// from input data.
pub struct Handle<R> {
    resource_name: String,
    _resource: PhantomData<fn() -> R>,
}

/// Handle of a created campaign budget.
pub type BudgetHandle = Handle<CampaignBudget>;
/// Handle of a created campaign.
pub type CampaignHandle = Handle<Campaign>;
/// Handle of a created ad group.
pub type AdGroupHandle = Handle<AdGroup>;
/// Handle of a created asset.
pub type AssetHandle = Handle<Asset>;

impl<R> Handle<R> {
    /// Wraps a resource name returned by the platform.
    #[must_use]
    pub fn from_resource_name(resource_name: impl Into<String>) -> Self {
        Self {
            resource_name: resource_name.into(),
            _resource: PhantomData,
        }
    }

    /// Returns the resource name.
    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }
}

impl<R> Clone for Handle<R> {
    fn clone(&self) -> Self {
        Self::from_resource_name(self.resource_name.clone())
    }
}

impl<R> PartialEq for Handle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.resource_name == other.resource_name
    }
}

impl<R> Eq for Handle<R> {}

impl<R> Hash for Handle<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource_name.hash(state);
    }
}

impl<R> fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handle").field(&self.resource_name).finish()
    }
}

impl<R> fmt::Display for Handle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name)
    }
}

impl<R> Serialize for Handle<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.resource_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_equality_by_resource_name() {
        let a = CampaignHandle::from_resource_name("customers/1/campaigns/7");
        let b = CampaignHandle::from_resource_name("customers/1/campaigns/7");

        assert_eq!(a, b);
        assert_eq!(a.to_string(), "customers/1/campaigns/7");
    }

    #[test]
    fn test_handle_serializes_as_string() {
        let handle = AssetHandle::from_resource_name("customers/1/assets/2");
        let json = serde_json::to_string(&handle).unwrap();
        assert_eq!(json, r#""customers/1/assets/2""#);
    }
}

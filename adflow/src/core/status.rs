//! Stage name and status enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The five deployment stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    /// Budgets and campaigns.
    Campaigns,
    /// Ad groups.
    AdGroups,
    /// Keyword criteria.
    Keywords,
    /// Responsive search ads.
    Ads,
    /// Sitelink assets and their campaign links.
    Sitelinks,
}

impl StageName {
    /// All stages in execution order.
    pub const ORDER: [Self; 5] = [
        Self::Campaigns,
        Self::AdGroups,
        Self::Keywords,
        Self::Ads,
        Self::Sitelinks,
    ];

    /// Progress message shown when the stage starts.
    #[must_use]
    pub fn progress_message(&self) -> &'static str {
        match self {
            Self::Campaigns => "Building campaigns",
            Self::AdGroups => "Building ad groups",
            Self::Keywords => "Adding keywords",
            Self::Ads => "Writing ads",
            Self::Sitelinks => "Linking sitelinks",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Campaigns => write!(f, "campaigns"),
            Self::AdGroups => write!(f, "ad_groups"),
            Self::Keywords => write!(f, "keywords"),
            Self::Ads => write!(f, "ads"),
            Self::Sitelinks => write!(f, "sitelinks"),
        }
    }
}

/// How a stage finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Every attempted create succeeded.
    Ok,
    /// Prerequisites were missing, nothing was attempted.
    Skip,
    /// Some creates succeeded and some failed.
    Partial,
    /// Creates were attempted and none succeeded.
    Fail,
}

impl StageStatus {
    /// Derives a status from created and failed counts of an executed stage.
    #[must_use]
    pub fn from_counts(created: usize, failed: usize) -> Self {
        match (created, failed) {
            (_, 0) => Self::Ok,
            (0, _) => Self::Fail,
            _ => Self::Partial,
        }
    }

    /// Returns true if the status indicates success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok | Self::Skip)
    }

    /// Returns true if any failure was recorded.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Partial | Self::Fail)
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Skip => write!(f, "skip"),
            Self::Partial => write!(f, "partial"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        let mut sorted = StageName::ORDER;
        sorted.sort();
        assert_eq!(sorted, StageName::ORDER);
        assert_eq!(StageName::ORDER[0], StageName::Campaigns);
        assert_eq!(StageName::ORDER[4], StageName::Sitelinks);
    }

    #[test]
    fn test_stage_name_display() {
        assert_eq!(StageName::AdGroups.to_string(), "ad_groups");
        assert_eq!(StageName::Sitelinks.to_string(), "sitelinks");
    }

    #[test]
    fn test_status_from_counts() {
        assert_eq!(StageStatus::from_counts(3, 0), StageStatus::Ok);
        assert_eq!(StageStatus::from_counts(0, 0), StageStatus::Ok);
        assert_eq!(StageStatus::from_counts(2, 1), StageStatus::Partial);
        assert_eq!(StageStatus::from_counts(0, 4), StageStatus::Fail);
    }

    #[test]
    fn test_status_predicates() {
        assert!(StageStatus::Skip.is_success());
        assert!(StageStatus::Partial.is_failure());
        assert!(!StageStatus::Ok.is_failure());
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_string(&StageStatus::Partial).unwrap();
        assert_eq!(json, r#""partial""#);

        let deserialized: StageStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, StageStatus::Partial);
    }
}

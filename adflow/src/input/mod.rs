//! Strongly typed input tables.
//!
//! Parsing the uploaded sheets is done by the caller; rows arrive here as
//! typed records whose serde names match the sheet column headers.

mod ads;
mod plan;
mod rows;
mod sitelinks;

pub use ads::{AdSpec, DESCRIPTION_SLOTS, HEADLINE_SLOTS};
pub use plan::{DeploymentInput, DeploymentPlan};
pub use rows::{AdGroupSpec, CampaignSpec, KeywordSpec, StructureRow};
pub use sitelinks::{join_sitelinks, SitelinkAssetSpec, SitelinkAssociationSpec, SitelinkLinkRow};

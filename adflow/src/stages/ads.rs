//! Responsive search ads, submitted in bulk.

use super::{submit_aggregate, Stage, StageTally};
use crate::context::{DeploymentContext, IdentifierKind};
use crate::core::StageName;
use crate::input::{AdSpec, DeploymentInput};
use crate::resources::{
    Ad, AdGroupAd, AdGroupAdStatus, AdGroupHandle, AdTextAsset, Operation, ResponsiveSearchAd,
};
use async_trait::async_trait;
use tracing::debug;

/// Creates one enabled responsive search ad per row whose ad group exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdStage;

impl AdStage {
    fn build(ad_group: AdGroupHandle, row: &AdSpec) -> AdGroupAd {
        AdGroupAd {
            ad_group,
            status: AdGroupAdStatus::Enabled,
            ad: Ad {
                final_urls: vec![row.final_url.clone()],
                responsive_search_ad: ResponsiveSearchAd {
                    headlines: row.present_headlines().map(AdTextAsset::new).collect(),
                    descriptions: row.present_descriptions().map(AdTextAsset::new).collect(),
                },
            },
        }
    }
}

#[async_trait]
impl Stage for AdStage {
    fn name(&self) -> StageName {
        StageName::Ads
    }

    fn is_ready(&self, ctx: &DeploymentContext<'_>) -> bool {
        !ctx.identifiers.is_empty(IdentifierKind::AdGroup)
    }

    async fn execute(
        &self,
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
    ) -> StageTally {
        let mut dropped = 0;
        let mut operations = Vec::with_capacity(input.ads.len());

        for row in &input.ads {
            let key = row.ad_group_key();
            match ctx.identifiers.ad_group(&key) {
                Some(ad_group) => {
                    operations.push(Operation::create(Self::build(ad_group.clone(), row)));
                }
                None => {
                    dropped += 1;
                    ctx.unresolved(
                        StageName::Ads,
                        format!("Ad Skipped ({key}): ad group not created"),
                    );
                }
            }
        }

        debug!(operations = operations.len(), dropped, "Ad operations built");

        let mut tally = submit_aggregate(
            ctx,
            StageName::Ads,
            &operations,
            |count| format!("Created {count} RSAs."),
            "Ad Creation Error",
        )
        .await;
        tally.dropped = dropped;
        tally
    }
}

//! Sitelink assets and their campaign links.
//!
//! Assets are created one by one; only failures are logged for them. Links
//! between campaigns and created assets are then submitted in bulk.

use super::{first_seen, submit_aggregate, Stage, StageTally};
use crate::context::{DeploymentContext, IdentifierKind};
use crate::core::{ItemOutcome, StageName};
use crate::errors::PerItemCreateError;
use crate::input::{DeploymentInput, SitelinkAssetSpec};
use crate::resources::{
    Asset, AssetFieldType, CampaignAsset, Operation, ResourceKind, SitelinkAsset,
};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Creates sitelink assets and links them to campaigns.
#[derive(Debug, Clone, Copy, Default)]
pub struct SitelinkStage;

impl SitelinkStage {
    async fn create_assets(
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
        tally: &mut StageTally,
    ) -> HashSet<String> {
        let mut specs = Vec::with_capacity(input.sitelinks.len());
        for row in &input.sitelinks {
            match row.asset() {
                Some(spec) => specs.push(spec),
                None => {
                    tally.dropped += 1;
                    ctx.unresolved(
                        StageName::Sitelinks,
                        format!(
                            "Sitelink Skipped ({} -> {}): asset id not in assets sheet",
                            row.asset_id, row.campaign
                        ),
                    );
                }
            }
        }

        let distinct = first_seen(specs, Clone::clone);
        let mutator = ctx.mutator();

        let mut outcomes = Vec::with_capacity(distinct.len());
        for spec in distinct {
            let SitelinkAssetSpec {
                asset_id,
                link_text,
                final_url,
            } = spec;
            let result = mutator
                .create_one(&Operation::create(Asset {
                    sitelink_asset: SitelinkAsset { link_text },
                    final_urls: vec![final_url],
                }))
                .await
                .map_err(|e| PerItemCreateError::remote(ResourceKind::Asset, asset_id.clone(), e));
            outcomes.push(ItemOutcome::from_result(asset_id, result));
        }

        let mut failed = HashSet::new();
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Created { key, handle } => {
                    debug!(asset_id = %key, handle = %handle, "Sitelink asset created");
                    if let Err(conflict) = ctx.identifiers.insert_asset(key, handle) {
                        warn!(error = %conflict, "Keeping the first asset handle");
                    }
                    tally.created += 1;
                }
                ItemOutcome::Failed { key, error } => {
                    warn!(asset_id = %key, error = %error, "Sitelink asset creation failed");
                    ctx.log
                        .failure(StageName::Sitelinks, format!("Asset Error {key}: {error}"));
                    failed.insert(key);
                    tally.failed += 1;
                }
            }
        }
        failed
    }

    async fn link_assets(
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
        failed_assets: &HashSet<String>,
        tally: &mut StageTally,
    ) {
        let mut operations = Vec::with_capacity(input.sitelinks.len());
        for row in input.sitelinks.iter().filter(|row| row.asset().is_some()) {
            let campaign = ctx.identifiers.campaign(&row.campaign).cloned();
            let asset = ctx.identifiers.asset(&row.asset_id).cloned();

            match (campaign, asset) {
                (Some(campaign), Some(asset)) => operations.push(Operation::create(CampaignAsset {
                    campaign,
                    asset,
                    field_type: AssetFieldType::Sitelink,
                })),
                (campaign, _) => {
                    tally.dropped += 1;
                    // a failed asset already has its own error line
                    if campaign.is_some() && failed_assets.contains(&row.asset_id) {
                        continue;
                    }
                    ctx.unresolved(
                        StageName::Sitelinks,
                        format!(
                            "Sitelink Skipped ({} -> {}): campaign or asset not created",
                            row.asset_id, row.campaign
                        ),
                    );
                }
            }
        }

        info!(links = operations.len(), "Linking sitelinks");

        tally.absorb(
            submit_aggregate(
                ctx,
                StageName::Sitelinks,
                &operations,
                |count| format!("Linked {count} Sitelinks."),
                "Sitelink Linking Error",
            )
            .await,
        );
    }
}

#[async_trait]
impl Stage for SitelinkStage {
    fn name(&self) -> StageName {
        StageName::Sitelinks
    }

    fn is_ready(&self, ctx: &DeploymentContext<'_>) -> bool {
        !ctx.identifiers.is_empty(IdentifierKind::Campaign)
    }

    async fn execute(
        &self,
        ctx: &mut DeploymentContext<'_>,
        input: &DeploymentInput,
    ) -> StageTally {
        let mut tally = StageTally::default();
        let failed_assets = Self::create_assets(ctx, input, &mut tally).await;
        Self::link_assets(ctx, input, &failed_assets, &mut tally).await;
        tally
    }
}

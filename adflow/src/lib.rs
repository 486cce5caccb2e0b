//! # Adflow
//!
//! A deployment engine that provisions a search-advertising campaign
//! hierarchy on a remote ads platform from flat tabular input.
//!
//! Adflow turns denormalized rows into a correctly linked remote object graph:
//!
//! - **Stage-ordered execution**: budgets and campaigns, then ad groups,
//!   keywords, responsive search ads and finally sitelink assets
//! - **Reference resolution**: natural keys repeated across input tables are
//!   resolved into platform-assigned handles through a run-scoped
//!   [`IdentifierMap`](context::IdentifierMap)
//! - **Batched submission**: bulk resources are submitted in bounded chunks
//! - **Partial fault tolerance**: failures are captured per item or per batch
//!   and reported in an ordered [`ResultLog`](context::ResultLog)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adflow::prelude::*;
//!
//! let engine = DeploymentEngine::new(DeployConfig::default());
//! let report = engine.deploy(&connector, &settings, &input).await?;
//!
//! for line in report.log.lines() {
//!     println!("{line}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod client;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod input;
pub mod pipeline;
pub mod resources;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::{AdsClient, Connector, CustomerId, InMemoryAdsClient, MutateResponse};
    pub use crate::config::{ClientSettings, DeployConfig};
    pub use crate::context::{AdGroupKey, IdentifierMap, LogEntry, LogOutcome, ResultLog};
    pub use crate::core::{ItemOutcome, StageName, StageStatus};
    pub use crate::errors::{
        AdflowError, BatchSubmitError, ConfigError, ConnectionError, PerItemCreateError,
        RemoteError,
    };
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::input::{
        AdGroupSpec, AdSpec, CampaignSpec, DeploymentInput, DeploymentPlan, KeywordSpec,
        SitelinkAssetSpec, SitelinkAssociationSpec, StructureRow,
    };
    pub use crate::pipeline::{BatchMutator, DeploymentEngine, DeploymentReport};
    pub use crate::resources::{Handle, KeywordMatchType, Operation, Resource, ResourceKind};
    pub use crate::stages::{Stage, StageReport};
}

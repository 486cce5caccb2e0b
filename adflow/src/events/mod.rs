//! Progress event emission.
//!
//! The engine reports stage progress and batch submissions through an
//! [`EventSink`] handed to it explicitly; there is no process-wide sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Event emitted when a deployment starts.
pub const DEPLOY_STARTED: &str = "deploy.started";
/// Event emitted when a deployment finishes.
pub const DEPLOY_COMPLETED: &str = "deploy.completed";
/// Event emitted when a stage starts.
pub const STAGE_STARTED: &str = "stage.started";
/// Event emitted when a stage is skipped for missing prerequisites.
pub const STAGE_SKIPPED: &str = "stage.skipped";
/// Event emitted when a stage finishes.
pub const STAGE_COMPLETED: &str = "stage.completed";
/// Event emitted after each chunk of a bulk submission.
pub const BATCH_SUBMITTED: &str = "batch.submitted";

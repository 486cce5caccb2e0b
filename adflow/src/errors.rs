//! Error types for adflow.
//!
//! The taxonomy follows the failure boundaries of a deployment run:
//! connection setup is fatal, single creates fail per item, bulk submissions
//! fail per batch. Unresolved references are not errors at all.

use crate::context::IdentifierKind;
use crate::resources::ResourceKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// The umbrella error type for adflow operations outside a deployment run.
#[derive(Debug, Error)]
pub enum AdflowError {
    /// Client or credential setup failed.
    #[error("{0}")]
    Connection(#[from] ConnectionError),

    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A write-once identifier mapping was written twice.
    #[error("{0}")]
    IdentifierConflict(#[from] IdentifierConflictError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AdflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Raised when the client handle cannot be established.
///
/// This is the only error that escapes a deployment; it aborts the run
/// before any stage executes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// A required credential was empty or absent.
    #[error("Missing credentials: {field}")]
    MissingCredentials {
        /// The missing setting.
        field: String,
    },

    /// The target customer id is not a usable account number.
    #[error("Invalid customer id '{value}': {reason}")]
    InvalidCustomerId {
        /// The raw value supplied.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The connector failed to build a client.
    #[error("Client setup failed: {reason}")]
    Setup {
        /// The underlying failure.
        reason: String,
    },
}

impl ConnectionError {
    /// Creates a missing credentials error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingCredentials {
            field: field.into(),
        }
    }

    /// Creates a client setup error.
    #[must_use]
    pub fn setup(reason: impl Into<String>) -> Self {
        Self::Setup {
            reason: reason.into(),
        }
    }

    /// The single top-level failure line reported for an aborted run.
    #[must_use]
    pub fn log_line(&self) -> String {
        format!("Critical Connection Error: {self}")
    }
}

/// A fault returned by the remote platform for a mutate call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct RemoteError {
    /// Human-readable fault description.
    pub message: String,
    /// Indexes of the failing operations within the submitted batch.
    #[serde(default)]
    pub failed_operations: Vec<usize>,
    /// Platform request id, when the transport reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RemoteError {
    /// Creates a new remote error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            failed_operations: Vec::new(),
            request_id: None,
        }
    }

    /// Marks an operation index as failing.
    #[must_use]
    pub fn with_failed_operation(mut self, index: usize) -> Self {
        self.failed_operations.push(index);
        self
    }

    /// Sets the request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// The platform accepted a create but returned no resource name.
    #[must_use]
    pub fn empty_response(resource: ResourceKind) -> Self {
        Self::new(format!("{resource} mutate returned no results"))
    }
}

/// A single create call (budget, campaign, ad group or asset) failed.
#[derive(Debug, Clone, Error)]
pub enum PerItemCreateError {
    /// The platform rejected the create.
    #[error("{source}")]
    Remote {
        /// The resource type being created.
        resource: ResourceKind,
        /// The natural key of the item.
        item: String,
        /// The platform fault.
        #[source]
        source: RemoteError,
    },

    /// The row could not be turned into an operation.
    #[error("invalid {resource} input: {reason}")]
    InvalidInput {
        /// The resource type being created.
        resource: ResourceKind,
        /// The natural key of the item.
        item: String,
        /// Why the row was rejected.
        reason: String,
    },
}

impl PerItemCreateError {
    /// Creates a remote failure for an item.
    #[must_use]
    pub fn remote(resource: ResourceKind, item: impl Into<String>, source: RemoteError) -> Self {
        Self::Remote {
            resource,
            item: item.into(),
            source,
        }
    }

    /// Creates an invalid input failure for an item.
    #[must_use]
    pub fn invalid_input(
        resource: ResourceKind,
        item: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            resource,
            item: item.into(),
            reason: reason.into(),
        }
    }

    /// Returns the natural key of the failing item.
    #[must_use]
    pub fn item(&self) -> &str {
        match self {
            Self::Remote { item, .. } | Self::InvalidInput { item, .. } => item,
        }
    }

    /// Returns the resource type of the failing item.
    #[must_use]
    pub fn resource(&self) -> ResourceKind {
        match self {
            Self::Remote { resource, .. } | Self::InvalidInput { resource, .. } => *resource,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("resource".to_string(), serde_json::json!(self.resource()));
        map.insert("item".to_string(), serde_json::json!(self.item()));
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        if let Self::Remote { source, .. } = self {
            map.insert("remote".to_string(), serde_json::json!(source));
        }
        map
    }
}

/// A chunked submission was rejected part way through.
///
/// Chunks before `chunk_index` remain committed on the platform; chunks after
/// it were never attempted.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct BatchSubmitError {
    /// The resource type being submitted.
    pub resource: ResourceKind,
    /// Zero-based index of the rejected chunk.
    pub chunk_index: usize,
    /// Total number of chunks in the submission.
    pub chunk_count: usize,
    /// Operations committed by earlier chunks.
    pub committed_operations: usize,
    /// The platform fault.
    #[source]
    pub source: RemoteError,
    message: String,
}

impl BatchSubmitError {
    /// Creates a new batch submit error.
    #[must_use]
    pub fn new(
        resource: ResourceKind,
        chunk_index: usize,
        chunk_count: usize,
        committed_operations: usize,
        source: RemoteError,
    ) -> Self {
        let message = if chunk_count > 1 {
            format!(
                "{} (chunk {} of {}, {} operations already committed)",
                source.message,
                chunk_index + 1,
                chunk_count,
                committed_operations
            )
        } else {
            source.message.clone()
        };

        Self {
            resource,
            chunk_index,
            chunk_count,
            committed_operations,
            source,
            message,
        }
    }

    /// Returns the number of chunks that were never attempted.
    #[must_use]
    pub fn abandoned_chunks(&self) -> usize {
        self.chunk_count.saturating_sub(self.chunk_index + 1)
    }
}

/// Raised when a write-once identifier mapping is written a second time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Identifier conflict: {kind} '{key}' is already mapped")]
pub struct IdentifierConflictError {
    /// Which mapping was written.
    pub kind: IdentifierKind,
    /// The conflicting natural key.
    pub key: String,
}

impl IdentifierConflictError {
    /// Creates a new identifier conflict error.
    #[must_use]
    pub fn new(kind: IdentifierKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A configuration value is out of range.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// The offending field.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

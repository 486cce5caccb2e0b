//! Per-item create outcomes.

use crate::errors::PerItemCreateError;

/// The result of creating one item, keyed by its natural key.
///
/// Single-create stages collect these into a list first and fold them into
/// the identifier map and result log afterwards, so the continue-on-error
/// policy is plain data rather than control flow.
#[derive(Debug, Clone)]
pub enum ItemOutcome<K, H> {
    /// The item was created.
    Created {
        /// Natural key of the item.
        key: K,
        /// Handle returned by the platform.
        handle: H,
    },
    /// The item could not be created.
    Failed {
        /// Natural key of the item.
        key: K,
        /// Why creation failed.
        error: PerItemCreateError,
    },
}

impl<K, H> ItemOutcome<K, H> {
    /// Builds an outcome from a create result.
    pub fn from_result(key: K, result: Result<H, PerItemCreateError>) -> Self {
        match result {
            Ok(handle) => Self::Created { key, handle },
            Err(error) => Self::Failed { key, error },
        }
    }

    /// Returns the natural key.
    #[must_use]
    pub fn key(&self) -> &K {
        match self {
            Self::Created { key, .. } | Self::Failed { key, .. } => key,
        }
    }

    /// Returns true if the item was created.
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }

    /// Returns the handle, if created.
    #[must_use]
    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Created { handle, .. } => Some(handle),
            Self::Failed { .. } => None,
        }
    }
}

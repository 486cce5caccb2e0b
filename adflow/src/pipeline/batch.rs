//! Chunked submission of create operations.

use super::MAX_OPERATIONS_PER_CALL;
use crate::client::{AdsClient, CustomerId};
use crate::errors::{BatchSubmitError, RemoteError};
use crate::events::{EventSink, BATCH_SUBMITTED};
use crate::resources::{Handle, Operation, Resource, ResourceKind};
use serde::Serialize;
use tracing::{debug, warn};

/// What a fully successful submission created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReceipt {
    /// The endpoint that was called.
    pub resource: ResourceKind,
    /// Number of chunks submitted.
    pub chunks: usize,
    /// Number of operations submitted.
    pub operations: usize,
    /// Created resource names, in operation order.
    pub resource_names: Vec<String>,
}

impl BatchReceipt {
    fn empty(resource: ResourceKind) -> Self {
        Self {
            resource,
            chunks: 0,
            operations: 0,
            resource_names: Vec::new(),
        }
    }
}

/// Submits create operations to the platform.
///
/// Bulk submissions are split into contiguous chunks of at most
/// `chunk_size` operations and sent one after another, in input order. The
/// first rejected chunk ends the submission: earlier chunks stay committed
/// and later chunks are never sent.
pub struct BatchMutator<'a> {
    client: &'a dyn AdsClient,
    customer_id: &'a CustomerId,
    chunk_size: usize,
    events: Option<&'a dyn EventSink>,
}

impl std::fmt::Debug for BatchMutator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchMutator")
            .field("customer_id", &self.customer_id)
            .field("chunk_size", &self.chunk_size)
            .finish_non_exhaustive()
    }
}

impl<'a> BatchMutator<'a> {
    /// Creates a mutator. The chunk size is clamped to `1..=500`.
    #[must_use]
    pub fn new(client: &'a dyn AdsClient, customer_id: &'a CustomerId, chunk_size: usize) -> Self {
        Self {
            client,
            customer_id,
            chunk_size: chunk_size.clamp(1, MAX_OPERATIONS_PER_CALL),
            events: None,
        }
    }

    /// Reports every submitted chunk to an event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: &'a dyn EventSink) -> Self {
        self.events = Some(events);
        self
    }

    /// Returns the effective chunk size.
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Submits operations in chunks.
    ///
    /// An empty operation list makes no remote call.
    ///
    /// # Errors
    ///
    /// Returns `BatchSubmitError` for the first rejected chunk, carrying how
    /// many operations earlier chunks already committed.
    pub async fn submit<R: Resource>(
        &self,
        operations: &[Operation<R>],
    ) -> Result<BatchReceipt, BatchSubmitError> {
        if operations.is_empty() {
            return Ok(BatchReceipt::empty(R::KIND));
        }

        let chunk_count = operations.len().div_ceil(self.chunk_size);
        let mut receipt = BatchReceipt::empty(R::KIND);

        for (chunk_index, chunk) in operations.chunks(self.chunk_size).enumerate() {
            debug!(
                resource = %R::KIND,
                chunk = chunk_index + 1,
                chunk_count,
                operations = chunk.len(),
                "Submitting chunk"
            );

            match R::mutate(self.client, self.customer_id, chunk).await {
                Ok(response) => {
                    receipt.chunks += 1;
                    receipt.operations += chunk.len();
                    receipt.resource_names.extend(response.results);
                    self.emit_chunk(R::KIND, chunk_index, chunk_count, chunk.len(), true);
                }
                Err(source) => {
                    warn!(
                        resource = %R::KIND,
                        chunk = chunk_index + 1,
                        chunk_count,
                        committed = receipt.operations,
                        error = %source,
                        "Chunk rejected, abandoning remaining chunks"
                    );
                    self.emit_chunk(R::KIND, chunk_index, chunk_count, chunk.len(), false);
                    return Err(BatchSubmitError::new(
                        R::KIND,
                        chunk_index,
                        chunk_count,
                        receipt.operations,
                        source,
                    ));
                }
            }
        }

        Ok(receipt)
    }

    /// Creates a single resource and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns the platform fault, or an empty-response fault if the platform
    /// accepted the call without naming the created resource.
    pub async fn create_one<R: Resource>(
        &self,
        operation: &Operation<R>,
    ) -> Result<Handle<R>, RemoteError> {
        let response =
            R::mutate(self.client, self.customer_id, std::slice::from_ref(operation)).await?;

        response
            .results
            .into_iter()
            .next()
            .map(Handle::from_resource_name)
            .ok_or_else(|| RemoteError::empty_response(R::KIND))
    }

    fn emit_chunk(
        &self,
        resource: ResourceKind,
        chunk_index: usize,
        chunk_count: usize,
        operations: usize,
        accepted: bool,
    ) {
        if let Some(events) = self.events {
            events.try_emit(
                BATCH_SUBMITTED,
                Some(serde_json::json!({
                    "resource": resource,
                    "chunk": chunk_index + 1,
                    "chunk_count": chunk_count,
                    "operations": operations,
                    "accepted": accepted,
                })),
            );
        }
    }
}

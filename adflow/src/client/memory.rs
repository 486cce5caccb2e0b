//! In-memory ads client used for dry runs and tests.

use super::{AdsClient, Connector, CustomerId, MutateResponse};
use crate::config::ClientSettings;
use crate::errors::{ConnectionError, RemoteError};
use crate::resources::{
    AdGroupAdOperation, AdGroupCriterionOperation, AdGroupOperation, AssetOperation,
    CampaignAssetOperation, CampaignBudgetOperation, CampaignOperation, Operation, Resource,
    ResourceKind,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One mutate call observed by the in-memory client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// The endpoint that was called.
    pub resource: ResourceKind,
    /// Labels of the submitted operations, in order.
    pub labels: Vec<String>,
    /// Serialized resources, in order.
    pub payloads: Vec<serde_json::Value>,
    /// Whether the call succeeded.
    pub accepted: bool,
}

impl Submission {
    /// Returns the number of operations in the call.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the call carried no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Makes matching mutate calls fail.
#[derive(Debug, Clone)]
pub struct FailureRule {
    resource: ResourceKind,
    label_contains: Option<String>,
    call_index: Option<usize>,
    message: String,
}

impl FailureRule {
    /// Fails every call to the given endpoint.
    #[must_use]
    pub fn on(resource: ResourceKind) -> Self {
        Self {
            resource,
            label_contains: None,
            call_index: None,
            message: format!("{resource} request rejected"),
        }
    }

    /// Only fails calls containing an operation whose label contains `needle`.
    #[must_use]
    pub fn with_label(mut self, needle: impl Into<String>) -> Self {
        self.label_contains = Some(needle.into());
        self
    }

    /// Only fails the nth call (zero-based) to the endpoint.
    #[must_use]
    pub fn on_call(mut self, call_index: usize) -> Self {
        self.call_index = Some(call_index);
        self
    }

    /// Sets the fault message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    fn check(&self, resource: ResourceKind, call_index: usize, labels: &[String]) -> Option<RemoteError> {
        if self.resource != resource {
            return None;
        }
        if self.call_index.is_some_and(|expected| expected != call_index) {
            return None;
        }

        let failing = match &self.label_contains {
            Some(needle) => labels.iter().position(|label| label.contains(needle.as_str()))?,
            None => 0,
        };

        Some(RemoteError::new(self.message.clone()).with_failed_operation(failing))
    }
}

#[derive(Debug, Default)]
struct ClientState {
    next_id: HashMap<ResourceKind, u64>,
    calls: HashMap<ResourceKind, usize>,
    submissions: Vec<Submission>,
    rules: Vec<FailureRule>,
}

/// An [`AdsClient`] that keeps everything in memory.
///
/// Created resources get synthetic names of the form
/// `customers/<id>/<collection>/<n>`. Every call is recorded, and
/// [`FailureRule`]s can make selected calls fail.
#[derive(Debug, Default)]
pub struct InMemoryAdsClient {
    state: Mutex<ClientState>,
}

impl InMemoryAdsClient {
    /// Creates a new client that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a failure rule.
    #[must_use]
    pub fn with_rule(self, rule: FailureRule) -> Self {
        self.fail_when(rule);
        self
    }

    /// Adds a failure rule to a shared client.
    pub fn fail_when(&self, rule: FailureRule) {
        self.state.lock().rules.push(rule);
    }

    /// Returns every recorded call, in order.
    #[must_use]
    pub fn submissions(&self) -> Vec<Submission> {
        self.state.lock().submissions.clone()
    }

    /// Returns the recorded calls to one endpoint, in order.
    #[must_use]
    pub fn submissions_for(&self, resource: ResourceKind) -> Vec<Submission> {
        self.state
            .lock()
            .submissions
            .iter()
            .filter(|s| s.resource == resource)
            .cloned()
            .collect()
    }

    /// Returns the number of calls made to one endpoint.
    #[must_use]
    pub fn call_count(&self, resource: ResourceKind) -> usize {
        self.state.lock().calls.get(&resource).copied().unwrap_or(0)
    }

    /// Returns the number of resources of one type created so far.
    #[must_use]
    pub fn created_count(&self, resource: ResourceKind) -> usize {
        self.state
            .lock()
            .submissions
            .iter()
            .filter(|s| s.resource == resource && s.accepted)
            .map(Submission::len)
            .sum()
    }

    fn apply<R: Resource>(
        &self,
        customer_id: &CustomerId,
        operations: &[Operation<R>],
    ) -> Result<MutateResponse, RemoteError> {
        let labels: Vec<String> = operations.iter().map(|op| op.create.label()).collect();
        let payloads: Vec<serde_json::Value> = operations
            .iter()
            .map(|op| serde_json::to_value(&op.create).unwrap_or(serde_json::Value::Null))
            .collect();

        let mut state = self.state.lock();
        let call_index = {
            let calls = state.calls.entry(R::KIND).or_insert(0);
            let index = *calls;
            *calls += 1;
            index
        };

        let failure = state
            .rules
            .iter()
            .find_map(|rule| rule.check(R::KIND, call_index, &labels));

        if let Some(err) = failure {
            debug!(
                resource = %R::KIND,
                call_index,
                error = %err,
                "In-memory mutate rejected"
            );
            state.submissions.push(Submission {
                resource: R::KIND,
                labels,
                payloads,
                accepted: false,
            });
            return Err(err);
        }

        let counter = state.next_id.entry(R::KIND).or_insert(0);
        let results: Vec<String> = (0..labels.len())
            .map(|_| {
                *counter += 1;
                format!("customers/{customer_id}/{}/{counter}", R::KIND.collection())
            })
            .collect();

        debug!(
            resource = %R::KIND,
            call_index,
            operations = labels.len(),
            "In-memory mutate accepted"
        );
        state.submissions.push(Submission {
            resource: R::KIND,
            labels,
            payloads,
            accepted: true,
        });

        Ok(MutateResponse::new(results))
    }
}

#[async_trait]
impl AdsClient for InMemoryAdsClient {
    async fn mutate_campaign_budgets(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignBudgetOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_campaigns(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_ad_groups(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_ad_group_criteria(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupCriterionOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_ad_group_ads(
        &self,
        customer_id: &CustomerId,
        operations: &[AdGroupAdOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_assets(
        &self,
        customer_id: &CustomerId,
        operations: &[AssetOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }

    async fn mutate_campaign_assets(
        &self,
        customer_id: &CustomerId,
        operations: &[CampaignAssetOperation],
    ) -> Result<MutateResponse, RemoteError> {
        self.apply(customer_id, operations)
    }
}

/// A [`Connector`] that hands out a shared [`InMemoryAdsClient`].
#[derive(Debug, Clone)]
pub struct InMemoryConnector {
    client: Arc<InMemoryAdsClient>,
    refusal: Option<String>,
}

impl InMemoryConnector {
    /// Creates a connector around a client.
    #[must_use]
    pub fn new(client: Arc<InMemoryAdsClient>) -> Self {
        Self {
            client,
            refusal: None,
        }
    }

    /// Creates a connector whose every connect attempt fails.
    #[must_use]
    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            client: Arc::new(InMemoryAdsClient::new()),
            refusal: Some(reason.into()),
        }
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> Arc<InMemoryAdsClient> {
        Arc::clone(&self.client)
    }
}

#[async_trait]
impl Connector for InMemoryConnector {
    async fn connect(
        &self,
        settings: &ClientSettings,
    ) -> Result<Arc<dyn AdsClient>, ConnectionError> {
        if let Some(reason) = &self.refusal {
            return Err(ConnectionError::setup(reason.clone()));
        }

        debug!(
            login_customer_id = ?settings.login_customer_id,
            "In-memory client connected"
        );
        let client: Arc<dyn AdsClient> = self.client.clone();
        Ok(client)
    }
}

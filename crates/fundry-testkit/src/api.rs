//! Scripted API service.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use fundry_core::effects::api::{ApiError, ApiService};
use fundry_core::models::{
    Category, CategoryId, DiscoveryEnvelope, DiscoveryParams, ProjectParam, ProjectUpdate,
    UpdateId, User,
};

/// One recorded call, for asserting what the view-model asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    FetchCategory(CategoryId),
    FetchDiscovery(DiscoveryParams),
    FetchUpdate(ProjectParam, UpdateId),
    UpdateUser(User),
}

/// An [`ApiService`] whose responses are scripted per endpoint.
///
/// Unscripted endpoints fail with a network error, which view-models
/// demote to silence, so a test that scripts nothing observes nothing,
/// rather than panicking.
///
/// Discovery responses are a queue: each call pops the next scripted
/// result, and the last one is repeated once the queue would empty. This
/// lets the recommendation tests hand three different pages to three
/// consecutive fetches.
#[derive(Default)]
pub struct MockApiService {
    category_response: Mutex<Option<Result<Category, ApiError>>>,
    discovery_responses: Mutex<VecDeque<Result<DiscoveryEnvelope, ApiError>>>,
    update_response: Mutex<Option<Result<ProjectUpdate, ApiError>>>,
    update_user_response: Mutex<Option<Result<User, ApiError>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl MockApiService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, response: Result<Category, ApiError>) -> Self {
        *self.category_response.lock() = Some(response);
        self
    }

    /// Script one discovery response, repeated for every call.
    pub fn with_discovery(self, response: Result<DiscoveryEnvelope, ApiError>) -> Self {
        self.discovery_responses.lock().push_back(response);
        self
    }

    /// Script a sequence of discovery responses, served in order.
    pub fn with_discovery_queue(
        self,
        responses: Vec<Result<DiscoveryEnvelope, ApiError>>,
    ) -> Self {
        self.discovery_responses.lock().extend(responses);
        self
    }

    pub fn with_update(self, response: Result<ProjectUpdate, ApiError>) -> Self {
        *self.update_response.lock() = Some(response);
        self
    }

    pub fn with_update_user(self, response: Result<User, ApiError>) -> Self {
        *self.update_user_response.lock() = Some(response);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().push(call);
    }

    fn unscripted(endpoint: &str) -> ApiError {
        ApiError::Network(format!("no scripted response for {endpoint}"))
    }
}

#[async_trait]
impl ApiService for MockApiService {
    async fn fetch_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.record(ApiCall::FetchCategory(id));
        self.category_response
            .lock()
            .clone()
            .unwrap_or_else(|| Err(Self::unscripted("fetch_category")))
    }

    async fn fetch_discovery(
        &self,
        params: DiscoveryParams,
    ) -> Result<DiscoveryEnvelope, ApiError> {
        self.record(ApiCall::FetchDiscovery(params));
        let mut responses = self.discovery_responses.lock();
        match responses.len() {
            0 => Err(Self::unscripted("fetch_discovery")),
            1 => responses
                .front()
                .cloned()
                .unwrap_or_else(|| Err(Self::unscripted("fetch_discovery"))),
            _ => responses
                .pop_front()
                .unwrap_or_else(|| Err(Self::unscripted("fetch_discovery"))),
        }
    }

    async fn fetch_update(
        &self,
        project: ProjectParam,
        update: UpdateId,
    ) -> Result<ProjectUpdate, ApiError> {
        self.record(ApiCall::FetchUpdate(project, update));
        self.update_response
            .lock()
            .clone()
            .unwrap_or_else(|| Err(Self::unscripted("fetch_update")))
    }

    async fn update_user(&self, user: User) -> Result<User, ApiError> {
        self.record(ApiCall::UpdateUser(user.clone()));
        self.update_user_response
            .lock()
            .clone()
            .unwrap_or_else(|| Ok(user))
    }
}

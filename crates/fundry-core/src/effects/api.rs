//! Backend API effect.
//!
//! The service boundary is a black box to view-models: every call is
//! single-shot (no retry or backoff at this layer) and returns either a
//! payload or an opaque failure. View-models never let an [`ApiError`]
//! into the signal graph; they demote it to "no value" with
//! [`ResultDemote::demoted`] at the boundary.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::models::{
    Category, CategoryId, DiscoveryEnvelope, DiscoveryParams, ProjectParam, ProjectUpdate,
    UpdateId, User,
};

/// Opaque service failure.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Could not reach the backend at all.
    #[error("network unreachable: {0}")]
    Network(String),
    /// The request was sent but timed out.
    #[error("request timed out after {0}ms")]
    Timeout(u64),
    /// The backend answered with a non-success status.
    #[error("server returned status {status}")]
    Server { status: u16 },
    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// A request ready to hand to a web view, with whatever headers the
/// service layer attaches to its own origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
}

/// Typed request interface to the backend.
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Fetch a category node (with its parent, when it has one).
    async fn fetch_category(&self, id: CategoryId) -> Result<Category, ApiError>;

    /// Fetch a page of discovery results for a parameter set.
    async fn fetch_discovery(&self, params: DiscoveryParams)
        -> Result<DiscoveryEnvelope, ApiError>;

    /// Fetch a single project update.
    async fn fetch_update(
        &self,
        project: ProjectParam,
        update: UpdateId,
    ) -> Result<ProjectUpdate, ApiError>;

    /// Persist changes to the current user, returning the stored copy.
    async fn update_user(&self, user: User) -> Result<User, ApiError>;

    /// Decorate a URL for loading in an embedded web view.
    fn prepared_request(&self, url: Url) -> WebRequest {
        WebRequest {
            url,
            headers: Vec::new(),
        }
    }
}

/// Demotion of service failures to absence.
pub trait ResultDemote<T> {
    /// Convert `Err` into `None`, logging the failure at debug level.
    /// `context` names the operation for the log line.
    fn demoted(self, context: &str) -> Option<T>;
}

impl<T> ResultDemote<T> for Result<T, ApiError> {
    fn demoted(self, context: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(target: "fundry::api", %error, "{context} failed; demoting to no value");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demoted_maps_ok_to_some_and_err_to_none() {
        let ok: Result<u32, ApiError> = Ok(7);
        assert_eq!(ok.demoted("fetch"), Some(7));

        let err: Result<u32, ApiError> = Err(ApiError::Server { status: 500 });
        assert_eq!(err.demoted("fetch"), None);
    }
}

//! In-memory API service.
//!
//! Serves requests from a process-local catalog, applying the same
//! filtering the backend's discovery endpoint applies. Useful for demos,
//! simulators, and as the reference for what each request means; the
//! HTTP-backed service implements the same trait elsewhere.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use url::Url;

use fundry_core::effects::api::{ApiError, ApiService, WebRequest};
use fundry_core::models::{
    Category, CategoryId, DiscoveryEnvelope, DiscoveryParams, Project, ProjectId, ProjectParam,
    ProjectUpdate, UpdateId, User, UserId,
};

/// Backing data for [`InMemoryApiService`].
#[derive(Debug, Default)]
pub struct Catalog {
    pub categories: HashMap<CategoryId, Category>,
    pub projects: Vec<Project>,
    /// Project ids the catalog's current user has backed; used for the
    /// `backed=false` discovery filter.
    pub backed_project_ids: Vec<ProjectId>,
    pub updates: HashMap<UpdateId, ProjectUpdate>,
    pub users: HashMap<UserId, User>,
}

/// Catalog-backed [`ApiService`].
pub struct InMemoryApiService {
    catalog: RwLock<Catalog>,
    /// Artificial latency, for exercising in-flight supersession in
    /// simulators. Zero by default.
    delay_ms: u64,
    /// Bearer token attached to prepared web requests, when present.
    oauth_token: Option<String>,
}

impl InMemoryApiService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            delay_ms: 0,
            oauth_token: None,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_oauth_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }

    async fn simulate_latency(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn matches(&self, project: &Project, params: &DiscoveryParams, backed: &[ProjectId]) -> bool {
        if let Some(category) = &params.category {
            if project.category.id != category.id && project.category.parent_id != Some(category.id)
            {
                return false;
            }
        }
        if params.backed == Some(false) && backed.contains(&project.id) {
            return false;
        }
        if let Some(similar_to) = params.similar_to {
            if project.id == similar_to {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ApiService for InMemoryApiService {
    async fn fetch_category(&self, id: CategoryId) -> Result<Category, ApiError> {
        self.simulate_latency().await;
        self.catalog
            .read()
            .categories
            .get(&id)
            .cloned()
            .ok_or(ApiError::Server { status: 404 })
    }

    async fn fetch_discovery(
        &self,
        params: DiscoveryParams,
    ) -> Result<DiscoveryEnvelope, ApiError> {
        self.simulate_latency().await;
        let catalog = self.catalog.read();
        let per_page = params.per_page.unwrap_or(15) as usize;
        let projects = catalog
            .projects
            .iter()
            .filter(|project| self.matches(project, &params, &catalog.backed_project_ids))
            .take(per_page)
            .cloned()
            .collect();
        tracing::debug!(target: "fundry::api", ?params, "served discovery page from catalog");
        Ok(DiscoveryEnvelope { projects })
    }

    async fn fetch_update(
        &self,
        _project: ProjectParam,
        update: UpdateId,
    ) -> Result<ProjectUpdate, ApiError> {
        self.simulate_latency().await;
        self.catalog
            .read()
            .updates
            .get(&update)
            .cloned()
            .ok_or(ApiError::Server { status: 404 })
    }

    async fn update_user(&self, user: User) -> Result<User, ApiError> {
        self.simulate_latency().await;
        let mut catalog = self.catalog.write();
        catalog.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn prepared_request(&self, url: Url) -> WebRequest {
        let mut headers = vec![("Accept".to_string(), "text/html".to_string())];
        if let Some(token) = &self.oauth_token {
            headers.push(("Authorization".to_string(), format!("token {token}")));
        }
        WebRequest { url, headers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundry_core::models::{ProjectCategory, ProjectId, ProjectState, ProjectUrls};

    fn project(id: u64, category: CategoryId) -> Project {
        Project {
            id: ProjectId(id),
            name: format!("Project {id}"),
            category: ProjectCategory {
                id: category,
                name: "Category".to_string(),
                parent_id: None,
            },
            state: ProjectState::Live,
            currency: "USD".to_string(),
            creator_id: UserId(1),
            urls: ProjectUrls::default(),
            is_in_post_campaign_phase: false,
        }
    }

    #[test]
    fn discovery_applies_category_backed_and_per_page_filters() {
        let catalog = Catalog {
            projects: vec![
                project(1, CategoryId(1)),
                project(2, CategoryId(1)),
                project(3, CategoryId(2)),
                project(4, CategoryId(1)),
            ],
            backed_project_ids: vec![ProjectId(2)],
            ..Catalog::default()
        };
        let service = InMemoryApiService::new(catalog);

        let params = DiscoveryParams {
            category: Some(Category {
                id: CategoryId(1),
                name: "One".to_string(),
                parent: None,
            }),
            backed: Some(false),
            per_page: Some(1),
            ..DiscoveryParams::defaults()
        };

        let envelope = futures::executor::block_on(service.fetch_discovery(params))
            .unwrap_or_default();
        let ids: Vec<_> = envelope.projects.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProjectId(1)]);
    }

    #[test]
    fn prepared_request_attaches_the_oauth_token() {
        let service = InMemoryApiService::new(Catalog::default()).with_oauth_token("secret");
        let url = Url::parse("https://fundry.example/projects/1/posts")
            .unwrap_or_else(|_| unreachable!("static URL parses"));

        let request = service.prepared_request(url);
        assert!(request
            .headers
            .iter()
            .any(|(name, value)| name == "Authorization" && value == "token secret"));
    }
}

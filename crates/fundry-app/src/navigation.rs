//! Web route matching for embedded web views.
//!
//! The updates screen hosts the web updates index and intercepts
//! navigations that should be handled natively. Unparseable URLs and
//! unmatched paths return `None` and are filtered out of composition.

use url::Url;

use fundry_core::models::{ProjectParam, UpdateId};

/// A navigation reported by the embedded web view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAction {
    pub url: Url,
    pub navigation_type: NavigationType,
    /// `None` when the web view did not report a target frame.
    pub target_frame_is_main: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
    /// The user activated a link.
    LinkActivated,
    /// Form submission.
    FormSubmitted,
    /// Anything the web view started itself (redirects, reloads,
    /// initial loads).
    Other,
}

/// What the web view should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationPolicy {
    Allow,
    #[default]
    Cancel,
}

/// Natively-handled routes inside the project web surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/projects/{creator}/{slug}/posts`
    UpdatesIndex { project: ProjectParam },
    /// `/projects/{creator}/{slug}/posts/{id}`
    Update {
        project: ProjectParam,
        update: UpdateId,
    },
    /// `/projects/{creator}/{slug}/posts/{id}/comments`
    UpdateComments {
        project: ProjectParam,
        update: UpdateId,
    },
}

/// Match a URL against the natively-handled routes.
pub fn match_route(url: &Url) -> Option<Route> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["projects", _creator, slug, "posts"] => Some(Route::UpdatesIndex {
            project: ProjectParam::Slug((*slug).to_string()),
        }),
        ["projects", _creator, slug, "posts", id] => Some(Route::Update {
            project: ProjectParam::Slug((*slug).to_string()),
            update: UpdateId(id.parse().ok()?),
        }),
        ["projects", _creator, slug, "posts", id, "comments"] => Some(Route::UpdateComments {
            project: ProjectParam::Slug((*slug).to_string()),
            update: UpdateId(id.parse().ok()?),
        }),
        _ => None,
    }
}

/// Is this a `mailto:` link? Returns the address when it is.
pub fn email_address(url: &Url) -> Option<String> {
    (url.scheme() == "mailto").then(|| url.path().to_string())
}

/// Is this a `tel:` link?
pub fn is_phone_link(url: &Url) -> bool {
    url.scheme() == "tel"
}

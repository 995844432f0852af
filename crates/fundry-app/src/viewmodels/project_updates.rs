//! Project updates screen: a web view over the updates index with
//! native interception of update, comment, mail, and phone links.

use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;
use serde_json::json;
use url::Url;

use fundry_core::effects::api::{ResultDemote, WebRequest};
use fundry_core::models::{Project, ProjectParam, ProjectUpdate, UpdateId};
use fundry_core::signal::{combine_latest, Signal, Slot};

use crate::environment::AppEnvironment;
use crate::navigation::{match_route, NavigationAction, NavigationPolicy, NavigationType, Route};
use crate::viewmodels::ViewModel;

pub struct ProjectUpdatesInputs {
    configure_project: Slot<Project>,
    view_did_load: Slot<()>,
    can_send_email: Slot<bool>,
    can_make_phone_call: Slot<bool>,
    navigation_action: Slot<NavigationAction>,
    web_view_did_start: Slot<()>,
    web_view_did_finish: Slot<()>,
    decided_policy: Arc<RwLock<NavigationPolicy>>,
}

impl ProjectUpdatesInputs {
    /// Call with the project whose updates are shown.
    pub fn configure(&self, project: Project) {
        self.configure_project.record(project);
    }

    /// Call when the screen's view has loaded.
    pub fn view_did_load(&self) {
        self.view_did_load.record(());
    }

    /// Call with whether the device can compose email.
    pub fn can_send_email(&self, can_send: bool) {
        self.can_send_email.record(can_send);
    }

    /// Call with whether the device can place phone calls.
    pub fn can_make_phone_call(&self, can_call: bool) {
        self.can_make_phone_call.record(can_call);
    }

    /// Call from the web view's policy delegate; returns the policy to
    /// hand back. Recording the action drives the routing outputs
    /// synchronously, so the returned policy already reflects it.
    pub fn decide_policy(&self, action: NavigationAction) -> NavigationPolicy {
        self.navigation_action.record(action);
        *self.decided_policy.read()
    }

    /// Call when the web view starts a provisional navigation.
    pub fn web_view_did_start_navigation(&self) {
        self.web_view_did_start.record(());
    }

    /// Call when the web view finishes a navigation.
    pub fn web_view_did_finish_navigation(&self) {
        self.web_view_did_finish.record(());
    }
}

pub struct ProjectUpdatesOutputs {
    /// Open a URL in the external browser.
    pub go_to_external: Signal<Url>,
    /// Push a native update screen.
    pub go_to_update: Signal<(Project, ProjectUpdate)>,
    /// Push the comments for an update.
    pub go_to_update_comments: Signal<ProjectUpdate>,
    /// Spinner visibility while the web view loads.
    pub is_activity_indicator_hidden: Signal<bool>,
    /// Dial a phone link.
    pub make_phone_call: Signal<Url>,
    /// Compose an email to this address.
    pub show_mail_compose: Signal<String>,
    /// The device cannot send email; show this message.
    pub show_no_email_error: Signal<String>,
    /// Load this request into the web view.
    pub load_web_request: Signal<WebRequest>,
}

pub struct ProjectUpdatesViewModel {
    pub inputs: ProjectUpdatesInputs,
    pub outputs: ProjectUpdatesOutputs,
}

impl ProjectUpdatesViewModel {
    pub fn new(env: &Arc<AppEnvironment>) -> Self {
        let inputs = ProjectUpdatesInputs {
            configure_project: Slot::new(),
            view_did_load: Slot::new(),
            can_send_email: Slot::new(),
            can_make_phone_call: Slot::new(),
            navigation_action: Slot::new(),
            web_view_did_start: Slot::new(),
            web_view_did_finish: Slot::new(),
            decided_policy: Arc::new(RwLock::new(NavigationPolicy::Cancel)),
        };

        let navigation = inputs.navigation_action.signal();

        // Policy: let the web view handle its own loads and subframe
        // navigations; everything else is cancelled and routed natively.
        {
            let decided = Arc::clone(&inputs.decided_policy);
            navigation.observe(move |action| {
                let policy = if action.navigation_type == NavigationType::Other
                    || action.target_frame_is_main == Some(false)
                {
                    NavigationPolicy::Allow
                } else {
                    NavigationPolicy::Cancel
                };
                *decided.write() = policy;
            });
        }

        let project = combine_latest(
            &inputs.configure_project.signal(),
            &inputs.view_did_load.signal(),
        )
        .map(|pair| pair.0.clone());

        let initial_index_request = project.filter_map(|project| {
            project
                .urls
                .web
                .updates
                .as_ref()
                .and_then(|raw| Url::parse(raw).ok())
        });

        let link_activated =
            navigation.filter(|action| action.navigation_type == NavigationType::LinkActivated);

        let another_index_request = link_activated
            .filter(|action| matches!(match_route(&action.url), Some(Route::UpdatesIndex { .. })))
            .map(|action| action.url.clone());

        let load_web_request = {
            let env = Arc::clone(env);
            Signal::merge(&[initial_index_request, another_index_request])
                .map(move |url| env.api().prepared_request(url.clone()))
        };

        let update_route = navigation.filter_map(|action| match match_route(&action.url) {
            Some(Route::Update { project, update }) => Some((project, update)),
            _ => None,
        });

        let comments_route = navigation.filter_map(|action| match match_route(&action.url) {
            Some(Route::UpdateComments { project, update }) => Some((project, update)),
            _ => None,
        });

        let fetched_update = {
            let fetch_env = Arc::clone(env);
            let tasks = Arc::clone(env.tasks());
            update_route
                .switch_map(&tasks, move |route| fetch_update(&fetch_env, route))
                .observe_on_ui(env.tasks())
        };

        let go_to_update = project.sample_pair_on(&fetched_update);

        let go_to_update_comments = {
            let fetch_env = Arc::clone(env);
            let tasks = Arc::clone(env.tasks());
            comments_route
                .switch_map(&tasks, move |route| fetch_update(&fetch_env, route))
                .observe_on_ui(env.tasks())
        };

        let go_to_external = link_activated
            .filter(|action| {
                match_route(&action.url).is_none()
                    && crate::navigation::email_address(&action.url).is_none()
                    && !crate::navigation::is_phone_link(&action.url)
            })
            .map(|action| action.url.clone());

        let email_link = link_activated.filter_map(|action| {
            if match_route(&action.url).is_some() {
                return None;
            }
            crate::navigation::email_address(&action.url)
        });

        let phone_link = link_activated
            .filter(|action| {
                match_route(&action.url).is_none() && crate::navigation::is_phone_link(&action.url)
            })
            .map(|action| action.url.clone());

        let make_phone_call = inputs
            .can_make_phone_call
            .signal()
            .sample_pair_on(&phone_link)
            .filter(|pair| pair.0)
            .map(|pair| pair.1.clone());

        let email_capability = inputs.can_send_email.signal();

        let show_mail_compose = email_capability
            .sample_pair_on(&email_link)
            .filter(|pair| pair.0)
            .map(|pair| pair.1.clone());

        let show_no_email_error = email_capability
            .sample_pair_on(&email_link)
            .filter(|pair| !pair.0)
            .map(|_| "This device is not configured to send email.".to_string());

        let is_activity_indicator_hidden = Signal::merge(&[
            inputs.web_view_did_finish.signal().map(|_| true),
            inputs.web_view_did_start.signal().map(|_| false),
        ]);

        {
            let env = Arc::clone(env);
            project.observe(move |project| {
                env.track(
                    "Project Viewed",
                    json!({
                        "context_page": "updates",
                        "project_id": project.id.0,
                    }),
                );
            });
        }

        let outputs = ProjectUpdatesOutputs {
            go_to_external,
            go_to_update,
            go_to_update_comments,
            is_activity_indicator_hidden,
            make_phone_call,
            show_mail_compose,
            show_no_email_error,
            load_web_request,
        };

        Self { inputs, outputs }
    }
}

impl ViewModel for ProjectUpdatesViewModel {
    type Inputs = ProjectUpdatesInputs;
    type Outputs = ProjectUpdatesOutputs;

    fn inputs(&self) -> &ProjectUpdatesInputs {
        &self.inputs
    }

    fn outputs(&self) -> &ProjectUpdatesOutputs {
        &self.outputs
    }
}

fn fetch_update(
    env: &Arc<AppEnvironment>,
    route: &(ProjectParam, UpdateId),
) -> BoxFuture<'static, Option<ProjectUpdate>> {
    let api = Arc::clone(env.api());
    let (project, update) = route.clone();
    Box::pin(async move { api.fetch_update(project, update).await.demoted("fetch_update") })
}

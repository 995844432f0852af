//! Post-pledge "thanks" screen.
//!
//! Confirms the backing, offers related projects to keep exploring, and
//! owns the one-shot prompts (games newsletter, app rating) that may
//! follow a first pledge.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde_json::json;

use fundry_core::effects::api::ResultDemote;
use fundry_core::models::{Category, CategoryId, DiscoveryParams, Project, RefTag, Reward, User};
use fundry_core::signal::{combine_latest, zip, Signal, Slot};

use crate::config::features;
use crate::environment::AppEnvironment;
use crate::format;
use crate::notifications::{Notification, NotificationName};
use crate::viewmodels::ViewModel;

use fundry_core::effects::prefs::keys;

/// Everything the checkout flow hands the thanks screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ThanksPageData {
    pub project: Project,
    pub reward: Reward,
    pub checkout_data: Option<CheckoutData>,
    pub pledge_total: f64,
}

/// Checkout attribution data carried through for analytics.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutData {
    pub checkout_id: String,
    pub revenue_usd: f64,
    pub shipping_usd: Option<f64>,
    pub bonus_usd: Option<f64>,
}

pub struct ThanksInputs {
    configure_data: Slot<ThanksPageData>,
    view_did_load: Slot<()>,
    close_tapped: Slot<()>,
    category_cell_tapped: Slot<Category>,
    project_tapped: Slot<Project>,
    games_newsletter_signup_tapped: Slot<()>,
    user_updated: Slot<()>,
}

impl ThanksInputs {
    /// Call with the page data before presenting.
    pub fn configure(&self, data: ThanksPageData) {
        self.configure_data.record(data);
    }

    /// Call when the screen's view has loaded.
    pub fn view_did_load(&self) {
        self.view_did_load.record(());
    }

    /// Call when the close button is tapped.
    pub fn close_tapped(&self) {
        self.close_tapped.record(());
    }

    /// Call when a category cell is tapped.
    pub fn category_cell_tapped(&self, category: Category) {
        self.category_cell_tapped.record(category);
    }

    /// Call when a recommended project is tapped.
    pub fn project_tapped(&self, project: Project) {
        self.project_tapped.record(project);
    }

    /// Call when the signup button on the games newsletter alert is
    /// tapped.
    pub fn games_newsletter_signup_tapped(&self) {
        self.games_newsletter_signup_tapped.record(());
    }

    /// Call after the current user has been replaced in the environment.
    pub fn user_updated(&self) {
        self.user_updated.record(());
    }
}

pub struct ThanksOutputs {
    /// Confirmation line under the checkmark; fires once the view loads.
    pub backed_project_text: Signal<String>,
    /// Dismiss the whole checkout stack and post this notification.
    pub dismiss_and_post_notification: Signal<Notification>,
    /// Push discovery filtered to the tapped category.
    pub go_to_discovery: Signal<DiscoveryParams>,
    /// Push a recommended project: `(project, context list, ref tag)`.
    pub go_to_project: Signal<(Project, Vec<Project>, RefTag)>,
    /// Ask for push-notification permission for pledge updates.
    pub post_contextual_notification: Signal<()>,
    /// Re-broadcast that the current user changed.
    pub post_user_updated_notification: Signal<Notification>,
    /// Show the games newsletter opt-in prompt. Side effect: marks the
    /// prompt as seen in the preference store.
    pub show_games_newsletter_alert: Signal<()>,
    /// Country-specific double-opt-in confirmation, with the newsletter
    /// title.
    pub show_games_newsletter_opt_in_alert: Signal<String>,
    /// Show the app-rating prompt. Side effect: marks the prompt as seen.
    pub show_rating_alert: Signal<()>,
    /// Related projects to render, with the root category they came from.
    pub show_recommendations: Signal<(Vec<Project>, Category)>,
    /// A fresh user to store via
    /// [`AppEnvironment::replace_current_user`]; the binder follows up
    /// with [`ThanksInputs::user_updated`].
    pub update_user_in_environment: Signal<User>,
}

/// View-model for the thanks screen.
pub struct ThanksViewModel {
    pub inputs: ThanksInputs,
    pub outputs: ThanksOutputs,
}

impl ThanksViewModel {
    pub fn new(env: &Arc<AppEnvironment>) -> Self {
        let inputs = ThanksInputs {
            configure_data: Slot::new(),
            view_did_load: Slot::new(),
            close_tapped: Slot::new(),
            category_cell_tapped: Slot::new(),
            project_tapped: Slot::new(),
            games_newsletter_signup_tapped: Slot::new(),
            user_updated: Slot::new(),
        };

        let configure = inputs.configure_data.signal();
        let view_did_load = inputs.view_did_load.signal();
        let project = configure.map(|data| data.project.clone());

        let backed_project_text = {
            let env = Arc::clone(env);
            configure
                .map(move |data| {
                    let post_campaign = env.feature(features::POST_CAMPAIGN_PLEDGE)
                        && data.project.is_in_post_campaign_phase;
                    if post_campaign {
                        let total = format::currency(
                            data.pledge_total,
                            &data.project.currency,
                            env.config().omit_us_currency_code,
                        );
                        format!("You have successfully pledged {total}.")
                    } else {
                        format!(
                            "You have successfully backed {}. This project is now one step \
                             closer to a reality, thanks to you. Spread the word!",
                            data.project.name
                        )
                    }
                })
                .sample_on(&view_did_load)
        };

        let should_show_games_alert = {
            let env = Arc::clone(env);
            project.map(move |project| {
                project.category.root_id() == CategoryId::GAMES
                    && !env
                        .current_user()
                        .map(|user| user.newsletters.games)
                        .unwrap_or(false)
                    && !env.prefs().bool_flag(keys::HAS_SEEN_GAMES_NEWSLETTER_PROMPT)
            })
        };

        let show_games_newsletter_alert = {
            let env = Arc::clone(env);
            should_show_games_alert
                .filter(|show| *show)
                .sample_on(&view_did_load)
                .map(|_| ())
                .on_value(move |_| {
                    env.prefs()
                        .set_bool_flag(keys::HAS_SEEN_GAMES_NEWSLETTER_PROMPT, true)
                })
        };

        let show_games_newsletter_opt_in_alert = {
            let env = Arc::clone(env);
            let title_env = Arc::clone(&env);
            inputs
                .games_newsletter_signup_tapped
                .signal()
                .filter(move |_| env.country_code() == "DE")
                .map(move |_| title_env.config().games_newsletter_title.clone())
        };

        let show_rating_alert = {
            let env = Arc::clone(env);
            let mark_env = Arc::clone(&env);
            should_show_games_alert
                .filter(move |show| {
                    !*show
                        && !env.prefs().bool_flag(keys::HAS_SEEN_APP_RATING)
                        && env.config().rating_link.is_some()
                        && !should_show_pledge_prompt(&env)
                })
                .sample_on(&view_did_load)
                .map(|_| ())
                .on_value(move |_| mark_env.prefs().set_bool_flag(keys::HAS_SEEN_APP_RATING, true))
        };

        let dismiss_and_post_notification = inputs
            .close_tapped
            .signal()
            .map(|_| Notification::named(NotificationName::PROJECT_BACKED));

        let go_to_discovery = inputs.category_cell_tapped.signal().map(|category| {
            DiscoveryParams {
                category: Some(category.clone()),
                ..DiscoveryParams::defaults()
            }
        });

        let root_category = {
            let env = Arc::clone(env);
            let tasks = Arc::clone(env.tasks());
            project.switch_map(
                &tasks,
                move |project: &Project| -> BoxFuture<'static, Option<Category>> {
                    let api = Arc::clone(env.api());
                    let id = project.category.root_id();
                    Box::pin(async move {
                        api.fetch_category(id)
                            .await
                            .demoted("fetch_category")
                            .map(Category::into_root)
                    })
                },
            )
        };

        let recommended_projects = {
            let env = Arc::clone(env);
            let tasks = Arc::clone(env.tasks());
            combine_latest(&project, &root_category)
                .switch_map(&tasks, move |pair: &(Project, Category)| {
                    let (project, category) = pair.clone();
                    related_projects(Arc::clone(&env), project, category)
                })
                .filter(|projects: &Vec<Project>| !projects.is_empty())
        };

        let show_recommendations =
            zip(&recommended_projects, &root_category).observe_on_ui(env.tasks());

        let go_to_project = show_recommendations
            .map(|pair| pair.0.clone())
            .sample_pair_on(&inputs.project_tapped.signal())
            .map(|pair| {
                let (projects, tapped) = pair;
                (tapped.clone(), projects.clone(), RefTag::Thanks)
            });

        let update_user_in_environment = {
            let user_env = Arc::clone(env);
            let fetch_env = Arc::clone(env);
            let tasks = Arc::clone(env.tasks());
            inputs
                .games_newsletter_signup_tapped
                .signal()
                .filter_map(move |_| user_env.current_user())
                .switch_map(
                    &tasks,
                    move |user: &User| -> BoxFuture<'static, Option<User>> {
                        let api = Arc::clone(fetch_env.api());
                        let mut user = user.clone();
                        user.newsletters.games = true;
                        Box::pin(async move { api.update_user(user).await.demoted("update_user") })
                    },
                )
                .observe_on_ui(env.tasks())
        };

        let post_contextual_notification = {
            let env = Arc::clone(env);
            view_did_load.filter(move |_| should_show_pledge_prompt(&env))
        };

        let post_user_updated_notification = inputs
            .user_updated
            .signal()
            .map(|_| Notification::named(NotificationName::USER_UPDATED));

        // One page-viewed event per completed configure+load pairing:
        // re-firing view_did_load alone cannot produce another pair.
        {
            let env = Arc::clone(env);
            zip(&configure, &view_did_load).observe(move |pair| {
                let (data, _) = pair;
                env.track(
                    "Page Viewed",
                    json!({
                        "context_page": "thanks",
                        "context_type": "new_pledge",
                        "project_id": data.project.id.0,
                        "pledge_total": data.pledge_total,
                        "reward_id": data.reward.id,
                        "checkout_id": data.checkout_data.as_ref().map(|c| c.checkout_id.clone()),
                    }),
                );
            });
        }

        {
            let env = Arc::clone(env);
            let reward_and_checkout =
                configure.map(|data| (data.reward.clone(), data.checkout_data.clone()));
            combine_latest(&inputs.project_tapped.signal(), &reward_and_checkout).observe(
                move |pair| {
                    let (tapped, (reward, checkout)) = pair;
                    env.track(
                        "Project Card Clicked",
                        json!({
                            "context_page": "thanks",
                            "context_type": "recommended",
                            "context_location": "curated",
                            "project_id": tapped.id.0,
                            "reward_id": reward.id,
                            "checkout_id": checkout.as_ref().map(|c| c.checkout_id.clone()),
                        }),
                    );
                },
            );
        }

        let outputs = ThanksOutputs {
            backed_project_text,
            dismiss_and_post_notification,
            go_to_discovery,
            go_to_project,
            post_contextual_notification,
            post_user_updated_notification,
            show_games_newsletter_alert,
            show_games_newsletter_opt_in_alert,
            show_rating_alert,
            show_recommendations,
            update_user_in_environment,
        };

        Self { inputs, outputs }
    }
}

impl ViewModel for ThanksViewModel {
    type Inputs = ThanksInputs;
    type Outputs = ThanksOutputs;

    fn inputs(&self) -> &ThanksInputs {
        &self.inputs
    }

    fn outputs(&self) -> &ThanksOutputs {
        &self.outputs
    }
}

/// The pledge push prompt applies to a first-time backer who has not
/// been asked before.
fn should_show_pledge_prompt(env: &Arc<AppEnvironment>) -> bool {
    !env.prefs().bool_flag(keys::HAS_SEEN_PLEDGE_PUSH_PROMPT)
        && env
            .current_user()
            .map(|user| user.stats.backed_projects_count == 0)
            .unwrap_or(false)
}

/// Related projects for the thanks screen: recommended (shuffled),
/// similar, and staff picks in the root category, concatenated in that
/// order, minus the backed project itself, de-duplicated by id keeping
/// the first occurrence, capped at three. Sources fail independently;
/// a failed fetch contributes nothing.
fn related_projects(
    env: Arc<AppEnvironment>,
    project: Project,
    category: Category,
) -> BoxFuture<'static, Option<Vec<Project>>> {
    Box::pin(async move {
        let api = Arc::clone(env.api());

        let base = DiscoveryParams {
            backed: Some(false),
            per_page: Some(3),
            ..DiscoveryParams::defaults()
        };
        let recommended_params = DiscoveryParams {
            recommended: Some(true),
            backed: Some(false),
            per_page: Some(6),
            ..DiscoveryParams::defaults()
        };
        let similar_params = DiscoveryParams {
            similar_to: Some(project.id),
            ..base.clone()
        };
        let staff_pick_params = DiscoveryParams {
            staff_picks: Some(true),
            category: Some(category),
            ..base
        };

        let recommended = api
            .fetch_discovery(recommended_params)
            .await
            .demoted("fetch_discovery(recommended)")
            .map(|envelope| {
                let mut projects = envelope.projects;
                env.shuffle(&mut projects);
                projects
            })
            .unwrap_or_default();
        let similar = api
            .fetch_discovery(similar_params)
            .await
            .demoted("fetch_discovery(similar)")
            .map(|envelope| envelope.projects)
            .unwrap_or_default();
        let staff_picks = api
            .fetch_discovery(staff_pick_params)
            .await
            .demoted("fetch_discovery(staff_picks)")
            .map(|envelope| envelope.projects)
            .unwrap_or_default();

        let mut seen = HashSet::new();
        let related: Vec<Project> = recommended
            .into_iter()
            .chain(similar)
            .chain(staff_picks)
            .filter(|candidate| candidate.id != project.id)
            .filter(|candidate| seen.insert(candidate.id))
            .take(3)
            .collect();
        Some(related)
    })
}

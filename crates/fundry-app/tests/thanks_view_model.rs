//! Thanks screen behavior, driven end to end through the environment.

use fundry_app::config::AppConfig;
use fundry_app::notifications::NotificationName;
use fundry_app::viewmodels::thanks::ThanksViewModel;
use fundry_core::effects::prefs::{keys, PreferenceEffects};
use fundry_core::models::{DiscoveryParams, Project, RefTag, User, UserStats};
use fundry_testkit::fixtures::{
    games_category, games_project, project_with_id, template_category, template_project,
    template_user, thanks_data,
};
use fundry_testkit::{ApiCall, MockApiService, TestEnvironmentBuilder, TestObserver};

use fundry_core::models::DiscoveryEnvelope;

fn envelope(projects: Vec<Project>) -> DiscoveryEnvelope {
    DiscoveryEnvelope { projects }
}

#[test]
fn backed_project_text_emits_once_the_view_loads() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let text = TestObserver::new();
    text.observe(&vm.outputs.backed_project_text);

    vm.inputs.configure(thanks_data(template_project()));
    text.assert_did_not_emit("nothing shows before the view loads");

    vm.inputs.view_did_load();
    text.assert_values(&[
        "You have successfully backed The Project. This project is now one step closer to a \
         reality, thanks to you. Spread the word!"
            .to_string(),
    ]);
}

#[test]
fn close_dismisses_and_posts_project_backed() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let dismiss = TestObserver::new();
    dismiss.observe(&vm.outputs.dismiss_and_post_notification);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();
    vm.inputs.close_tapped();

    assert_eq!(
        dismiss.values()[0].name,
        NotificationName::PROJECT_BACKED
    );
}

#[test]
fn category_cell_goes_to_discovery_filtered_to_it() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let go_to_discovery = TestObserver::new();
    go_to_discovery.observe(&vm.outputs.go_to_discovery);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();
    vm.inputs.category_cell_tapped(games_category());

    let expected = DiscoveryParams {
        category: Some(games_category()),
        ..DiscoveryParams::defaults()
    };
    go_to_discovery.assert_values(&[expected]);
}

#[test]
fn games_newsletter_alert_fires_once_and_marks_the_prompt_seen() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let games_alert = TestObserver::new();
    games_alert.observe(&vm.outputs.show_games_newsletter_alert);
    let rating_alert = TestObserver::new();
    rating_alert.observe(&vm.outputs.show_rating_alert);

    vm.inputs.configure(thanks_data(games_project()));
    vm.inputs.view_did_load();

    games_alert.assert_value_count(1, "games alert shows exactly once");
    rating_alert.assert_did_not_emit("rating alert never competes with the games alert");
    assert!(
        context
            .prefs
            .bool_flag(keys::HAS_SEEN_GAMES_NEWSLETTER_PROMPT),
        "prompt is marked seen"
    );
}

#[test]
fn games_newsletter_alert_respects_prior_prompt_and_existing_opt_in() {
    use fundry_testkit::TestPreferences;

    let context = TestEnvironmentBuilder::new()
        .prefs(TestPreferences::new().with_flag(keys::HAS_SEEN_GAMES_NEWSLETTER_PROMPT, true))
        .build();
    let vm = ThanksViewModel::new(&context.env);

    let games_alert = TestObserver::new();
    games_alert.observe(&vm.outputs.show_games_newsletter_alert);

    vm.inputs.configure(thanks_data(games_project()));
    vm.inputs.view_did_load();

    games_alert.assert_did_not_emit("prompt already seen");
}

#[test]
fn rating_alert_fires_for_non_games_projects_and_marks_itself_seen() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let rating_alert = TestObserver::new();
    rating_alert.observe(&vm.outputs.show_rating_alert);
    let games_alert = TestObserver::new();
    games_alert.observe(&vm.outputs.show_games_newsletter_alert);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();

    rating_alert.assert_value_count(1, "rating alert shows once");
    games_alert.assert_did_not_emit("not a games project");
    assert!(context.prefs.bool_flag(keys::HAS_SEEN_APP_RATING));
}

#[test]
fn rating_alert_needs_a_configured_rating_link() {
    let context = TestEnvironmentBuilder::new()
        .config(AppConfig {
            rating_link: None,
            ..AppConfig::default()
        })
        .build();
    let vm = ThanksViewModel::new(&context.env);

    let rating_alert = TestObserver::new();
    rating_alert.observe(&vm.outputs.show_rating_alert);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();

    rating_alert.assert_did_not_emit("no store link to rate on");
}

#[test]
fn recommendations_exclude_the_subject_dedupe_and_cap_at_three() {
    let own = template_project();
    let api = MockApiService::new()
        .with_category(Ok(template_category()))
        .with_discovery_queue(vec![
            // recommended (shuffled): contains the backed project itself
            Ok(envelope(vec![own.clone(), project_with_id(2)])),
            // similar: overlaps with recommended
            Ok(envelope(vec![project_with_id(2), project_with_id(3)])),
            // staff picks: overlaps and overflows the cap
            Ok(envelope(vec![
                project_with_id(3),
                project_with_id(4),
                project_with_id(5),
            ])),
        ]);
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ThanksViewModel::new(&context.env);

    let recommendations = TestObserver::new();
    recommendations.observe(&vm.outputs.show_recommendations);

    vm.inputs.configure(thanks_data(own.clone()));
    vm.inputs.view_did_load();
    context.tasks.advance();

    recommendations.assert_value_count(1, "one combined emission");
    let (projects, category) = recommendations.values().remove(0);
    assert_eq!(category, template_category());
    let ids: Vec<u64> = projects.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![2, 3, 4], "subject excluded, first-seen order, capped");
}

#[test]
fn failed_recommendation_sources_contribute_nothing() {
    use fundry_core::effects::api::ApiError;

    let api = MockApiService::new()
        .with_category(Ok(template_category()))
        .with_discovery_queue(vec![
            Err(ApiError::Server { status: 500 }),
            Ok(envelope(vec![project_with_id(2)])),
            Err(ApiError::Timeout(5_000)),
        ]);
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ThanksViewModel::new(&context.env);

    let recommendations = TestObserver::new();
    recommendations.observe(&vm.outputs.show_recommendations);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();
    context.tasks.advance();

    let (projects, _) = recommendations.values().remove(0);
    assert_eq!(projects.len(), 1, "only the surviving source contributes");
}

#[test]
fn tapping_a_recommendation_goes_to_the_project_with_context() {
    let api = MockApiService::new()
        .with_category(Ok(template_category()))
        .with_discovery(Ok(envelope(vec![project_with_id(2), project_with_id(3)])));
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ThanksViewModel::new(&context.env);

    let go_to_project = TestObserver::new();
    go_to_project.observe(&vm.outputs.go_to_project);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();
    context.tasks.advance();

    vm.inputs.project_tapped(project_with_id(3));

    let (tapped, projects, ref_tag) = go_to_project.values().remove(0);
    assert_eq!(tapped.id.0, 3);
    assert_eq!(ref_tag, RefTag::Thanks);
    assert!(projects.iter().any(|p| p.id.0 == 2));
}

#[test]
fn page_viewed_tracks_once_despite_repeated_view_loads() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();
    vm.inputs.view_did_load();

    assert_eq!(context.analytics.event_names(), vec!["Page Viewed"]);
    assert_eq!(
        context.analytics.property_values("context_type"),
        vec![serde_json::json!("new_pledge")]
    );
}

#[test]
fn newsletter_signup_updates_the_user_then_acknowledges() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ThanksViewModel::new(&context.env);

    let updated_user = TestObserver::new();
    updated_user.observe(&vm.outputs.update_user_in_environment);
    let user_updated_note = TestObserver::new();
    user_updated_note.observe(&vm.outputs.post_user_updated_notification);

    vm.inputs.configure(thanks_data(games_project()));
    vm.inputs.view_did_load();
    vm.inputs.games_newsletter_signup_tapped();
    context.tasks.advance();

    let stored: User = updated_user.values().remove(0);
    assert!(stored.newsletters.games, "opt-in applied before the call");
    assert!(context
        .api
        .calls()
        .iter()
        .any(|call| matches!(call, ApiCall::UpdateUser(user) if user.newsletters.games)));

    // The binder stores the user, then acknowledges.
    context.env.replace_current_user(stored);
    vm.inputs.user_updated();
    assert_eq!(
        user_updated_note.values()[0].name,
        NotificationName::USER_UPDATED
    );
}

#[test]
fn games_opt_in_confirmation_only_in_double_opt_in_countries() {
    let context = TestEnvironmentBuilder::new()
        .config(AppConfig {
            country_code: "DE".to_string(),
            ..AppConfig::default()
        })
        .build();
    let vm = ThanksViewModel::new(&context.env);

    let opt_in_alert = TestObserver::new();
    opt_in_alert.observe(&vm.outputs.show_games_newsletter_opt_in_alert);

    vm.inputs.configure(thanks_data(games_project()));
    vm.inputs.view_did_load();
    vm.inputs.games_newsletter_signup_tapped();

    opt_in_alert.assert_values(&["Games Newsletter".to_string()]);
}

#[test]
fn contextual_push_prompt_applies_to_first_time_backers() {
    let first_timer = User {
        stats: UserStats {
            backed_projects_count: 0,
            created_projects_count: 0,
        },
        ..template_user()
    };
    let context = TestEnvironmentBuilder::new()
        .current_user(Some(first_timer))
        .build();
    let vm = ThanksViewModel::new(&context.env);

    let contextual = TestObserver::new();
    contextual.observe(&vm.outputs.post_contextual_notification);

    vm.inputs.configure(thanks_data(template_project()));
    vm.inputs.view_did_load();

    contextual.assert_value_count(1, "first backing asks for push permission");
}

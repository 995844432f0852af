//! Updates web screen: request loading, policy decisions, and native
//! routing of intercepted links.

use url::Url;

use fundry_app::navigation::{NavigationAction, NavigationPolicy, NavigationType};
use fundry_app::viewmodels::project_updates::ProjectUpdatesViewModel;
use fundry_testkit::fixtures::{template_project, template_update};
use fundry_testkit::{ApiCall, MockApiService, TestEnvironmentBuilder, TestObserver};

fn link(url: &str) -> NavigationAction {
    NavigationAction {
        url: Url::parse(url).unwrap_or_else(|e| panic!("test URL should parse: {e}")),
        navigation_type: NavigationType::LinkActivated,
        target_frame_is_main: Some(true),
    }
}

#[test]
fn loads_the_updates_index_once_configured_and_loaded() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let requests = TestObserver::new();
    requests.observe(&vm.outputs.load_web_request);

    vm.inputs.configure(template_project());
    requests.assert_did_not_emit("waits for the view");

    vm.inputs.view_did_load();
    requests.assert_value_count(1, "initial index load");
    assert_eq!(
        requests.values()[0].url.as_str(),
        "https://fundry.example/projects/creator/the-project/posts"
    );
}

#[test]
fn policy_allows_webview_owned_and_subframe_navigations() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();

    let own_load = NavigationAction {
        navigation_type: NavigationType::Other,
        ..link("https://fundry.example/projects/creator/the-project/posts")
    };
    assert_eq!(vm.inputs.decide_policy(own_load), NavigationPolicy::Allow);

    let subframe = NavigationAction {
        target_frame_is_main: Some(false),
        ..link("https://ads.example/frame")
    };
    assert_eq!(vm.inputs.decide_policy(subframe), NavigationPolicy::Allow);

    let external = link("https://elsewhere.example/article");
    assert_eq!(vm.inputs.decide_policy(external), NavigationPolicy::Cancel);
}

#[test]
fn another_updates_index_link_reloads_the_web_view() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let requests = TestObserver::new();
    requests.observe(&vm.outputs.load_web_request);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();
    vm.inputs
        .decide_policy(link("https://fundry.example/projects/bob/other-project/posts"));

    requests.assert_value_count(2, "index links reload in place");
}

#[test]
fn update_links_fetch_the_update_and_pair_it_with_the_project() {
    let api = MockApiService::new().with_update(Ok(template_update()));
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let go_to_update = TestObserver::new();
    go_to_update.observe(&vm.outputs.go_to_update);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();
    vm.inputs
        .decide_policy(link("https://fundry.example/projects/creator/the-project/posts/42"));
    context.tasks.advance();

    let (project, update) = go_to_update.values().remove(0);
    assert_eq!(project, template_project());
    assert_eq!(update, template_update());
}

#[test]
fn a_newer_update_link_supersedes_an_in_flight_fetch() {
    let api = MockApiService::new().with_update(Ok(template_update()));
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let go_to_update = TestObserver::new();
    go_to_update.observe(&vm.outputs.go_to_update);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();
    vm.inputs
        .decide_policy(link("https://fundry.example/projects/creator/the-project/posts/41"));
    vm.inputs
        .decide_policy(link("https://fundry.example/projects/creator/the-project/posts/42"));
    context.tasks.advance();

    go_to_update.assert_value_count(1, "stale fetch result is discarded");
    let fetches: Vec<_> = context
        .api
        .calls()
        .into_iter()
        .filter(|call| matches!(call, ApiCall::FetchUpdate(_, _)))
        .collect();
    assert_eq!(fetches.len(), 2, "both requests were issued");
}

#[test]
fn comments_links_go_to_update_comments() {
    let api = MockApiService::new().with_update(Ok(template_update()));
    let context = TestEnvironmentBuilder::new().api(api).build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let comments = TestObserver::new();
    comments.observe(&vm.outputs.go_to_update_comments);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();
    vm.inputs.decide_policy(link(
        "https://fundry.example/projects/creator/the-project/posts/42/comments",
    ));
    context.tasks.advance();

    comments.assert_values(&[template_update()]);
}

#[test]
fn unrecognized_links_open_externally() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let external = TestObserver::new();
    external.observe(&vm.outputs.go_to_external);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();
    vm.inputs.decide_policy(link("https://elsewhere.example/article"));

    external.assert_value_count(1, "non-native links leave the app");
}

#[test]
fn mail_links_compose_when_the_device_can_and_error_when_it_cannot() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let compose = TestObserver::new();
    compose.observe(&vm.outputs.show_mail_compose);
    let error = TestObserver::new();
    error.observe(&vm.outputs.show_no_email_error);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();

    vm.inputs.can_send_email(true);
    vm.inputs.decide_policy(link("mailto:creator@fundry.example"));
    compose.assert_values(&["creator@fundry.example".to_string()]);
    error.assert_did_not_emit("device can send email");

    vm.inputs.can_send_email(false);
    vm.inputs.decide_policy(link("mailto:creator@fundry.example"));
    error.assert_value_count(1, "explicit error when email is unavailable");
}

#[test]
fn phone_links_dial_when_the_device_can() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let calls = TestObserver::new();
    calls.observe(&vm.outputs.make_phone_call);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();

    vm.inputs.can_make_phone_call(false);
    vm.inputs.decide_policy(link("tel:+15551234567"));
    calls.assert_did_not_emit("no dialer available");

    vm.inputs.can_make_phone_call(true);
    vm.inputs.decide_policy(link("tel:+15551234567"));
    calls.assert_value_count(1, "dialer available");
}

#[test]
fn activity_indicator_follows_web_view_navigation() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    let hidden = TestObserver::new();
    hidden.observe(&vm.outputs.is_activity_indicator_hidden);

    vm.inputs.web_view_did_start_navigation();
    vm.inputs.web_view_did_finish_navigation();

    hidden.assert_values(&[false, true]);
}

#[test]
fn project_viewed_is_tracked_once_loaded() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = ProjectUpdatesViewModel::new(&context.env);

    vm.inputs.configure(template_project());
    vm.inputs.view_did_load();

    assert_eq!(context.analytics.event_names(), vec!["Project Viewed"]);
}

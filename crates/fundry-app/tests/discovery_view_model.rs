//! Discovery screen: readiness gating, param flow, and sort paging.

use fundry_app::viewmodels::discovery::DiscoveryViewModel;
use fundry_core::models::{
    CategoryId, DiscoveryParams, DiscoverySort, NavigationDirection, User,
};
use fundry_testkit::fixtures::{games_category, template_user};
use fundry_testkit::{TestEnvironmentBuilder, TestObserver};

#[test]
fn sorts_configure_once_on_the_first_readiness_signal() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let pager = TestObserver::new();
    pager.observe(&vm.outputs.configure_pager_data_source);
    let sort_pager = TestObserver::new();
    sort_pager.observe(&vm.outputs.configure_sort_pager);

    vm.inputs.view_did_load();
    vm.inputs.remote_config_ready(); // late arrival must not reconfigure

    pager.assert_values(&[DiscoverySort::ALL.to_vec()]);
    sort_pager.assert_values(&[DiscoverySort::ALL.to_vec()]);
}

#[test]
fn initial_params_follow_the_recommendations_opt_in() {
    let context = TestEnvironmentBuilder::new().build(); // template user opted in
    let vm = DiscoveryViewModel::new(&context.env);

    let header = TestObserver::new();
    header.observe(&vm.outputs.configure_navigation_header);

    vm.inputs.view_did_load();
    vm.inputs.view_will_appear(false);

    header.assert_values(&[DiscoveryParams::recommended_defaults()]);
}

#[test]
fn opted_out_users_get_defaults_with_potd() {
    let opted_out = User {
        opted_out_of_recommendations: Some(true),
        ..template_user()
    };
    let context = TestEnvironmentBuilder::new()
        .current_user(Some(opted_out))
        .build();
    let vm = DiscoveryViewModel::new(&context.env);

    let header = TestObserver::new();
    header.observe(&vm.outputs.configure_navigation_header);

    vm.inputs.view_did_load();
    vm.inputs.view_will_appear(false);

    header.assert_values(&[DiscoveryParams {
        include_potd: Some(true),
        ..DiscoveryParams::defaults()
    }]);
}

#[test]
fn repeated_identical_filters_emit_once() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let data_source = TestObserver::new();
    data_source.observe(&vm.outputs.load_filter_into_data_source);

    vm.inputs.view_did_load();
    vm.inputs.view_will_appear(false);

    let filtered = DiscoveryParams {
        category: Some(games_category()),
        ..DiscoveryParams::defaults()
    };
    vm.inputs.filter(filtered.clone());
    vm.inputs.filter(filtered.clone());

    data_source.assert_values(&[DiscoveryParams::recommended_defaults(), filtered]);
}

#[test]
fn sort_transitions_tie_break_on_pager_order() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let navigate = TestObserver::new();
    navigate.observe(&vm.outputs.navigate_to_sort);

    vm.inputs.view_did_load();
    vm.inputs.sort_pager_selected(DiscoverySort::Popular);
    vm.inputs.sort_pager_selected(DiscoverySort::Magic);
    vm.inputs.sort_pager_selected(DiscoverySort::EndingSoon);

    navigate.assert_values(&[
        (DiscoverySort::Popular, NavigationDirection::Forward),
        (DiscoverySort::Magic, NavigationDirection::Reverse),
        (DiscoverySort::EndingSoon, NavigationDirection::Forward),
    ]);
}

#[test]
fn swipes_select_the_page_but_never_renavigate() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let navigate = TestObserver::new();
    navigate.observe(&vm.outputs.navigate_to_sort);
    let select = TestObserver::new();
    select.observe(&vm.outputs.select_sort_page);

    vm.inputs.view_did_load();
    vm.inputs.will_transition(1);
    vm.inputs.page_transition(true);

    select.assert_values(&[DiscoverySort::Popular]);
    navigate.assert_did_not_emit("swipe transitions are already handled");
}

#[test]
fn incomplete_transitions_do_not_select() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let select = TestObserver::new();
    select.observe(&vm.outputs.select_sort_page);

    vm.inputs.view_did_load();
    vm.inputs.will_transition(2);
    vm.inputs.page_transition(false);

    select.assert_did_not_emit("cancelled swipe leaves the page alone");
}

#[test]
fn out_of_range_page_indexes_are_ignored() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let select = TestObserver::new();
    select.observe(&vm.outputs.select_sort_page);

    vm.inputs.view_did_load();
    vm.inputs.will_transition(99);
    vm.inputs.page_transition(true);

    select.assert_did_not_emit("no sort at that page index");
}

#[test]
fn sort_changes_track_an_analytics_event() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    vm.inputs.view_did_load();
    vm.inputs.view_will_appear(false);
    vm.inputs.sort_pager_selected(DiscoverySort::Newest);

    assert_eq!(
        context.analytics.event_names(),
        vec!["Discover Sort Selected"]
    );
}

#[test]
fn sorts_enabled_passes_through() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let enabled = TestObserver::new();
    enabled.observe(&vm.outputs.sorts_are_enabled);

    vm.inputs.set_sorts_enabled(false);
    vm.inputs.set_sorts_enabled(true);

    enabled.assert_values(&[false, true]);
}

#[test]
fn pager_style_updates_on_distinct_categories_only() {
    let context = TestEnvironmentBuilder::new().build();
    let vm = DiscoveryViewModel::new(&context.env);

    let style = TestObserver::new();
    style.observe(&vm.outputs.update_sort_pager_style);

    vm.inputs.view_did_load();
    let games = DiscoveryParams {
        category: Some(games_category()),
        ..DiscoveryParams::defaults()
    };
    vm.inputs.filter(games.clone());
    vm.inputs.filter(games);
    vm.inputs.filter(DiscoveryParams::defaults());

    style.assert_values(&[Some(CategoryId::GAMES), None]);
}

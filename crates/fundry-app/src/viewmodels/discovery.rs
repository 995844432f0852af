//! Discovery screen: a sort pager over filtered project pages.
//!
//! Downstream composition is gated on readiness: remote config becoming
//! ready, remote config failing, or the view simply loading, whichever
//! happens first. Sort transitions track both explicit pager taps and
//! swipe gestures; swipe-originated transitions are tagged as already
//! handled so they never re-trigger programmatic navigation.

use std::sync::Arc;

use serde_json::json;

use fundry_core::models::{CategoryId, DiscoveryParams, DiscoverySort, NavigationDirection};
use fundry_core::signal::{combine_latest, combine_latest3, Signal, Slot};

use crate::environment::AppEnvironment;
use crate::viewmodels::ViewModel;

pub struct DiscoveryInputs {
    view_did_load: Slot<()>,
    view_will_appear: Slot<bool>,
    remote_config_ready: Slot<()>,
    remote_config_failed: Slot<()>,
    filter_params: Slot<DiscoveryParams>,
    sort_pager_selected: Slot<DiscoverySort>,
    will_transition_to_page: Slot<usize>,
    page_transition_completed: Slot<bool>,
    recommendations_setting_changed: Slot<()>,
    sorts_enabled: Slot<bool>,
}

impl DiscoveryInputs {
    /// Call from the screen's view-did-load.
    pub fn view_did_load(&self) {
        self.view_did_load.record(());
    }

    /// Call from the screen's view-will-appear.
    pub fn view_will_appear(&self, animated: bool) {
        self.view_will_appear.record(animated);
    }

    /// Call when the remote config client has been configured.
    pub fn remote_config_ready(&self) {
        self.remote_config_ready.record(());
    }

    /// Call when remote config configuration failed; discovery proceeds
    /// with defaults.
    pub fn remote_config_failed(&self) {
        self.remote_config_failed.record(());
    }

    /// Call when a filter parameter set has been selected.
    pub fn filter(&self, params: DiscoveryParams) {
        self.filter_params.record(params);
    }

    /// Call when the sort pager wants to switch to a sort.
    pub fn sort_pager_selected(&self, sort: DiscoverySort) {
        self.sort_pager_selected.record(sort);
    }

    /// Call when the page container begins transitioning to a page.
    pub fn will_transition(&self, to_page: usize) {
        self.will_transition_to_page.record(to_page);
    }

    /// Call when the page container finishes a transition.
    pub fn page_transition(&self, completed: bool) {
        self.page_transition_completed.record(completed);
    }

    /// Call when the account-level recommendations setting changes.
    pub fn recommendations_setting_changed(&self) {
        self.recommendations_setting_changed.record(());
    }

    /// Call to enable/disable the sorts while an empty state is shown.
    pub fn set_sorts_enabled(&self, enabled: bool) {
        self.sorts_enabled.record(enabled);
    }
}

pub struct DiscoveryOutputs {
    /// Params for the navigation header.
    pub configure_navigation_header: Signal<DiscoveryParams>,
    /// Sort list for the page data source.
    pub configure_pager_data_source: Signal<Vec<DiscoverySort>>,
    /// Sort list for the sort pager control.
    pub configure_sort_pager: Signal<Vec<DiscoverySort>>,
    /// Params to load into every discovery page.
    pub load_filter_into_data_source: Signal<DiscoveryParams>,
    /// Programmatic page navigation with animation direction.
    pub navigate_to_sort: Signal<(DiscoverySort, NavigationDirection)>,
    /// Sort to highlight in the pager control.
    pub select_sort_page: Signal<DiscoverySort>,
    /// Enable/disable the sort controls.
    pub sorts_are_enabled: Signal<bool>,
    /// Category id to restyle the pager with.
    pub update_sort_pager_style: Signal<Option<CategoryId>>,
}

/// A sort transition tagged with whether navigation already happened
/// (swipes) or still needs to be performed programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaggedSort {
    sort: DiscoverySort,
    handled: bool,
}

pub struct DiscoveryViewModel {
    pub inputs: DiscoveryInputs,
    pub outputs: DiscoveryOutputs,
}

impl DiscoveryViewModel {
    pub fn new(env: &Arc<AppEnvironment>) -> Self {
        let inputs = DiscoveryInputs {
            view_did_load: Slot::new(),
            view_will_appear: Slot::new(),
            remote_config_ready: Slot::new(),
            remote_config_failed: Slot::new(),
            filter_params: Slot::new(),
            sort_pager_selected: Slot::new(),
            will_transition_to_page: Slot::new(),
            page_transition_completed: Slot::new(),
            recommendations_setting_changed: Slot::new(),
            sorts_enabled: Slot::new(),
        };

        // First readiness signal wins; nothing downstream starts before it.
        let ready = Signal::merge(&[
            inputs.remote_config_ready.signal(),
            inputs.remote_config_failed.signal(),
            inputs.view_did_load.signal(),
        ])
        .take_first(1);

        let configure_with_sorts = ready.map(|_| DiscoverySort::ALL.to_vec());

        let view_will_appear_units = inputs.view_will_appear.signal().map(|_| ());

        let initial_params = {
            let env = Arc::clone(env);
            Signal::merge(&[
                view_will_appear_units.take_first(1),
                inputs
                    .recommendations_setting_changed
                    .signal()
                    .sample_on(&view_will_appear_units),
            ])
            .map(move |_| initial_params_for(&env))
            .skip_repeats()
        };

        let current_params = Signal::merge(&[initial_params, inputs.filter_params.signal()])
            .skip_repeats();

        let configured_and_params =
            combine_latest(&configure_with_sorts, &current_params).map(|pair| pair.1.clone());

        let swipe_to_sort = inputs
            .will_transition_to_page
            .signal()
            .sample_on(&inputs.page_transition_completed.signal().filter(|done| *done))
            .filter_map(|page| DiscoverySort::ALL.get(*page).copied());

        let pager_selected = inputs.sort_pager_selected.signal();
        let params_sort = current_params.filter_map(|params| params.sort);

        let prev_sorted_page = Signal::merge(&[swipe_to_sort.clone(), pager_selected.clone()])
            .combine_previous(DiscoverySort::Magic)
            .map(|pair| pair.0);

        let select_sort_page = Signal::merge(&[
            swipe_to_sort.clone(),
            pager_selected.clone(),
            params_sort.clone(),
        ])
        .skip_repeats();

        let navigate_to_sort = Signal::merge(&[
            swipe_to_sort.map(|sort| TaggedSort {
                sort: *sort,
                handled: true,
            }),
            pager_selected.map(|sort| TaggedSort {
                sort: *sort,
                handled: false,
            }),
            params_sort.map(|sort| TaggedSort {
                sort: *sort,
                handled: false,
            }),
        ])
        .skip_repeats()
        .combine_previous(TaggedSort {
            sort: DiscoverySort::Magic,
            handled: true,
        })
        .filter(|pair| !pair.1.handled)
        .map(|pair| {
            let (previous, next) = pair;
            let direction = if next.sort.position() < previous.sort.position() {
                NavigationDirection::Reverse
            } else {
                NavigationDirection::Forward
            };
            (next.sort, direction)
        });

        let update_sort_pager_style = inputs
            .filter_params
            .signal()
            .map(|params| params.category.as_ref().map(|category| category.id))
            .skip_repeats();

        // Sort-selected analytics: fires whenever the sorted page actually
        // changes, with the params in effect at that moment.
        {
            let env = Arc::clone(env);
            let current_sorted_page = Signal::merge(&[
                pager_selected.skip_repeats(),
                swipe_to_sort.clone(),
            ]);
            combine_latest3(&current_params, &current_sorted_page, &prev_sorted_page)
                .filter(|triple| triple.1 != triple.2)
                .observe(move |triple| {
                    let (params, current, previous) = triple;
                    env.track(
                        "Discover Sort Selected",
                        json!({
                            "context_page": "discovery",
                            "discover_sort": format!("{current:?}"),
                            "previous_sort": format!("{previous:?}"),
                            "has_category_filter": params.category.is_some(),
                        }),
                    );
                });
        }

        let outputs = DiscoveryOutputs {
            configure_navigation_header: configured_and_params.clone(),
            configure_pager_data_source: configure_with_sorts.clone(),
            configure_sort_pager: configure_with_sorts,
            load_filter_into_data_source: configured_and_params,
            navigate_to_sort,
            select_sort_page,
            sorts_are_enabled: inputs.sorts_enabled.signal(),
            update_sort_pager_style,
        };

        Self { inputs, outputs }
    }
}

impl ViewModel for DiscoveryViewModel {
    type Inputs = DiscoveryInputs;
    type Outputs = DiscoveryOutputs;

    fn inputs(&self) -> &DiscoveryInputs {
        &self.inputs
    }

    fn outputs(&self) -> &DiscoveryOutputs {
        &self.outputs
    }
}

/// Baseline params: recommendations for users who explicitly have them
/// enabled, the plain default set (with projects-of-the-day) otherwise.
fn initial_params_for(env: &Arc<AppEnvironment>) -> DiscoveryParams {
    match env.current_user() {
        Some(user) if user.opted_out_of_recommendations == Some(false) => {
            DiscoveryParams::recommended_defaults()
        }
        _ => DiscoveryParams {
            include_potd: Some(true),
            ..DiscoveryParams::defaults()
        },
    }
}

//! Pledge summary cell: pure projections of the configured backing.
//!
//! Everything here is formatting; the only external read is the current
//! user, taken fresh from the environment at firing time to decide
//! whether the backer identity rows apply.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use fundry_core::models::{ProjectState, User, UserId};
use fundry_core::signal::{combine_latest, Signal, Slot};

use crate::environment::AppEnvironment;
use crate::format;
use crate::viewmodels::ViewModel;

/// Status of a backing, as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackingState {
    Pledged,
    Collected,
    Dropped,
    Errored,
    Canceled,
}

/// Everything the manage-pledge screen hands the summary cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PledgeSummaryData {
    pub backer_id: UserId,
    pub backer_sequence: u32,
    pub backing_state: BackingState,
    pub bonus_amount: Option<f64>,
    pub current_user_is_creator: bool,
    pub is_no_reward: bool,
    pub location_name: Option<String>,
    pub needs_conversion: bool,
    pub omit_us_currency_code: bool,
    pub pledge_amount: f64,
    /// Seconds UTC the pledge was made.
    pub pledged_on: i64,
    pub currency_code: String,
    pub project_deadline: i64,
    pub project_state: ProjectState,
    pub reward_minimum: f64,
    pub reward_received_hidden: bool,
    pub shipping_amount: Option<f64>,
    pub shipping_amount_hidden: bool,
}

/// Data for the nested pledge-amount breakdown view.
#[derive(Debug, Clone, PartialEq)]
pub struct PledgeAmountSummaryData {
    pub bonus_amount: Option<f64>,
    pub is_no_reward: bool,
    pub location_name: Option<String>,
    pub omit_us_currency_code: bool,
    pub currency_code: String,
    pub pledged_on: i64,
    pub reward_minimum: f64,
    pub shipping_amount: Option<f64>,
    pub shipping_amount_hidden: bool,
}

/// Data for the nested pledge-status label.
#[derive(Debug, Clone, PartialEq)]
pub struct PledgeStatusData {
    pub current_user_is_creator: bool,
    pub needs_conversion: bool,
    pub pledge_amount: f64,
    pub currency_code: String,
    pub project_deadline: i64,
    pub project_state: ProjectState,
    pub backing_state: BackingState,
}

pub struct PledgeSummaryInputs {
    configure_data: Slot<PledgeSummaryData>,
    view_did_load: Slot<()>,
}

impl PledgeSummaryInputs {
    /// Call with the summary data before presenting.
    pub fn configure(&self, data: PledgeSummaryData) {
        self.configure_data.record(data);
    }

    /// Call when the cell's view has loaded.
    pub fn view_did_load(&self) {
        self.view_did_load.record(());
    }
}

pub struct PledgeSummaryOutputs {
    /// Avatar URL plus the placeholder asset name.
    pub backer_avatar: Signal<(String, String)>,
    /// Hide the backer name row when the viewer is not the backer.
    pub backer_name_hidden: Signal<bool>,
    pub backer_name_text: Signal<String>,
    /// `"Backer #1,234"`.
    pub backer_number_text: Signal<String>,
    /// `"As of March 15, 2026"`.
    pub backing_date_text: Signal<String>,
    pub circle_avatar_hidden: Signal<bool>,
    pub configure_pledge_amount_summary: Signal<PledgeAmountSummaryData>,
    pub configure_pledge_status: Signal<PledgeStatusData>,
    pub reward_received_hidden: Signal<bool>,
    /// The formatted pledge total, e.g. `"$10.00"`.
    pub total_amount_text: Signal<String>,
}

pub struct PledgeSummaryViewModel {
    pub inputs: PledgeSummaryInputs,
    pub outputs: PledgeSummaryOutputs,
}

impl PledgeSummaryViewModel {
    pub fn new(env: &Arc<AppEnvironment>) -> Self {
        let inputs = PledgeSummaryInputs {
            configure_data: Slot::new(),
            view_did_load: Slot::new(),
        };

        let data = combine_latest(
            &inputs.configure_data.signal(),
            &inputs.view_did_load.signal(),
        )
        .map(|pair| pair.0.clone());

        let user_and_is_backer = {
            let env = Arc::clone(env);
            data.filter_map(move |data| {
                env.current_user()
                    .map(|user| (user.clone(), data.backer_id == user.id))
            })
        };

        let backer_name_hidden = user_and_is_backer.map(|pair| !pair.1);
        let circle_avatar_hidden = user_and_is_backer.map(|pair| !pair.1);

        let backing_user: Signal<User> = user_and_is_backer
            .filter(|pair| pair.1)
            .map(|pair| pair.0.clone());

        let backer_name_text = backing_user.map(|user| user.name.clone());

        let backer_avatar = backing_user
            .filter(|user| !user.avatar.small.is_empty())
            .map(|user| (user.avatar.small.clone(), "avatar--placeholder".to_string()));

        let backer_number_text = data.map(|data| {
            format!(
                "Backer #{}",
                format::whole_number(u64::from(data.backer_sequence))
            )
        });

        let backing_date_text =
            data.map(|data| format!("As of {}", format::date_long(data.pledged_on)));

        let total_amount_text = data.map(|data| {
            format::currency(
                data.pledge_amount,
                &data.currency_code,
                data.omit_us_currency_code,
            )
        });

        let configure_pledge_amount_summary = data.map(|data| PledgeAmountSummaryData {
            bonus_amount: data.bonus_amount,
            is_no_reward: data.is_no_reward,
            location_name: data.location_name.clone(),
            omit_us_currency_code: data.omit_us_currency_code,
            currency_code: data.currency_code.clone(),
            pledged_on: data.pledged_on,
            reward_minimum: data.reward_minimum,
            shipping_amount: data.shipping_amount,
            shipping_amount_hidden: data.shipping_amount_hidden,
        });

        let configure_pledge_status = data.map(|data| PledgeStatusData {
            current_user_is_creator: data.current_user_is_creator,
            needs_conversion: data.needs_conversion,
            pledge_amount: data.pledge_amount,
            currency_code: data.currency_code.clone(),
            project_deadline: data.project_deadline,
            project_state: data.project_state,
            backing_state: data.backing_state,
        });

        let reward_received_hidden = data.map(|data| data.reward_received_hidden);

        let outputs = PledgeSummaryOutputs {
            backer_avatar,
            backer_name_hidden,
            backer_name_text,
            backer_number_text,
            backing_date_text,
            circle_avatar_hidden,
            configure_pledge_amount_summary,
            configure_pledge_status,
            reward_received_hidden,
            total_amount_text,
        };

        Self { inputs, outputs }
    }
}

impl ViewModel for PledgeSummaryViewModel {
    type Inputs = PledgeSummaryInputs;
    type Outputs = PledgeSummaryOutputs;

    fn inputs(&self) -> &PledgeSummaryInputs {
        &self.inputs
    }

    fn outputs(&self) -> &PledgeSummaryOutputs {
        &self.outputs
    }
}

//! # Reactive View-Models
//!
//! One view-model per screen, all built on the same contract:
//!
//! - An `Inputs` struct with one method per UI/lifecycle event. Each
//!   method records its value into a latest-wins [`Slot`] and returns;
//!   recording is pure event capture, it never fails and triggers no
//!   side effect of its own.
//! - An `Outputs` struct of named [`Signal`] fields, one per UI-visible
//!   derived value or one-shot effect. Pure outputs are deterministic
//!   functions of the upstream snapshot at each firing; async-backed
//!   outputs emit at most once per triggering input and demote service
//!   failures to silence. The only sanctioned shared-state writes are
//!   `on_value` side effects documented on the owning output.
//! - A constructor taking `&Arc<AppEnvironment>` that builds the whole
//!   composition graph once. A view-model lives exactly as long as its
//!   screen; dropping it tears the graph down.
//!
//! [`Slot`]: fundry_core::signal::Slot
//! [`Signal`]: fundry_core::signal::Signal

pub mod discovery;
pub mod pledge_summary;
pub mod project_updates;
pub mod thanks;

/// The inputs/outputs contract every screen view-model follows.
pub trait ViewModel {
    type Inputs;
    type Outputs;

    fn inputs(&self) -> &Self::Inputs;
    fn outputs(&self) -> &Self::Outputs;
}

pub use discovery::DiscoveryViewModel;
pub use pledge_summary::PledgeSummaryViewModel;
pub use project_updates::ProjectUpdatesViewModel;
pub use thanks::ThanksViewModel;

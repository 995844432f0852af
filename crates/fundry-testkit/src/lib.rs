//! # Fundry Testkit
//!
//! Deterministic test infrastructure: everything a view-model test needs
//! to run a whole composition without a runtime, a network, or a clock.
//!
//! - [`TestObserver`]: collects a signal's emissions for assertions.
//! - [`TestTasks`]: a queueing task spawner; nothing runs until
//!   [`TestTasks::advance`], which drains background and UI work in
//!   submission order. This is how tests express "let in-flight requests
//!   land".
//! - [`MockApiService`]: scripted responses per endpoint, with a call
//!   log.
//! - [`MemoryAnalytics`]: records tracked events for assertions.
//! - [`fixtures`]: template models and a ready-made test environment.

mod analytics;
mod api;
pub mod fixtures;
mod observer;
mod prefs;
mod tasks;

pub use analytics::MemoryAnalytics;
pub use api::{ApiCall, MockApiService};
pub use fixtures::{TestContext, TestEnvironmentBuilder};
pub use observer::TestObserver;
pub use prefs::TestPreferences;
pub use tasks::TestTasks;

//! # Fundry Effects
//!
//! Production implementations of the effect traits defined in
//! `fundry-core::effects`. Everything here is a plain handler: no signal
//! machinery, no view-model knowledge.
//!
//! - [`api`]: an in-memory catalog-backed [`ApiService`](fundry_core::ApiService)
//!   (the real HTTP transport is out of scope for this layer and plugs in
//!   behind the same trait).
//! - [`analytics`]: a `tracing`-backed analytics sink.
//! - [`prefs`]: an in-memory preference store.
//! - [`task`]: a tokio-backed spawner with a designated UI run loop.
//! - [`logging`]: subscriber bootstrap for binaries and integration runs.

pub mod analytics;
pub mod api;
pub mod logging;
pub mod prefs;
pub mod task;

pub use analytics::TracingAnalytics;
pub use api::{Catalog, InMemoryApiService};
pub use prefs::MemoryPreferences;
pub use task::{TokioTasks, UiRunLoop};

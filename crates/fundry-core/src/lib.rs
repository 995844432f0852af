//! # Fundry Core
//!
//! Foundation layer for the Fundry application core. This crate is pure:
//! it has no dependency on any runtime, transport, or UI toolkit.
//!
//! ## What lives here
//!
//! - [`signal`]: the push-based reactive primitives every view-model is
//!   built from (signals, combinators, latest-wins input slots, and the
//!   switch-to-latest async bridge).
//! - [`models`]: plain serde-derived domain data (projects, users,
//!   categories, discovery parameters).
//! - [`effects`]: effect trait definitions (API service, analytics,
//!   preferences, task spawning). Implementations live in
//!   `fundry-effects`; deterministic test doubles live in
//!   `fundry-testkit`.

pub mod effects;
pub mod models;
pub mod signal;

pub use effects::api::{ApiError, ApiService, ResultDemote};
pub use signal::{Signal, Sink, Slot};

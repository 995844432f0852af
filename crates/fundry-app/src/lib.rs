//! # Fundry App
//!
//! The headless application core: everything a frontend needs except the
//! rendering. Screens construct a view-model, record UI/lifecycle events
//! into its inputs, and bind its output signals; the view-model owns the
//! whole composition and touches no UI framework.
//!
//! ## Surface
//!
//! - [`AppEnvironment`]: the one explicitly-passed shared context (API,
//!   analytics, preferences, tasks, notifications, current user, config,
//!   feature flags). There is no hidden global.
//! - [`notifications`]: process-wide named notifications decoupling
//!   environment mutation from dependent screens.
//! - [`viewmodels`]: one reactive view-model per screen.
//! - [`format`], [`navigation`]: pure helpers the view-models share.

pub mod config;
pub mod environment;
pub mod format;
pub mod navigation;
pub mod notifications;
pub mod viewmodels;

pub use config::{AppConfig, ConfigError};
pub use environment::{AppEnvironment, Services};
pub use notifications::{Notification, NotificationCenter, NotificationName, NotificationPayload};

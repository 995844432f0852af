//! Preference store effect.
//!
//! A synchronous key/flag store for one-shot UI state: prompts that must
//! only ever be shown once, dialog eligibility, and similar per-device
//! bits. Durable storage is the implementation's concern; the contract
//! here is only read-your-writes within a process.

/// Well-known flag keys.
pub mod keys {
    /// The games-newsletter opt-in prompt has been shown.
    pub const HAS_SEEN_GAMES_NEWSLETTER_PROMPT: &str = "has_seen_games_newsletter_prompt";
    /// The app-rating prompt has been shown.
    pub const HAS_SEEN_APP_RATING: &str = "has_seen_app_rating";
    /// The pledge push-notification prompt has been shown.
    pub const HAS_SEEN_PLEDGE_PUSH_PROMPT: &str = "has_seen_pledge_push_prompt";
}

/// Synchronous boolean preference store.
pub trait PreferenceEffects: Send + Sync {
    /// Read a flag; unset flags are `false`.
    fn bool_flag(&self, key: &str) -> bool;

    /// Set a flag.
    fn set_bool_flag(&self, key: &str, value: bool);
}

//! Application configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Static client configuration: locale rules, store links, feature flag
/// defaults. Loaded once at startup (TOML) and carried read-only by the
/// environment; anything that changes at runtime belongs in
/// [`AppEnvironment`](crate::AppEnvironment) state instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// ISO 3166-1 alpha-2 country the client is operating in.
    pub country_code: String,
    /// Show `$` instead of `US$` for USD amounts.
    pub omit_us_currency_code: bool,
    /// App-store page to send rating prompts to; `None` disables the
    /// rating alert entirely.
    pub rating_link: Option<String>,
    /// Display title of the games newsletter opt-in.
    pub games_newsletter_title: String,
    /// Feature flag defaults, seeded into the environment at startup.
    pub features: HashMap<String, bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            country_code: "US".to_string(),
            omit_us_currency_code: true,
            rating_link: Some("https://apps.example.com/fundry".to_string()),
            games_newsletter_title: "Games Newsletter".to_string(),
            features: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Parse a TOML document. Missing keys fall back to defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

/// Feature flag names.
pub mod features {
    /// Projects accept pledges after the campaign ends.
    pub const POST_CAMPAIGN_PLEDGE: &str = "post_campaign_pledge";
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

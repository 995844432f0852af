//! Analytics sink effect.

use serde_json::Value;

/// Fire-and-forget event sink.
///
/// Tracking must never block or fail composition: implementations queue
/// or log and return immediately. Properties are a JSON object so each
/// screen can attach whatever context it has without a shared schema.
pub trait AnalyticsEffects: Send + Sync {
    /// Record `event` with its properties.
    fn track(&self, event: &str, properties: Value);
}

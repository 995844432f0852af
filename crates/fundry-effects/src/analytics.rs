//! Tracing-backed analytics sink.

use fundry_core::effects::analytics::AnalyticsEffects;
use serde_json::Value;

/// Emits analytics events as structured `tracing` events under the
/// `fundry::analytics` target. A real pipeline (segment-style batching
/// uploader) would implement the same trait; this sink is what binaries
/// and long-running simulators use.
#[derive(Debug, Default, Clone)]
pub struct TracingAnalytics;

impl AnalyticsEffects for TracingAnalytics {
    fn track(&self, event: &str, properties: Value) {
        tracing::info!(target: "fundry::analytics", %event, %properties, "track");
    }
}

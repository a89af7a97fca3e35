use crate::GatewayDecision;

use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// Metrics collector for gateway decisions
#[derive(Clone)]
pub struct GatewayMetrics {
    prefix: &'static str,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self {
            prefix: "hd_gateway",
        }
    }

    /// Record one decision and how long the pipeline took to reach it
    pub fn decision(&self, decision: &GatewayDecision, latency: Duration) {
        let verdict = if decision.allowed { "allowed" } else { "denied" };
        counter!(format!("{}.decisions.total", self.prefix)).increment(1);
        counter!(format!("{}.decisions.{}", self.prefix, verdict)).increment(1);
        counter!(format!(
            "{}.decisions.reason.{}",
            self.prefix,
            decision.reason.metric_label()
        ))
        .increment(1);
        histogram!(format!("{}.decisions.latency_ms", self.prefix))
            .record(latency.as_secs_f64() * 1000.0);
    }

    /// Record a tenant resolution served from cache or loaded from the directory
    pub fn tenant_resolved(&self, loaded: bool) {
        let source = if loaded { "miss" } else { "hit" };
        counter!(format!("{}.tenant_cache.{}", self.prefix, source)).increment(1);
    }

    /// Record a periodic sweep of the bucket store
    pub fn buckets_swept(&self, removed: usize, remaining: usize) {
        counter!(format!("{}.rate_limit.buckets_swept", self.prefix)).increment(removed as u64);
        gauge!(format!("{}.rate_limit.buckets_active", self.prefix)).set(remaining as f64);
    }
}

impl Default for GatewayMetrics {
    fn default() -> Self {
        Self::new()
    }
}

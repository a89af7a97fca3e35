use crate::{GatewayMetrics, RateLimitConfig, RateLimitOutcome, RateLimitStore};

use hd_auth::Principal;
use hd_core::Clock;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;

/// Rate-limit identity: the principal when authenticated, else the caller address
pub fn identity_key(principal: Option<&Principal>, caller_addr: Option<&str>) -> String {
    match (principal, caller_addr) {
        (Some(principal), _) => format!("principal:{}:{}", principal.tenant_id, principal.id),
        (None, Some(addr)) if !addr.trim().is_empty() => format!("addr:{}", addr.trim()),
        (None, _) => "addr:unknown".to_string(),
    }
}

/// Fixed-window request throttle over an injected bucket store
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn bucket_key(identity: &str, route_id: &str) -> String {
        format!("{identity}|{route_id}")
    }

    /// Count one request for `identity` on `route_id` and decide
    pub fn check(
        &self,
        identity: &str,
        route_id: &str,
        config: &RateLimitConfig,
    ) -> RateLimitOutcome {
        let key = Self::bucket_key(identity, route_id);
        let outcome = self.store.hit(&key, config, self.clock.now_ms());

        if let RateLimitOutcome::Limited { retry_after_ms } = outcome {
            debug!(
                "Rate limit exceeded for {key}: {} per {}ms, retry in {retry_after_ms}ms",
                config.max_attempts(),
                config.window_ms()
            );
        }

        outcome
    }

    /// Drop buckets whose window has elapsed
    pub fn sweep_expired(&self) -> usize {
        self.store.sweep(self.clock.now_ms())
    }

    /// Reset every bucket
    pub fn clear(&self) {
        self.store.clear();
    }

    pub fn store(&self) -> &Arc<dyn RateLimitStore> {
        &self.store
    }

    /// Sweep expired buckets every `interval` until the task is aborted
    pub fn spawn_sweeper(
        limiter: Arc<RateLimiter>,
        interval: Duration,
        metrics: GatewayMetrics,
    ) -> JoinHandle<()> {
        info!("Rate-limit sweeper started (every {}s)", interval.as_secs());
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let removed = limiter.sweep_expired();
                if removed > 0 {
                    debug!(
                        "Swept {removed} expired rate-limit buckets ({} remaining)",
                        limiter.store.len()
                    );
                }
                metrics.buckets_swept(removed, limiter.store.len());
            }
        })
    }
}

use crate::RateLimitConfig;

use dashmap::DashMap;

/// One fixed counting window for an (identity, route) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitBucket {
    pub window_start_ms: u64,
    pub window_ms: u64,
    pub count: u32,
}

impl RateLimitBucket {
    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.window_start_ms) >= self.window_ms
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitOutcome {
    Allowed { remaining: u32 },
    Limited { retry_after_ms: u64 },
}

impl RateLimitOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Storage for rate-limit buckets.
///
/// `hit` is a single atomic read-modify-write per key: reset if the window
/// elapsed, increment, compare.
pub trait RateLimitStore: Send + Sync {
    fn hit(&self, key: &str, config: &RateLimitConfig, now_ms: u64) -> RateLimitOutcome;

    /// Remove buckets whose window has elapsed, returning how many were dropped
    fn sweep(&self, now_ms: u64) -> usize;

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded in-process bucket store
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    buckets: DashMap<String, RateLimitBucket>,
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket(&self, key: &str) -> Option<RateLimitBucket> {
        self.buckets.get(key).map(|bucket| *bucket)
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn hit(&self, key: &str, config: &RateLimitConfig, now_ms: u64) -> RateLimitOutcome {
        // The entry guard holds the shard lock until it is dropped.
        let mut bucket = self
            .buckets
            .entry(key.to_string())
            .or_insert(RateLimitBucket {
                window_start_ms: now_ms,
                window_ms: config.window_ms(),
                count: 0,
            });

        bucket.window_ms = config.window_ms();
        if bucket.is_expired(now_ms) {
            bucket.window_start_ms = now_ms;
            bucket.count = 0;
        }
        bucket.count = bucket.count.saturating_add(1);

        if bucket.count <= config.max_attempts() {
            RateLimitOutcome::Allowed {
                remaining: config.max_attempts() - bucket.count,
            }
        } else {
            let window_end = bucket.window_start_ms.saturating_add(bucket.window_ms);
            RateLimitOutcome::Limited {
                retry_after_ms: window_end.saturating_sub(now_ms).max(1),
            }
        }
    }

    fn sweep(&self, now_ms: u64) -> usize {
        let mut removed = 0;
        self.buckets.retain(|_, bucket| {
            let expired = bucket.is_expired(now_ms);
            if expired {
                removed += 1;
            }
            !expired
        });
        removed
    }

    fn clear(&self) {
        self.buckets.clear();
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }
}

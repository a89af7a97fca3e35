use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_RATE_LIMIT_ATTEMPTS, DEFAULT_RATE_LIMIT_WINDOW_MS,
    DEFAULT_SWEEP_INTERVAL_SECS, MAX_RATE_LIMIT_ATTEMPTS, MAX_RATE_LIMIT_WINDOW_MS,
    MAX_SWEEP_INTERVAL_SECS, MIN_RATE_LIMIT_ATTEMPTS, MIN_RATE_LIMIT_WINDOW_MS,
    MIN_SWEEP_INTERVAL_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Default fixed-window limit for routes without their own override.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_attempts: u32,
    /// Window duration in milliseconds
    pub window_ms: u64,
    /// How often expired buckets are swept
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_RATE_LIMIT_ATTEMPTS,
            window_ms: DEFAULT_RATE_LIMIT_WINDOW_MS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl RateLimitConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        validate_limit("rate_limit", self.max_attempts, self.window_ms)?;

        if !(MIN_SWEEP_INTERVAL_SECS..=MAX_SWEEP_INTERVAL_SECS).contains(&self.sweep_interval_secs)
        {
            return Err(ConfigError::rate_limit(format!(
                "rate_limit.sweep_interval_secs must be {}-{}, got {}",
                MIN_SWEEP_INTERVAL_SECS, MAX_SWEEP_INTERVAL_SECS, self.sweep_interval_secs
            )));
        }

        Ok(())
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

/// Shared range check for the default limit and per-route overrides
pub(crate) fn validate_limit(
    scope: &str,
    max_attempts: u32,
    window_ms: u64,
) -> ConfigErrorResult<()> {
    if !(MIN_RATE_LIMIT_ATTEMPTS..=MAX_RATE_LIMIT_ATTEMPTS).contains(&max_attempts) {
        return Err(ConfigError::rate_limit(format!(
            "{scope}.max_attempts must be {}-{}, got {}",
            MIN_RATE_LIMIT_ATTEMPTS, MAX_RATE_LIMIT_ATTEMPTS, max_attempts
        )));
    }

    if !(MIN_RATE_LIMIT_WINDOW_MS..=MAX_RATE_LIMIT_WINDOW_MS).contains(&window_ms) {
        return Err(ConfigError::rate_limit(format!(
            "{scope}.window_ms must be {}-{}, got {}",
            MIN_RATE_LIMIT_WINDOW_MS, MAX_RATE_LIMIT_WINDOW_MS, window_ms
        )));
    }

    Ok(())
}

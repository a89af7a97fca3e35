use crate::{GatewayError, Result as GatewayErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;
pub const DEFAULT_WINDOW_MS: u64 = 15 * 60 * 1000;

/// Fixed-window limit: at most `max_attempts` requests per `window_ms`.
///
/// Both values are non-zero; construct through `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    max_attempts: u32,
    window_ms: u64,
}

impl RateLimitConfig {
    #[track_caller]
    pub fn new(max_attempts: u32, window_ms: u64) -> GatewayErrorResult<Self> {
        if max_attempts == 0 {
            return Err(GatewayError::InvalidRateLimit {
                message: "max_attempts must be greater than 0".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if window_ms == 0 {
            return Err(GatewayError::InvalidRateLimit {
                message: "window_ms must be greater than 0".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            max_attempts,
            window_ms,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window_ms: DEFAULT_WINDOW_MS,
        }
    }
}

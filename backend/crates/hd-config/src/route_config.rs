use crate::rate_limit_config::validate_limit;
use crate::{ConfigError, ConfigErrorResult};

use hd_core::CompositionMode;

use serde::Deserialize;

const HTTP_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];


#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RouteRateLimit {
    pub max_attempts: u32,
    pub window_ms: u64,
}

/// One `[[routes]]` entry: the declared access requirements of a route
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// `"<METHOD> <path>"`, with the path as the router matches it, e.g. `"GET /api/tickets/{id}"`
    pub id: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub mode: CompositionMode,
    #[serde(default)]
    pub rate_limit: Option<RouteRateLimit>,
    #[serde(default)]
    pub skip_rate_limit: bool,
}

impl RouteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let Some((method, path)) = self.id.split_once(' ') else {
            return Err(ConfigError::route(format!(
                "route id '{}' must be '<METHOD> <path>'",
                self.id
            )));
        };

        if !HTTP_METHODS.contains(&method) {
            return Err(ConfigError::route(format!(
                "route id '{}' has unknown method '{}'",
                self.id, method
            )));
        }

        if !path.starts_with('/') {
            return Err(ConfigError::route(format!(
                "route id '{}' path must start with '/'",
                self.id
            )));
        }

        if self.permissions.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::route(format!(
                "route '{}' lists an empty permission",
                self.id
            )));
        }

        if self.public && !self.permissions.is_empty() {
            return Err(ConfigError::route(format!(
                "route '{}' is public and cannot require permissions",
                self.id
            )));
        }

        if let Some(limit) = &self.rate_limit {
            validate_limit(
                &format!("routes[{}].rate_limit", self.id),
                limit.max_attempts,
                limit.window_ms,
            )?;
        }

        Ok(())
    }
}

use crate::{GatewayError, RateLimitConfig, Result as GatewayErrorResult, RouteRequirement};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::debug;

/// Route id → declared access requirements.
///
/// Filled during startup, then shared read-only (`Arc<RouteMetadataRegistry>`)
/// by every request. Lookups for unknown routes return a requirement that
/// denies every caller.
pub struct RouteMetadataRegistry {
    routes: HashMap<String, Arc<RouteRequirement>>,
    fallback: Arc<RouteRequirement>,
    default_rate_limit: RateLimitConfig,
}

impl RouteMetadataRegistry {
    pub fn new(default_rate_limit: RateLimitConfig) -> Self {
        Self {
            routes: HashMap::new(),
            fallback: Arc::new(RouteRequirement::unregistered()),
            default_rate_limit,
        }
    }

    #[track_caller]
    pub fn register(
        &mut self,
        route_id: impl Into<String>,
        requirement: RouteRequirement,
    ) -> GatewayErrorResult<()> {
        let route_id = route_id.into();

        if route_id.trim().is_empty() {
            return Err(GatewayError::InvalidRoute {
                route_id,
                message: "route id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.routes.contains_key(&route_id) {
            return Err(GatewayError::DuplicateRoute {
                route_id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(
            "Registered route {route_id}: public={} mode={} permissions={:?}",
            requirement.is_public(),
            requirement.composition_mode(),
            requirement.required_permissions()
        );
        self.routes.insert(route_id, Arc::new(requirement));
        Ok(())
    }

    /// Requirement for `route_id`, or the deny-all fallback
    pub fn lookup(&self, route_id: &str) -> Arc<RouteRequirement> {
        self.routes
            .get(route_id)
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fallback))
    }

    pub fn is_registered(&self, route_id: &str) -> bool {
        self.routes.contains_key(route_id)
    }

    pub fn default_rate_limit(&self) -> &RateLimitConfig {
        &self.default_rate_limit
    }

    /// The limit that applies to `requirement`; `None` when it skips limiting
    pub fn effective_rate_limit(&self, requirement: &RouteRequirement) -> Option<RateLimitConfig> {
        if requirement.skip_rate_limit() {
            return None;
        }
        Some(
            requirement
                .rate_limit()
                .copied()
                .unwrap_or(self.default_rate_limit),
        )
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

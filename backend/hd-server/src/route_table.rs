use crate::error::Result as ServerErrorResult;

use hd_config::{Config, RouteConfig};
use hd_gateway::{RateLimitConfig, RouteMetadataRegistry, RouteRequirement};

use log::info;

pub const HEALTH_ROUTE_ID: &str = "GET /health";
pub const WHOAMI_ROUTE_ID: &str = "GET /api/whoami";

/// Build the route registry from the `[[routes]]` table, then add the
/// built-in routes the table did not declare
pub fn build_registry(config: &Config) -> ServerErrorResult<RouteMetadataRegistry> {
    let default_limit =
        RateLimitConfig::new(config.rate_limit.max_attempts, config.rate_limit.window_ms)?;
    let mut registry = RouteMetadataRegistry::new(default_limit);

    for route in &config.routes {
        registry.register(route.id.clone(), requirement_for(route)?)?;
    }

    if !registry.is_registered(HEALTH_ROUTE_ID) {
        registry.register(
            HEALTH_ROUTE_ID,
            RouteRequirement::public().skipping_rate_limit(),
        )?;
    }
    if !registry.is_registered(WHOAMI_ROUTE_ID) {
        registry.register(WHOAMI_ROUTE_ID, RouteRequirement::authenticated())?;
    }

    info!("Route registry built: {} routes", registry.len());
    Ok(registry)
}

pub fn requirement_for(route: &RouteConfig) -> ServerErrorResult<RouteRequirement> {
    let mut requirement = if route.public {
        RouteRequirement::public()
    } else {
        RouteRequirement::with_permissions(route.mode, route.permissions.iter())
    };

    if let Some(limit) = route.rate_limit {
        requirement =
            requirement.with_rate_limit(RateLimitConfig::new(limit.max_attempts, limit.window_ms)?);
    }
    if route.skip_rate_limit {
        requirement = requirement.skipping_rate_limit();
    }

    Ok(requirement)
}

use crate::route_table::{HEALTH_ROUTE_ID, WHOAMI_ROUTE_ID, build_registry, requirement_for};

use hd_config::{Config, RouteConfig, RouteRateLimit};
use hd_gateway::CompositionMode;

use googletest::prelude::*;

fn route(id: &str) -> RouteConfig {
    RouteConfig {
        id: id.to_string(),
        public: false,
        permissions: Vec::new(),
        mode: CompositionMode::All,
        rate_limit: None,
        skip_rate_limit: false,
    }
}

#[test]
fn given_empty_route_table_when_registry_built_then_builtins_registered() {
    // Given
    let config = Config::default();

    // When
    let registry = build_registry(&config).unwrap();

    // Then
    assert_that!(registry.len(), eq(2));
    let health = registry.lookup(HEALTH_ROUTE_ID);
    assert_that!(health.is_public(), is_true());
    assert_that!(health.skip_rate_limit(), is_true());
    let whoami = registry.lookup(WHOAMI_ROUTE_ID);
    assert_that!(whoami.is_public(), is_false());
    assert_that!(whoami.required_permissions().is_empty(), is_true());
}

#[test]
fn given_configured_health_route_when_registry_built_then_config_wins() {
    let mut config = Config::default();
    let mut health = route(HEALTH_ROUTE_ID);
    health.public = true;
    health.rate_limit = Some(RouteRateLimit {
        max_attempts: 5,
        window_ms: 1000,
    });
    config.routes.push(health);

    let registry = build_registry(&config).unwrap();

    let requirement = registry.lookup(HEALTH_ROUTE_ID);
    assert_that!(requirement.skip_rate_limit(), is_false());
    assert_that!(
        requirement.rate_limit().map(|limit| limit.max_attempts()),
        some(eq(5))
    );
}

#[test]
fn given_any_mode_route_when_converted_then_requirement_matches() {
    let mut tickets = route("GET /api/tickets");
    tickets.permissions = vec!["ticket.read".to_string(), "ticket.read.own".to_string()];
    tickets.mode = CompositionMode::Any;

    let requirement = requirement_for(&tickets).unwrap();

    assert_that!(requirement.composition_mode(), eq(CompositionMode::Any));
    assert_that!(requirement.required_permissions().len(), eq(2));
    assert_that!(requirement.is_public(), is_false());
}

#[test]
fn given_duplicate_routes_when_registry_built_then_error() {
    let mut config = Config::default();
    config.routes.push(route("GET /api/tickets"));
    config.routes.push(route("GET /api/tickets"));

    assert!(build_registry(&config).is_err());
}

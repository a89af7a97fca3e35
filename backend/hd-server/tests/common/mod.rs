#![allow(dead_code)]

//! Test infrastructure for hd-server HTTP tests

use hd_auth::{Claims, CredentialValidator, JwtValidator};
use hd_config::{Config, RouteConfig, RouteRateLimit, ServerConfig};
use hd_core::{CompositionMode, SystemClock, Tenant};
use hd_gateway::{GatewayPipeline, InMemoryRateLimitStore, RateLimiter};
use hd_server::{AppState, build_router, cors, route_table};
use hd_tenant::{InMemoryTenantDirectory, TenantCacheConfig, TenantResolver};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub const TEST_SECRET: &str = "server-test-secret-at-least-32-bytes!";

/// Router over an in-memory directory holding `acme` and `globex`
pub fn create_test_app(routes: Vec<RouteConfig>) -> Router {
    create_test_app_with(routes, ServerConfig::default())
}

/// Same as `create_test_app`, with proxy trust and CORS taken from `server`
pub fn create_test_app_with(routes: Vec<RouteConfig>, server: ServerConfig) -> Router {
    let config = Config {
        server,
        routes,
        ..Config::default()
    };
    let registry = route_table::build_registry(&config).expect("route table");

    let directory = Arc::new(InMemoryTenantDirectory::with_tenants([
        Tenant::new("tenant-acme", "acme"),
        Tenant::new("tenant-globex", "globex"),
    ]));
    let tenants = TenantResolver::new(directory, TenantCacheConfig::default());
    let credentials = CredentialValidator::new(
        Arc::new(JwtValidator::with_hs256(TEST_SECRET.as_bytes())),
        Arc::new(SystemClock),
    );
    let rate_limiter = Arc::new(RateLimiter::new(
        Arc::new(InMemoryRateLimitStore::new()),
        Arc::new(SystemClock),
    ));

    let pipeline = GatewayPipeline::new(
        Arc::new(registry),
        Arc::new(tenants),
        Arc::new(credentials),
        rate_limiter,
    );

    let state = AppState::new(Arc::new(pipeline))
        .with_trusted_proxies(config.server.trusted_proxy_addrs().expect("trusted proxies"))
        .with_cors(cors::cors_layer(&config.server).expect("cors"));

    build_router(state)
}

pub fn route(id: &str, mode: CompositionMode, permissions: &[&str]) -> RouteConfig {
    RouteConfig {
        id: id.to_string(),
        public: false,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
        mode,
        rate_limit: None,
        skip_rate_limit: false,
    }
}

pub fn public_route(id: &str) -> RouteConfig {
    RouteConfig {
        public: true,
        ..route(id, CompositionMode::All, &[])
    }
}

pub fn limited(mut route: RouteConfig, max_attempts: u32, window_ms: u64) -> RouteConfig {
    route.rate_limit = Some(RouteRateLimit {
        max_attempts,
        window_ms,
    });
    route
}

pub fn create_token(tenant_id: &str, permissions: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "agent-42".to_string(),
        tenant_id: tenant_id.to_string(),
        exp: now + 3600,
        iat: now,
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token")
}

pub fn get(uri: &str, slug: Option<&str>, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(slug) = slug {
        builder = builder.header("x-tenant-slug", slug);
    }
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("Failed to build request")
}

/// Request arriving on a socket from `peer`, optionally carrying `X-Forwarded-For`
pub fn from_peer(uri: &str, slug: &str, peer: &str, forwarded_for: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-tenant-slug", slug);
    if let Some(forwarded_for) = forwarded_for {
        builder = builder.header("x-forwarded-for", forwarded_for);
    }
    let mut request = builder.body(Body::empty()).expect("Failed to build request");
    let peer: SocketAddr = peer.parse().expect("peer address");
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    serde_json::from_slice(&body).expect("Body is not JSON")
}

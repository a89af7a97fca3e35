//! HTTP tests for the gateway middleware
mod common;

use crate::common::{
    create_test_app, create_test_app_with, create_token, from_peer, get, json_body, limited,
    public_route, route,
};

use hd_config::ServerConfig;
use hd_core::CompositionMode;

use axum::{
    body::Body,
    http::{
        Request, StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, RETRY_AFTER},
    },
};
use http_body_util::BodyExt;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_is_public_but_needs_tenant() {
    let app = create_test_app(Vec::new());

    let response = app
        .clone()
        .oneshot(get("/health", Some("acme"), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "healthy");

    let response = app.oneshot(get("/health", None, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "TENANT_SLUG_MISSING");
}

#[tokio::test]
async fn test_unknown_tenant_returns_404() {
    let app = create_test_app(Vec::new());
    let token = create_token("tenant-acme", &[]);

    let response = app
        .oneshot(get("/api/whoami", Some("initech"), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "TENANT_NOT_FOUND");
}

#[tokio::test]
async fn test_whoami_returns_admitted_tenant_and_principal() {
    let app = create_test_app(Vec::new());
    let token = create_token("tenant-acme", &["ticket.write", "ticket.read"]);

    let request = Request::builder()
        .method("GET")
        .uri("/api/whoami")
        .header("cookie", "tenantSlug=ACME")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["tenant_id"], "tenant-acme");
    assert_eq!(json["tenant_slug"], "acme");
    assert_eq!(json["principal_id"], "agent-42");
    assert_eq!(
        json["permissions"],
        serde_json::json!(["ticket.read", "ticket.write"])
    );
}

#[tokio::test]
async fn test_missing_credential_returns_401() {
    let app = create_test_app(Vec::new());

    let response = app
        .oneshot(get("/api/whoami", Some("acme"), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "CREDENTIAL_MISSING");
}

#[tokio::test]
async fn test_credential_from_other_tenant_returns_tenant_mismatch() {
    let app = create_test_app(Vec::new());
    let token = create_token("tenant-globex", &["ticket.read", "admin"]);

    let response = app
        .oneshot(get("/api/whoami", Some("acme"), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "TENANT_MISMATCH");
}

#[tokio::test]
async fn test_any_mode_route_allows_reader_and_forbids_empty_permissions() {
    let app = create_test_app(vec![route(
        "GET /api/whoami",
        CompositionMode::Any,
        &["ticket.read", "ticket.read.own"],
    )]);

    let reader = create_token("tenant-acme", &["ticket.read"]);
    let response = app
        .clone()
        .oneshot(get("/api/whoami", Some("acme"), Some(&reader)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let nobody = create_token("tenant-acme", &[]);
    let response = app
        .oneshot(get("/api/whoami", Some("acme"), Some(&nobody)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("PERMISSION_DENIED"));
    assert!(!text.contains("ticket.read"));
}

#[tokio::test]
async fn test_rate_limited_route_returns_429_with_retry_after() {
    let app = create_test_app(vec![limited(
        route("GET /api/whoami", CompositionMode::Any, &["ticket.read"]),
        2,
        60_000,
    )]);
    let token = create_token("tenant-acme", &["ticket.read"]);

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(get("/api/whoami", Some("acme"), Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get("/api/whoami", Some("acme"), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry_after: u64 = response
        .headers()
        .get(RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_unregistered_path_is_denied_by_default() {
    let app = create_test_app(Vec::new());
    let token = create_token("tenant-acme", &["ticket.read", "admin"]);

    let response = app
        .oneshot(get("/api/tenants", Some("acme"), Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_metrics_endpoint_is_not_gated() {
    let app = create_test_app(Vec::new());

    let response = app.oneshot(get("/metrics", None, None)).await.unwrap();

    // No recorder in tests: the handler answers, not the gateway
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("metrics recorder not installed"));
}

#[tokio::test]
async fn test_spoofed_forwarded_for_from_untrusted_peer_shares_peer_bucket() {
    let app = create_test_app(vec![limited(public_route("GET /health"), 1, 60_000)]);

    let mut statuses = Vec::new();
    for i in 1..=5 {
        let spoofed = format!("203.0.113.{i}");
        let response = app
            .clone()
            .oneshot(from_peer("/health", "acme", "198.51.100.9:40000", Some(&spoofed)))
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(statuses[0], StatusCode::OK);
    assert!(
        statuses[1..]
            .iter()
            .all(|status| *status == StatusCode::TOO_MANY_REQUESTS)
    );
}

#[tokio::test]
async fn test_forwarded_for_from_trusted_proxy_separates_clients() {
    let server = ServerConfig {
        trusted_proxies: vec!["10.0.0.1".to_string()],
        ..ServerConfig::default()
    };
    let app = create_test_app_with(vec![limited(public_route("GET /health"), 1, 60_000)], server);

    let first = app
        .clone()
        .oneshot(from_peer("/health", "acme", "10.0.0.1:8443", Some("203.0.113.1")))
        .await
        .unwrap();
    let second = app
        .clone()
        .oneshot(from_peer("/health", "acme", "10.0.0.1:8443", Some("203.0.113.2")))
        .await
        .unwrap();
    let repeat = app
        .oneshot(from_peer("/health", "acme", "10.0.0.1:8443", Some("203.0.113.1")))
        .await
        .unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_cors_headers_only_for_configured_origins() {
    let server = ServerConfig {
        cors_allowed_origins: vec!["https://support.example.com".to_string()],
        ..ServerConfig::default()
    };
    let app = create_test_app_with(Vec::new(), server);

    let allowed = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-tenant-slug", "acme")
        .header(ORIGIN, "https://support.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("https://support.example.com")
    );

    let foreign = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-tenant-slug", "acme")
        .header(ORIGIN, "https://evil.example.net")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(foreign).await.unwrap();
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_cors_disabled_by_default() {
    let app = create_test_app(Vec::new());

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-tenant-slug", "acme")
        .header(ORIGIN, "https://support.example.com")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

use crate::AppState;

use hd_tenant::TenantDirectory;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - public, never rate limited
pub async fn health_check<D: TenantDirectory>(State(state): State<AppState<D>>) -> Response {
    let pipeline = &state.pipeline;
    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "tenant_cache_entries": pipeline.tenants().entry_count(),
            "rate_limit_buckets": pipeline.rate_limiter().store().len(),
            "routes": pipeline.routes().len(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /metrics - Prometheus exposition, served outside the gateway
pub async fn metrics<D: TenantDirectory>(State(state): State<AppState<D>>) -> Response {
    match state.metrics_handle {
        Some(ref handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed").into_response(),
    }
}

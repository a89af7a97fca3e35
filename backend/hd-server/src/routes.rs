use crate::{AppState, gateway, health, whoami};

use hd_tenant::TenantDirectory;

use axum::{Router, http::StatusCode, middleware, routing::get};

/// Build the application router.
///
/// Every route added before the gateway layer, and the fallback, passes
/// through the gateway. `/metrics` is added after it and is not gated.
pub fn build_router<D: TenantDirectory>(state: AppState<D>) -> Router {
    let cors = state.cors.clone();
    let router = Router::new()
        .route("/health", get(health::health_check::<D>))
        .route("/api/whoami", get(whoami::whoami::<D>))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gateway::authorize::<D>,
        ))
        .route("/metrics", get(health::metrics::<D>))
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

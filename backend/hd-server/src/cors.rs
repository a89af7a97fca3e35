use crate::error::Result as ServerErrorResult;

use hd_config::{ConfigError, ServerConfig};
use hd_gateway::TENANT_SLUG_HEADER;

use axum::http::{
    HeaderName, HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS policy from `[server] cors_allowed_origins`, `None` when the list is empty
pub fn cors_layer(server: &ServerConfig) -> ServerErrorResult<Option<CorsLayer>> {
    if server.cors_allowed_origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if server.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = server
            .cors_allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim()).map_err(|_| {
                    ConfigError::config(format!("invalid CORS origin '{origin}'"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    let layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static(TENANT_SLUG_HEADER),
        ])
        .expose_headers([RETRY_AFTER]);

    Ok(Some(layer))
}

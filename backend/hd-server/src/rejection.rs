//! HTTP rendering of gateway denials
//!
//! Bodies carry a machine-readable code and a client-safe message only.
//! Permission names, tenant ids and principal ids stay in the logs.

use hd_gateway::GatewayDecision;

use axum::{
    Json,
    http::{HeaderValue, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// JSON error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct RejectionResponse {
    pub error: RejectionBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RejectionBody {
    /// Machine-readable error code (e.g., "TENANT_MISMATCH")
    pub code: String,
    pub message: String,
}

/// A denied `GatewayDecision` on its way back to the client
#[derive(Debug)]
pub struct GatewayRejection(pub GatewayDecision);

impl IntoResponse for GatewayRejection {
    fn into_response(self) -> Response {
        let reason = self.0.reason;
        let body = RejectionResponse {
            error: RejectionBody {
                code: reason.error_code().to_string(),
                message: reason.public_message().to_string(),
            },
        };

        let mut response = (reason.status_code(), Json(body)).into_response();
        if let Some(secs) = self.0.retry_after_secs() {
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

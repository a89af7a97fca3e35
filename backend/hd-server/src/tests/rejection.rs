use crate::{GatewayRejection, RejectionResponse};

use hd_gateway::{DecisionReason, GatewayDecision};

use axum::http::StatusCode;
use axum::http::header::RETRY_AFTER;
use axum::response::IntoResponse;
use googletest::prelude::*;

#[test]
fn given_rate_limited_decision_when_rendered_then_429_with_retry_after_seconds() {
    // Given
    let rejection = GatewayRejection(GatewayDecision::rate_limited(1500));

    // When
    let response = rejection.into_response();

    // Then
    assert_that!(response.status(), eq(StatusCode::TOO_MANY_REQUESTS));
    assert_that!(
        response.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok()),
        some(eq("2"))
    );
}

#[test]
fn given_permission_denied_when_rendered_then_403_without_retry_after() {
    let rejection = GatewayRejection(GatewayDecision::deny(DecisionReason::PermissionDenied));

    let response = rejection.into_response();

    assert_that!(response.status(), eq(StatusCode::FORBIDDEN));
    assert!(response.headers().get(RETRY_AFTER).is_none());
}

#[test]
fn given_rejection_body_when_serialized_then_nested_code_and_message() {
    let body = RejectionResponse {
        error: crate::RejectionBody {
            code: DecisionReason::TenantMismatch.error_code().to_string(),
            message: DecisionReason::TenantMismatch.public_message().to_string(),
        },
    };

    let json = serde_json::to_value(&body).unwrap();

    assert_that!(json["error"]["code"].as_str(), some(eq("TENANT_MISMATCH")));
    assert!(json["error"]["message"].is_string());
}

use crate::tests::{TEST_SECRET, claims_for, create_test_token};
use crate::{AuthError, JwtAlgorithm, JwtValidator, KeyMaterialProvider};

use googletest::prelude::*;

#[tokio::test]
async fn given_valid_token_when_verified_then_returns_claims() {
    // Given
    let validator = JwtValidator::with_hs256(TEST_SECRET);
    let token = create_test_token(&claims_for("tenant-1", &["ticket.read"]), TEST_SECRET);

    // When
    let result = validator.verify(&token).await;

    // Then
    let claims = result.unwrap();
    assert_that!(claims.sub, eq("user-123"));
    assert_that!(claims.tenant_id, eq("tenant-1"));
    assert_eq!(claims.permissions, vec!["ticket.read".to_string()]);
}

#[tokio::test]
async fn given_wrong_secret_when_verified_then_returns_invalid_signature() {
    // Given
    let validator = JwtValidator::with_hs256(b"wrong-secret-key-at-least-32-by");
    let token = create_test_token(&claims_for("tenant-1", &[]), TEST_SECRET);

    // When
    let result = validator.verify(&token).await;

    // Then
    assert!(matches!(result, Err(AuthError::InvalidSignature { .. })));
}

#[tokio::test]
async fn given_expired_token_when_verified_then_signature_still_accepted() {
    // Given: expiry is the credential validator's concern, not the key provider's
    let validator = JwtValidator::with_hs256(TEST_SECRET);
    let mut claims = claims_for("tenant-1", &[]);
    claims.exp = chrono::Utc::now().timestamp() - 3600;
    let token = create_test_token(&claims, TEST_SECRET);

    // When
    let result = validator.verify(&token).await;

    // Then
    assert_that!(result, ok(anything()));
}

#[tokio::test]
async fn given_garbage_token_when_verified_then_returns_decode_error() {
    let validator = JwtValidator::with_hs256(TEST_SECRET);

    let result = validator.verify("not.a.jwt").await;

    assert!(matches!(result, Err(AuthError::JwtDecode { .. })));
}

#[test]
fn given_invalid_rsa_pem_when_constructing_then_returns_invalid_token() {
    let result = JwtValidator::from_algorithm(JwtAlgorithm::RS256 {
        public_key_pem: "not a pem".to_string(),
    });

    assert!(matches!(result, Err(AuthError::InvalidToken { .. })));
}

#[test]
fn given_hs256_algorithm_when_constructing_then_reports_algorithm() {
    let validator = JwtValidator::from_algorithm(JwtAlgorithm::HS256 {
        secret: TEST_SECRET.to_vec(),
    })
    .unwrap();

    assert_that!(validator.algorithm(), eq("HS256"));
}

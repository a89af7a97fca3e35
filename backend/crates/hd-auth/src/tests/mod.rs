mod jwt;

use crate::Claims;

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes";

pub(crate) fn create_test_token(claims: &Claims, secret: &[u8]) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

pub(crate) fn claims_for(tenant_id: &str, permissions: &[&str]) -> Claims {
    Claims {
        sub: "user-123".to_string(),
        tenant_id: tenant_id.to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
        iat: chrono::Utc::now().timestamp(),
        permissions: permissions.iter().map(|p| p.to_string()).collect(),
    }
}

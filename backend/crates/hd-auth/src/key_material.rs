use crate::{Claims, Result as AuthErrorResult};

use async_trait::async_trait;

/// Verifies a credential's signature against trusted key material.
///
/// Implementations return `AuthError::InvalidSignature` for tokens that fail
/// verification and `AuthError::KeyMaterialUnavailable` when the key source
/// itself cannot be reached. Expiry is not checked here.
#[async_trait]
pub trait KeyMaterialProvider: Send + Sync {
    async fn verify(&self, token: &str) -> AuthErrorResult<Claims>;
}

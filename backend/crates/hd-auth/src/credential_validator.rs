use crate::{
    AuthError, DEFAULT_LEEWAY_SECS, KeyMaterialProvider, Principal, Result as AuthErrorResult,
};

use hd_core::{Clock, ErrorLocation, Tenant};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, warn};

const BEARER_PREFIX: &str = "Bearer ";

/// Turns a bearer credential into a `Principal` bound to the resolved tenant.
///
/// Steps, in order:
/// 1. extract the token from the `Authorization` header value
/// 2. decode the header only, rejecting anything that is not a JWT
/// 3. verify the signature through the injected `KeyMaterialProvider`
/// 4. check expiry against the gateway clock
/// 5. require the credential's tenant claim to equal the resolved tenant id
pub struct CredentialValidator {
    provider: Arc<dyn KeyMaterialProvider>,
    clock: Arc<dyn Clock>,
    leeway_secs: i64,
}

impl CredentialValidator {
    pub fn new(provider: Arc<dyn KeyMaterialProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            leeway_secs: DEFAULT_LEEWAY_SECS as i64,
        }
    }

    pub fn with_leeway_secs(mut self, leeway_secs: u64) -> Self {
        self.leeway_secs = leeway_secs as i64;
        self
    }

    /// Extract the token from an `Authorization: Bearer <token>` header value
    #[track_caller]
    pub fn bearer_token(authorization: Option<&str>) -> AuthErrorResult<&str> {
        let value = match authorization.map(str::trim) {
            Some(value) if !value.is_empty() => value,
            _ => {
                return Err(AuthError::MissingHeader {
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let token = value
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?
            .trim();

        if token.is_empty() {
            return Err(AuthError::MissingHeader {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(token)
    }

    pub async fn validate(
        &self,
        authorization: Option<&str>,
        tenant: &Tenant,
    ) -> AuthErrorResult<Principal> {
        let token = Self::bearer_token(authorization)?;

        // Shape check before any key material is touched; claims stay untrusted here.
        jsonwebtoken::decode_header(token).map_err(|e| AuthError::InvalidToken {
            message: format!("Malformed credential: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let claims = self.provider.verify(token).await?;
        claims.validate()?;

        let now = self.clock.now_secs();
        if claims.exp.saturating_add(self.leeway_secs) <= now {
            debug!(
                "Credential for subject {} expired at {} (now {})",
                claims.sub, claims.exp, now
            );
            return Err(AuthError::TokenExpired {
                expired_at: claims.exp,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if claims.tenant_id != tenant.id {
            warn!(
                "Tenant mismatch: subject {} holds a credential for tenant '{}' but requested tenant '{}' ({})",
                claims.sub, claims.tenant_id, tenant.id, tenant.slug
            );
            return Err(AuthError::TenantMismatch {
                credential_tenant: claims.tenant_id,
                resolved_tenant: tenant.id.clone(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Principal::from_claims(claims))
    }
}

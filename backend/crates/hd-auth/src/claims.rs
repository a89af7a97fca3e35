use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

const MAX_TENANT_ID_LENGTH: usize = 128;

/// Bearer credential claims issued by the platform identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal id)
    pub sub: String,
    /// Tenant the credential was issued for
    pub tenant_id: String,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued at timestamp (Unix seconds)
    pub iat: i64,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Claims {
    /// Structural checks, run only after the signature has been verified
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.tenant_id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.tenant_id.len() > MAX_TENANT_ID_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "tenant_id".to_string(),
                message: "tenant_id exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (principal id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }
}

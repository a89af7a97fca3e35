use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Token signature rejected {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Token expired at {expired_at} {location}")]
    TokenExpired {
        expired_at: i64,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential issued for tenant '{credential_tenant}' used against tenant '{resolved_tenant}' {location}")]
    TenantMismatch {
        credential_tenant: String,
        resolved_tenant: String,
        location: ErrorLocation,
    },

    #[error("Key material unavailable: {message} {location}")]
    KeyMaterialUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code, used in logs and metrics labels
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::InvalidToken { .. } => "INVALID_TOKEN",
            Self::JwtDecode { .. } => "JWT_DECODE_FAILED",
            Self::InvalidSignature { .. } => "INVALID_SIGNATURE",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
            Self::KeyMaterialUnavailable { .. } => "KEY_MATERIAL_UNAVAILABLE",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

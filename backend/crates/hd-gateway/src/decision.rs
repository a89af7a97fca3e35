use hd_auth::AuthError;
use hd_tenant::TenantError;

use http::StatusCode;
use serde::Serialize;

/// Why the gateway allowed or denied a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecisionReason {
    Authorized,
    PublicRoute,
    TenantSlugMissing,
    TenantNotFound,
    CredentialMissing,
    CredentialMalformed,
    CredentialExpired,
    TenantMismatch,
    PermissionDenied,
    RateLimitExceeded,
    UpstreamUnavailable,
}

impl DecisionReason {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Authorized | Self::PublicRoute)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Authorized | Self::PublicRoute => StatusCode::OK,
            Self::TenantSlugMissing | Self::TenantNotFound => StatusCode::NOT_FOUND,
            Self::CredentialMissing
            | Self::CredentialMalformed
            | Self::CredentialExpired
            | Self::TenantMismatch => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable code for response bodies
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Authorized => "AUTHORIZED",
            Self::PublicRoute => "PUBLIC_ROUTE",
            Self::TenantSlugMissing => "TENANT_SLUG_MISSING",
            Self::TenantNotFound => "TENANT_NOT_FOUND",
            Self::CredentialMissing => "CREDENTIAL_MISSING",
            Self::CredentialMalformed => "CREDENTIAL_MALFORMED",
            Self::CredentialExpired => "CREDENTIAL_EXPIRED",
            Self::TenantMismatch => "TENANT_MISMATCH",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
        }
    }

    /// Client-safe message. Never names permissions, tenants or principals.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Authorized | Self::PublicRoute => "Request allowed",
            Self::TenantSlugMissing => "Tenant not specified",
            Self::TenantNotFound => "Tenant not found",
            Self::CredentialMissing => "Authentication required",
            Self::CredentialMalformed => "Invalid credential",
            Self::CredentialExpired => "Credential expired",
            Self::TenantMismatch => "Credential not valid for this tenant",
            Self::PermissionDenied => "Insufficient permissions",
            Self::RateLimitExceeded => "Too many requests",
            Self::UpstreamUnavailable => "Service temporarily unavailable",
        }
    }

    /// Label used in metric names
    pub fn metric_label(&self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::PublicRoute => "public_route",
            Self::TenantSlugMissing => "tenant_slug_missing",
            Self::TenantNotFound => "tenant_not_found",
            Self::CredentialMissing => "credential_missing",
            Self::CredentialMalformed => "credential_malformed",
            Self::CredentialExpired => "credential_expired",
            Self::TenantMismatch => "tenant_mismatch",
            Self::PermissionDenied => "permission_denied",
            Self::RateLimitExceeded => "rate_limit_exceeded",
            Self::UpstreamUnavailable => "upstream_unavailable",
        }
    }
}

impl From<&AuthError> for DecisionReason {
    fn from(error: &AuthError) -> Self {
        match error {
            AuthError::MissingHeader { .. } => Self::CredentialMissing,
            AuthError::InvalidScheme { .. }
            | AuthError::InvalidToken { .. }
            | AuthError::JwtDecode { .. }
            | AuthError::InvalidSignature { .. }
            | AuthError::InvalidClaim { .. } => Self::CredentialMalformed,
            AuthError::TokenExpired { .. } => Self::CredentialExpired,
            AuthError::TenantMismatch { .. } => Self::TenantMismatch,
            AuthError::KeyMaterialUnavailable { .. } => Self::UpstreamUnavailable,
        }
    }
}

impl From<&TenantError> for DecisionReason {
    fn from(error: &TenantError) -> Self {
        match error {
            TenantError::SlugMissing { .. } => Self::TenantSlugMissing,
            TenantError::SlugInvalid { .. } | TenantError::NotFound { .. } => Self::TenantNotFound,
            TenantError::DirectoryUnavailable { .. }
            | TenantError::Bind { .. }
            | TenantError::Sqlx { .. }
            | TenantError::Cache { .. } => Self::UpstreamUnavailable,
        }
    }
}

/// Outcome of running one request through the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GatewayDecision {
    pub allowed: bool,
    pub reason: DecisionReason,
    pub retry_after_ms: Option<u64>,
}

impl GatewayDecision {
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
            retry_after_ms: None,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
            retry_after_ms: None,
        }
    }

    pub fn rate_limited(retry_after_ms: u64) -> Self {
        Self {
            allowed: false,
            reason: DecisionReason::RateLimitExceeded,
            retry_after_ms: Some(retry_after_ms),
        }
    }

    /// `Retry-After` value in whole seconds, rounded up
    pub fn retry_after_secs(&self) -> Option<u64> {
        self.retry_after_ms.map(|ms| ms.div_ceil(1000).max(1))
    }
}

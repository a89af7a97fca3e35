use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenantError {
    #[error("Tenant slug missing from request {location}")]
    SlugMissing { location: ErrorLocation },

    #[error("Tenant slug '{slug}' is not a valid slug {location}")]
    SlugInvalid {
        slug: String,
        location: ErrorLocation,
    },

    #[error("Tenant not found: {slug} {location}")]
    NotFound {
        slug: String,
        location: ErrorLocation,
    },

    #[error("Tenant directory unavailable: {message} {location}")]
    DirectoryUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to bind client for tenant {tenant_id}: {message} {location}")]
    Bind {
        tenant_id: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Tenant cache error: {message} {location}")]
    Cache {
        message: String,
        location: ErrorLocation,
    },
}

impl TenantError {
    /// True when the failure belongs to a collaborator rather than the request
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::DirectoryUnavailable { .. }
                | Self::Bind { .. }
                | Self::Sqlx { .. }
                | Self::Cache { .. }
        )
    }

    /// Rebuild an owned error from one shared by a collapsed cache load
    #[track_caller]
    pub(crate) fn from_shared(error: &TenantError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            Self::SlugMissing { .. } => Self::SlugMissing { location },
            Self::SlugInvalid { slug, .. } => Self::SlugInvalid {
                slug: slug.clone(),
                location,
            },
            Self::NotFound { slug, .. } => Self::NotFound {
                slug: slug.clone(),
                location,
            },
            Self::Bind {
                tenant_id, message, ..
            } => Self::Bind {
                tenant_id: tenant_id.clone(),
                message: message.clone(),
                location,
            },
            other => Self::DirectoryUnavailable {
                message: other.to_string(),
                location,
            },
        }
    }
}

impl From<sqlx::Error> for TenantError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TenantError>;

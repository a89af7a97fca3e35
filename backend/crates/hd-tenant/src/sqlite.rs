use crate::{Result as TenantErrorResult, TenantDirectory, TenantError};

use hd_core::Tenant;

use std::panic::Location;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use error_location::ErrorLocation;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub const DEFAULT_MAX_CONNECTIONS_PER_TENANT: u32 = 5;

/// Tenant directory backed by SQLite.
///
/// Tenants are looked up in the `tenants(id, slug)` table of a control
/// database. Each tenant is bound to its own database file at
/// `<data_dir>/<tenant_id>/main.db`, so one tenant's pool can never reach
/// another tenant's rows.
pub struct SqliteTenantDirectory {
    control: SqlitePool,
    data_dir: PathBuf,
    max_connections: u32,
}

impl SqliteTenantDirectory {
    pub fn new(control: SqlitePool, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            control,
            data_dir: data_dir.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS_PER_TENANT,
        }
    }

    /// Open an existing control database
    pub async fn connect(
        control_db_path: impl AsRef<Path>,
        data_dir: impl Into<PathBuf>,
    ) -> TenantErrorResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(control_db_path.as_ref())
            .read_only(true);

        let control = SqlitePoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS_PER_TENANT)
            .connect_with(options)
            .await?;

        info!(
            "Tenant directory connected: {}",
            control_db_path.as_ref().display()
        );

        Ok(Self::new(control, data_dir))
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    #[track_caller]
    fn database_path(&self, tenant: &Tenant) -> TenantErrorResult<PathBuf> {
        // Tenant ids become path components
        let safe = !tenant.id.is_empty()
            && tenant
                .id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        if !safe {
            return Err(TenantError::Bind {
                tenant_id: tenant.id.clone(),
                message: "tenant id is not a safe path component".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(self.data_dir.join(&tenant.id).join("main.db"))
    }
}

#[async_trait]
impl TenantDirectory for SqliteTenantDirectory {
    type Client = SqlitePool;

    async fn resolve(&self, slug: &str) -> TenantErrorResult<Option<Tenant>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT id, slug FROM tenants WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.control)
        .await
        .map_err(|e| TenantError::DirectoryUnavailable {
            message: format!("Tenant lookup failed: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(row.map(|(id, slug)| Tenant { id, slug }))
    }

    async fn bind(&self, tenant: &Tenant) -> TenantErrorResult<Self::Client> {
        let db_path = self.database_path(tenant)?;

        if let Some(parent) = db_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TenantError::Bind {
                    tenant_id: tenant.id.clone(),
                    message: format!("Failed to create tenant directory: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await?;

        Ok(pool)
    }
}

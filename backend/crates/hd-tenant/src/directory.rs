use crate::Result as TenantErrorResult;

use hd_core::Tenant;

use async_trait::async_trait;

/// Authoritative source of tenants and factory for tenant-scoped clients.
#[async_trait]
pub trait TenantDirectory: Send + Sync + 'static {
    /// Data-access client bound to exactly one tenant
    type Client: Send + Sync + 'static;

    /// Look up a tenant by normalized slug. `Ok(None)` means the slug is unknown;
    /// `Err` is reserved for the directory itself failing.
    async fn resolve(&self, slug: &str) -> TenantErrorResult<Option<Tenant>>;

    /// Construct a client scoped to `tenant`
    async fn bind(&self, tenant: &Tenant) -> TenantErrorResult<Self::Client>;
}

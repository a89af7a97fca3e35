use hd_core::Tenant;

use std::time::Instant;

/// A tenant together with the data-access client bound to it.
///
/// Shared as `Arc<TenantHandle<C>>`: evicting it from the resolver cache only
/// drops the cache's reference, so in-flight requests keep a working client.
#[derive(Debug)]
pub struct TenantHandle<C> {
    tenant: Tenant,
    client: C,
    bound_at: Instant,
}

impl<C> TenantHandle<C> {
    pub fn new(tenant: Tenant, client: C) -> Self {
        Self {
            tenant,
            client,
            bound_at: Instant::now(),
        }
    }

    pub fn tenant(&self) -> &Tenant {
        &self.tenant
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant.id
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn bound_at(&self) -> Instant {
        self.bound_at
    }
}

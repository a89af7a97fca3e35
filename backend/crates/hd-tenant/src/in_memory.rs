use crate::{Result as TenantErrorResult, TenantDirectory, TenantError};

use hd_core::Tenant;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::sync::RwLock;

/// Client handed out by `InMemoryTenantDirectory`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryTenantClient {
    pub tenant_id: String,
    /// Sequence number of the `bind` call that produced this client
    pub generation: usize,
}

/// Tenant directory held in process memory.
///
/// Used by development setups and tests. Counts directory calls, can inject
/// latency, and can be switched into an unavailable state.
#[derive(Default)]
pub struct InMemoryTenantDirectory {
    tenants: RwLock<HashMap<String, Tenant>>,
    resolve_calls: AtomicUsize,
    bind_calls: AtomicUsize,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tenants(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        let tenants = tenants
            .into_iter()
            .map(|tenant| (tenant.slug.clone(), tenant))
            .collect();
        Self {
            tenants: RwLock::new(tenants),
            ..Self::default()
        }
    }

    /// Delay every `resolve` call, widening the window for concurrent misses
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub async fn insert(&self, tenant: Tenant) {
        self.tenants.write().await.insert(tenant.slug.clone(), tenant);
    }

    pub async fn remove(&self, slug: &str) -> Option<Tenant> {
        self.tenants.write().await.remove(slug)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::SeqCst)
    }

    pub fn bind_calls(&self) -> usize {
        self.bind_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    type Client = InMemoryTenantClient;

    async fn resolve(&self, slug: &str) -> TenantErrorResult<Option<Tenant>> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TenantError::DirectoryUnavailable {
                message: "in-memory directory marked unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(self.tenants.read().await.get(slug).cloned())
    }

    async fn bind(&self, tenant: &Tenant) -> TenantErrorResult<Self::Client> {
        let generation = self.bind_calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(InMemoryTenantClient {
            tenant_id: tenant.id.clone(),
            generation,
        })
    }
}

use crate::{Result as TenantErrorResult, TenantDirectory, TenantError, TenantHandle, normalize_slug};

use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{debug, info};
use moka::future::Cache;
use moka::notification::RemovalCause;
use moka::policy::EvictionPolicy;

pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;
pub const DEFAULT_IDLE_TTL_SECS: u64 = 900;

/// Bounds for the slug → handle cache
#[derive(Debug, Clone)]
pub struct TenantCacheConfig {
    /// Maximum number of cached handles before LRU eviction
    pub capacity: u64,
    /// Handles untouched for this long are evicted
    pub idle_ttl: Duration,
}

impl Default for TenantCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
            idle_ttl: Duration::from_secs(DEFAULT_IDLE_TTL_SECS),
        }
    }
}

/// Resolves tenant slugs to shared, tenant-scoped handles.
///
/// First-time lookups for the same slug are collapsed: one task runs the
/// directory `resolve` + `bind`, every concurrent caller awaits that load and
/// receives the same `Arc`. Failed loads are not cached.
pub struct TenantResolver<D: TenantDirectory> {
    directory: Arc<D>,
    cache: Cache<String, Arc<TenantHandle<D::Client>>>,
}

impl<D: TenantDirectory> TenantResolver<D> {
    pub fn new(directory: Arc<D>, config: TenantCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_idle(config.idle_ttl)
            .eviction_policy(EvictionPolicy::lru())
            .support_invalidation_closures()
            .eviction_listener(
                |slug: Arc<String>, handle: Arc<TenantHandle<D::Client>>, cause| {
                    if !matches!(cause, RemovalCause::Replaced) {
                        debug!(
                            "Tenant handle for '{}' ({}) released: {:?}",
                            slug,
                            handle.tenant_id(),
                            cause
                        );
                    }
                },
            )
            .build();

        Self { directory, cache }
    }

    /// Resolve a raw slug token as carried by the request
    pub async fn resolve(
        &self,
        raw_slug: Option<&str>,
    ) -> TenantErrorResult<Arc<TenantHandle<D::Client>>> {
        self.resolve_tracked(raw_slug)
            .await
            .map(|(handle, _loaded)| handle)
    }

    /// Like `resolve`, also reporting whether this call loaded the handle
    /// from the directory (`true`) or found it cached (`false`)
    pub async fn resolve_tracked(
        &self,
        raw_slug: Option<&str>,
    ) -> TenantErrorResult<(Arc<TenantHandle<D::Client>>, bool)> {
        let slug = normalize_slug(raw_slug)?;

        let directory = Arc::clone(&self.directory);
        let key = slug.clone();
        let entry = self
            .cache
            .entry(slug.clone())
            .or_try_insert_with(async move {
                let tenant = directory
                    .resolve(&key)
                    .await?
                    .ok_or_else(|| TenantError::NotFound {
                        slug: key.clone(),
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                let client = directory.bind(&tenant).await?;
                info!("Bound client for tenant {} ({})", tenant.id, tenant.slug);
                Ok::<_, TenantError>(Arc::new(TenantHandle::new(tenant, client)))
            })
            .await
            .map_err(|shared| TenantError::from_shared(&shared))?;

        let loaded = entry.is_fresh();
        if loaded {
            debug!("Tenant cache miss: {slug}");
        } else {
            debug!("Tenant cache hit: {slug}");
        }

        Ok((entry.into_value(), loaded))
    }

    /// Drop the cached handle for one slug
    pub async fn invalidate_slug(&self, raw_slug: &str) -> TenantErrorResult<()> {
        let slug = normalize_slug(Some(raw_slug))?;
        self.cache.invalidate(&slug).await;
        info!("Invalidated tenant cache entry: {slug}");
        Ok(())
    }

    /// Drop every cached handle bound to `tenant_id`, e.g. after tenant deletion
    #[track_caller]
    pub fn invalidate_tenant(&self, tenant_id: &str) -> TenantErrorResult<()> {
        let tenant_id = tenant_id.to_string();
        let log_id = tenant_id.clone();
        self.cache
            .invalidate_entries_if(move |_slug, handle| handle.tenant_id() == tenant_id)
            .map_err(|e| TenantError::Cache {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        info!("Invalidated tenant cache entries for tenant {log_id}");
        Ok(())
    }

    /// Drop every cached handle
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Apply pending evictions and invalidations now
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Approximate number of cached handles
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

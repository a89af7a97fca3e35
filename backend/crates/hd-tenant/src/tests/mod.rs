
use crate::{InMemoryTenantDirectory, TenantCacheConfig, TenantResolver};

use hd_core::Tenant;

use std::sync::Arc;

pub(crate) fn acme() -> Tenant {
    Tenant::new("tenant-acme", "acme")
}

pub(crate) fn globex() -> Tenant {
    Tenant::new("tenant-globex", "globex")
}

pub(crate) fn resolver_with(
    directory: InMemoryTenantDirectory,
) -> (Arc<InMemoryTenantDirectory>, TenantResolver<InMemoryTenantDirectory>) {
    let directory = Arc::new(directory);
    let resolver = TenantResolver::new(Arc::clone(&directory), TenantCacheConfig::default());
    (directory, resolver)
}

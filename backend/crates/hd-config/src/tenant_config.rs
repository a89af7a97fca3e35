use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CACHE_CAPACITY, DEFAULT_IDLE_TTL_SECS,
    DEFAULT_MAX_CONNECTIONS_PER_TENANT, DEFAULT_TENANT_DATA_DIR, DEFAULT_TENANT_DIRECTORY_PATH,
    MAX_CACHE_CAPACITY, MAX_IDLE_TTL_SECS, MAX_MAX_CONNECTIONS_PER_TENANT, MIN_CACHE_CAPACITY,
    MIN_IDLE_TTL_SECS, MIN_MAX_CONNECTIONS_PER_TENANT,
};

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Tenant directory location and handle cache bounds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// SQLite control database holding the `tenants` table, relative to the config dir
    pub directory_path: String,
    /// Root for per-tenant databases, relative to the config dir
    pub data_dir: String,
    pub cache_capacity: u64,
    pub idle_ttl_secs: u64,
    pub max_connections_per_tenant: u32,
}

impl Default for TenantConfig {
    fn default() -> Self {
        Self {
            directory_path: String::from(DEFAULT_TENANT_DIRECTORY_PATH),
            data_dir: String::from(DEFAULT_TENANT_DATA_DIR),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            idle_ttl_secs: DEFAULT_IDLE_TTL_SECS,
            max_connections_per_tenant: DEFAULT_MAX_CONNECTIONS_PER_TENANT,
        }
    }
}

impl TenantConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        Self::validate_relative("tenants.directory_path", &self.directory_path)?;
        Self::validate_relative("tenants.data_dir", &self.data_dir)?;

        if !(MIN_CACHE_CAPACITY..=MAX_CACHE_CAPACITY).contains(&self.cache_capacity) {
            return Err(ConfigError::tenants(format!(
                "tenants.cache_capacity must be {}-{}, got {}",
                MIN_CACHE_CAPACITY, MAX_CACHE_CAPACITY, self.cache_capacity
            )));
        }

        if !(MIN_IDLE_TTL_SECS..=MAX_IDLE_TTL_SECS).contains(&self.idle_ttl_secs) {
            return Err(ConfigError::tenants(format!(
                "tenants.idle_ttl_secs must be {}-{}, got {}",
                MIN_IDLE_TTL_SECS, MAX_IDLE_TTL_SECS, self.idle_ttl_secs
            )));
        }

        if !(MIN_MAX_CONNECTIONS_PER_TENANT..=MAX_MAX_CONNECTIONS_PER_TENANT)
            .contains(&self.max_connections_per_tenant)
        {
            return Err(ConfigError::tenants(format!(
                "tenants.max_connections_per_tenant must be {}-{}, got {}",
                MIN_MAX_CONNECTIONS_PER_TENANT,
                MAX_MAX_CONNECTIONS_PER_TENANT,
                self.max_connections_per_tenant
            )));
        }

        Ok(())
    }

    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    fn validate_relative(field: &str, value: &str) -> ConfigErrorResult<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::tenants(format!("{field} cannot be empty")));
        }
        if Path::new(value).is_absolute() || value.contains("..") {
            return Err(ConfigError::tenants(format!(
                "{field} must be relative and cannot contain '..'"
            )));
        }
        Ok(())
    }
}

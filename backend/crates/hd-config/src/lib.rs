mod auth_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod route_config;
mod server_config;
mod tenant_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use route_config::{RouteConfig, RouteRateLimit};
pub use server_config::ServerConfig;
pub use tenant_config::TenantConfig;

pub const CONFIG_DIR_ENV: &str = "HD_CONFIG_DIR";
pub const DEFAULT_CONFIG_DIR: &str = ".helpdesk";
pub const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_LEEWAY_SECS: u64 = 30;
const MAX_LEEWAY_SECS: u64 = 300;

const DEFAULT_TENANT_DIRECTORY_PATH: &str = "tenants.db";
const DEFAULT_TENANT_DATA_DIR: &str = "tenants";
const DEFAULT_CACHE_CAPACITY: u64 = 1024;
const MIN_CACHE_CAPACITY: u64 = 1;
const MAX_CACHE_CAPACITY: u64 = 100_000;
const DEFAULT_IDLE_TTL_SECS: u64 = 900;
const MIN_IDLE_TTL_SECS: u64 = 1;
const MAX_IDLE_TTL_SECS: u64 = 86_400;
const DEFAULT_MAX_CONNECTIONS_PER_TENANT: u32 = 5;
const MIN_MAX_CONNECTIONS_PER_TENANT: u32 = 1;
const MAX_MAX_CONNECTIONS_PER_TENANT: u32 = 100;

const DEFAULT_RATE_LIMIT_ATTEMPTS: u32 = 100;
const MIN_RATE_LIMIT_ATTEMPTS: u32 = 1;
const MAX_RATE_LIMIT_ATTEMPTS: u32 = 10_000;
const DEFAULT_RATE_LIMIT_WINDOW_MS: u64 = 15 * 60 * 1000;
const MIN_RATE_LIMIT_WINDOW_MS: u64 = 1000;
const MAX_RATE_LIMIT_WINDOW_MS: u64 = 60 * 60 * 1000;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
const MIN_SWEEP_INTERVAL_SECS: u64 = 1;
const MAX_SWEEP_INTERVAL_SECS: u64 = 3600;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;

use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult,
    DEFAULT_CONFIG_DIR, LoggingConfig, RateLimitConfig, RouteConfig, ServerConfig, TenantConfig,
};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub tenants: TenantConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
    pub routes: Vec<RouteConfig>,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for HD_CONFIG_DIR env var, else use ./.helpdesk/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply HD_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: HD_CONFIG_DIR env var > ./.helpdesk/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.tenants.validate()?;
        self.rate_limit.validate()?;

        let mut seen = HashSet::new();
        for route in &self.routes {
            route.validate()?;
            if !seen.insert(route.id.as_str()) {
                return Err(ConfigError::route(format!(
                    "route '{}' is declared more than once",
                    route.id
                )));
            }
        }

        Ok(())
    }

    /// Absolute path of the tenant control database
    pub fn tenant_directory_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.tenants.directory_path))
    }

    /// Absolute root of the per-tenant databases
    pub fn tenant_data_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.tenants.data_dir))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        if self.server.trusted_proxies.is_empty() {
            info!("  trusted proxies: none (X-Forwarded-For ignored)");
        } else {
            info!(
                "  trusted proxies: {}",
                self.server.trusted_proxies.join(", ")
            );
        }
        if self.server.cors_allowed_origins.is_empty() {
            info!("  cors: disabled");
        } else {
            info!(
                "  cors: {}",
                self.server.cors_allowed_origins.join(", ")
            );
        }
        info!(
            "  auth: {} (leeway {}s)",
            self.auth.algorithm_name(),
            self.auth.leeway_secs
        );
        info!(
            "  tenants: directory={}, data_dir={}, cache={} (idle {}s), pool={}/tenant",
            self.tenants.directory_path,
            self.tenants.data_dir,
            self.tenants.cache_capacity,
            self.tenants.idle_ttl_secs,
            self.tenants.max_connections_per_tenant
        );
        info!(
            "  rate_limit: {}/{}ms (sweep every {}s)",
            self.rate_limit.max_attempts,
            self.rate_limit.window_ms,
            self.rate_limit.sweep_interval_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!("  routes: {} declared", self.routes.len());
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("HD_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("HD_SERVER_PORT", &mut self.server.port);
        Self::apply_env_list("HD_SERVER_TRUSTED_PROXIES", &mut self.server.trusted_proxies);
        Self::apply_env_list(
            "HD_SERVER_CORS_ALLOWED_ORIGINS",
            &mut self.server.cors_allowed_origins,
        );

        // Auth
        Self::apply_env_option_string("HD_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "HD_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_parse("HD_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);

        // Tenants
        Self::apply_env_string(
            "HD_TENANTS_DIRECTORY_PATH",
            &mut self.tenants.directory_path,
        );
        Self::apply_env_string("HD_TENANTS_DATA_DIR", &mut self.tenants.data_dir);
        Self::apply_env_parse(
            "HD_TENANTS_CACHE_CAPACITY",
            &mut self.tenants.cache_capacity,
        );
        Self::apply_env_parse("HD_TENANTS_IDLE_TTL_SECS", &mut self.tenants.idle_ttl_secs);
        Self::apply_env_parse(
            "HD_TENANTS_MAX_CONNECTIONS",
            &mut self.tenants.max_connections_per_tenant,
        );

        // Rate limit
        Self::apply_env_parse(
            "HD_RATE_LIMIT_MAX_ATTEMPTS",
            &mut self.rate_limit.max_attempts,
        );
        Self::apply_env_parse("HD_RATE_LIMIT_WINDOW_MS", &mut self.rate_limit.window_ms);
        Self::apply_env_parse(
            "HD_RATE_LIMIT_SWEEP_INTERVAL_SECS",
            &mut self.rate_limit.sweep_interval_secs,
        );

        // Logging
        Self::apply_env_parse("HD_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("HD_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("HD_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    /// Comma-separated list; an empty value clears the list
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}

use crate::{ConfigError, ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT};

use std::net::IpAddr;

use serde::Deserialize;

const ANY_ORIGIN: &str = "*";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Peers whose `X-Forwarded-For` header is honored. Empty means the
    /// header is ignored and the socket peer is the caller.
    pub trusted_proxies: Vec<String>,
    /// Browser origins allowed cross-origin access. Empty disables CORS,
    /// `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            trusted_proxies: Vec::new(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::config("server.host cannot be empty"));
        }

        if self.port == 0 {
            return Err(ConfigError::config(
                "server.port must be 1-65535, got 0".to_string(),
            ));
        }

        self.trusted_proxy_addrs()?;

        for origin in &self.cors_allowed_origins {
            let origin = origin.trim();
            if origin == ANY_ORIGIN {
                continue;
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://"))
                || origin.ends_with('/')
            {
                return Err(ConfigError::config(format!(
                    "server.cors_allowed_origins entry '{origin}' must be '*' or a scheme://host[:port] origin"
                )));
            }
        }

        Ok(())
    }

    /// Parsed `trusted_proxies`
    pub fn trusted_proxy_addrs(&self) -> ConfigErrorResult<Vec<IpAddr>> {
        self.trusted_proxies
            .iter()
            .map(|proxy| {
                proxy.trim().parse::<IpAddr>().map_err(|_| {
                    ConfigError::config(format!(
                        "server.trusted_proxies entry '{proxy}' is not an IP address"
                    ))
                })
            })
            .collect()
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins
            .iter()
            .any(|origin| origin.trim() == ANY_ORIGIN)
    }
}

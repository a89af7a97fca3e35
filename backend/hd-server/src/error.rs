use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] hd_config::ConfigError),

    #[error("Gateway setup error: {0}")]
    Gateway(#[from] hd_gateway::GatewayError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] hd_auth::AuthError),

    #[error("Tenant directory error: {0}")]
    Tenant(#[from] hd_tenant::TenantError),

    #[error("Failed to read JWT key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("Metrics exporter error: {message}")]
    Metrics { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

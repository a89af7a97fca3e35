use hd_server::error::ServerError;
use hd_server::{AppState, build_router, cors, logger, route_table};

use hd_auth::{CredentialValidator, JwtValidator};
use hd_core::{Clock, SystemClock};
use hd_gateway::{GatewayMetrics, GatewayPipeline, InMemoryRateLimitStore, RateLimiter};
use hd_tenant::{SqliteTenantDirectory, TenantCacheConfig, TenantResolver};

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info};
use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = hd_config::Config::load()?;
    config.validate()?;
    let config_dir = hd_config::Config::config_dir()?;

    let log_file_path = match config.logging.file {
        Some(ref filename) => {
            let log_dir = config_dir.join(&config.logging.dir);
            std::fs::create_dir_all(&log_dir)?;
            Some(log_dir.join(filename))
        }
        None => None,
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting hd-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| ServerError::Metrics {
            message: e.to_string(),
        })?;

    // Key material
    let jwt_validator = if let Some(ref secret) = config.auth.jwt_secret {
        JwtValidator::with_hs256(secret.as_bytes())
    } else {
        let full_path = config
            .auth
            .public_key_path(&config_dir)
            .ok_or_else(|| hd_config::ConfigError::auth("no JWT key material configured"))?;
        let public_key =
            std::fs::read_to_string(&full_path).map_err(|e| ServerError::JwtKeyFile {
                path: full_path.display().to_string(),
                source: e,
            })?;
        JwtValidator::with_rs256(&public_key)?
    };
    info!("JWT: {} verification enabled", jwt_validator.algorithm());

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let credentials = CredentialValidator::new(Arc::new(jwt_validator), Arc::clone(&clock))
        .with_leeway_secs(config.auth.leeway_secs);

    // Tenant directory and handle cache
    let data_dir = config.tenant_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    let directory = SqliteTenantDirectory::connect(config.tenant_directory_path()?, data_dir)
        .await?
        .with_max_connections(config.tenants.max_connections_per_tenant);
    let tenants = TenantResolver::new(
        Arc::new(directory),
        TenantCacheConfig {
            capacity: config.tenants.cache_capacity,
            idle_ttl: config.tenants.idle_ttl(),
        },
    );

    // Rate limiting
    let metrics = GatewayMetrics::new();
    let rate_limiter = Arc::new(RateLimiter::new(
        Arc::new(InMemoryRateLimitStore::new()),
        clock,
    ));
    let sweeper = RateLimiter::spawn_sweeper(
        Arc::clone(&rate_limiter),
        config.rate_limit.sweep_interval(),
        metrics.clone(),
    );

    let routes = route_table::build_registry(&config)?;
    let pipeline = GatewayPipeline::new(
        Arc::new(routes),
        Arc::new(tenants),
        Arc::new(credentials),
        rate_limiter,
    )
    .with_metrics(metrics);

    let state = AppState::new(Arc::new(pipeline))
        .with_metrics_handle(metrics_handle)
        .with_trusted_proxies(config.server.trusted_proxy_addrs()?)
        .with_cors(cors::cors_layer(&config.server)?);
    let app = build_router(state);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

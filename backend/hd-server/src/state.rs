use hd_gateway::GatewayPipeline;
use hd_tenant::TenantDirectory;

use std::net::IpAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::CorsLayer;

/// Shared state for the router and the gateway middleware
pub struct AppState<D: TenantDirectory> {
    pub pipeline: Arc<GatewayPipeline<D>>,
    /// Renders `/metrics`; `None` when no recorder was installed
    pub metrics_handle: Option<PrometheusHandle>,
    /// Peers allowed to report the caller through `X-Forwarded-For`
    pub trusted_proxies: Arc<[IpAddr]>,
    /// `None` leaves cross-origin requests unanswered
    pub cors: Option<CorsLayer>,
}

impl<D: TenantDirectory> AppState<D> {
    pub fn new(pipeline: Arc<GatewayPipeline<D>>) -> Self {
        Self {
            pipeline,
            metrics_handle: None,
            trusted_proxies: Arc::from(Vec::new()),
            cors: None,
        }
    }

    pub fn with_metrics_handle(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    pub fn with_trusted_proxies(mut self, proxies: Vec<IpAddr>) -> Self {
        self.trusted_proxies = Arc::from(proxies);
        self
    }

    pub fn with_cors(mut self, cors: Option<CorsLayer>) -> Self {
        self.cors = cors;
        self
    }
}

impl<D: TenantDirectory> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            metrics_handle: self.metrics_handle.clone(),
            trusted_proxies: Arc::clone(&self.trusted_proxies),
            cors: self.cors.clone(),
        }
    }
}

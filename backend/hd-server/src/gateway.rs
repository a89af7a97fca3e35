use crate::{AppState, GatewayRejection};

use hd_gateway::GatewayRequest;
use hd_tenant::TenantDirectory;

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, MatchedPath, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::info;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Route id for the gateway registry: `"<METHOD> <route template>"`.
///
/// Unmatched requests use the raw path, which is never registered and so
/// falls through to deny-by-default.
pub fn route_id(request: &Request) -> String {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    format!("{} {}", request.method(), path)
}

/// Caller address for anonymous rate limiting.
///
/// `X-Forwarded-For` is only read when the socket peer is a trusted proxy.
/// The chain is walked right to left past trusted hops; the first other hop
/// is the caller. Any other case yields the peer address itself.
pub fn caller_addr(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trusted_proxies: &[IpAddr],
) -> Option<String> {
    let peer_ip = peer.map(|addr| addr.ip())?;
    if trusted_proxies.contains(&peer_ip)
        && let Some(client) = forwarded_client(headers, trusted_proxies)
    {
        return Some(client.to_string());
    }
    Some(peer_ip.to_string())
}

fn forwarded_client(headers: &HeaderMap, trusted_proxies: &[IpAddr]) -> Option<IpAddr> {
    let hops: Vec<&str> = headers
        .get_all(FORWARDED_FOR_HEADER)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|hop| !hop.is_empty())
        .collect();

    for hop in hops.into_iter().rev() {
        // An unparseable hop means the chain can't be trusted past this point
        let ip = hop.parse::<IpAddr>().ok()?;
        if !trusted_proxies.contains(&ip) {
            return Some(ip);
        }
    }
    None
}

/// Middleware running every request through the gateway pipeline.
///
/// Allowed requests continue with an `Admission` in their extensions; denied
/// requests are answered here.
pub async fn authorize<D: TenantDirectory>(
    State(state): State<AppState<D>>,
    mut request: Request,
    next: Next,
) -> Response {
    let route_id = route_id(&request);
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let caller = caller_addr(request.headers(), peer, &state.trusted_proxies);

    let gateway_request = GatewayRequest::from_headers(route_id, request.headers(), caller);
    let outcome = state.pipeline.evaluate(&gateway_request).await;

    match outcome.admission {
        Some(admission) if outcome.decision.allowed => {
            request.extensions_mut().insert(admission);
            next.run(request).await
        }
        _ => {
            info!(
                "Denied {} ({}) from {}",
                gateway_request.route_id,
                outcome.decision.reason.error_code(),
                gateway_request.caller_addr.as_deref().unwrap_or("unknown")
            );
            GatewayRejection(outcome.decision).into_response()
        }
    }
}

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};

pub const TENANT_SLUG_HEADER: &str = "x-tenant-slug";
pub const TENANT_SLUG_COOKIE: &str = "tenantSlug";

/// Transport-neutral view of an inbound request, as the gateway sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayRequest {
    pub route_id: String,
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// Raw tenant slug token, not yet normalized
    pub tenant_slug: Option<String>,
    /// Caller address for anonymous rate limiting
    pub caller_addr: Option<String>,
}

impl GatewayRequest {
    pub fn new(route_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            ..Self::default()
        }
    }

    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    pub fn with_bearer(self, token: &str) -> Self {
        self.with_authorization(format!("Bearer {token}"))
    }

    pub fn with_tenant_slug(mut self, slug: impl Into<String>) -> Self {
        self.tenant_slug = Some(slug.into());
        self
    }

    pub fn with_caller_addr(mut self, addr: impl Into<String>) -> Self {
        self.caller_addr = Some(addr.into());
        self
    }

    /// Build from HTTP headers. The `X-Tenant-Slug` header wins over the
    /// `tenantSlug` cookie when both are present.
    pub fn from_headers(
        route_id: impl Into<String>,
        headers: &HeaderMap,
        caller_addr: Option<String>,
    ) -> Self {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let tenant_slug = headers
            .get(TENANT_SLUG_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .map(str::to_string)
            .or_else(|| slug_from_cookies(headers));

        Self {
            route_id: route_id.into(),
            authorization,
            tenant_slug,
            caller_addr,
        }
    }
}

fn slug_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == TENANT_SLUG_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

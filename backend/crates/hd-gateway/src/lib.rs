pub mod decision;
pub mod error;
pub mod metrics;
pub mod permission_evaluator;
pub mod pipeline;
pub mod rate_limit_config;
pub mod rate_limit_store;
pub mod rate_limiter;
pub mod request;
pub mod route_registry;
pub mod route_requirement;

pub use hd_core::CompositionMode;
pub use decision::{DecisionReason, GatewayDecision};
pub use error::{GatewayError, Result};
pub use self::metrics::GatewayMetrics;
pub use permission_evaluator::{PermissionDenial, PermissionEvaluator, PermissionOutcome};
pub use pipeline::{Admission, GatewayOutcome, GatewayPipeline};
pub use rate_limit_config::RateLimitConfig;
pub use rate_limit_store::{InMemoryRateLimitStore, RateLimitBucket, RateLimitOutcome, RateLimitStore};
pub use rate_limiter::{RateLimiter, identity_key};
pub use request::{GatewayRequest, TENANT_SLUG_COOKIE, TENANT_SLUG_HEADER};
pub use route_registry::RouteMetadataRegistry;
pub use route_requirement::RouteRequirement;

#[cfg(test)]
mod tests;

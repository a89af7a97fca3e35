use crate::{
    DecisionReason, GatewayDecision, GatewayMetrics, GatewayRequest, PermissionDenial,
    PermissionEvaluator, PermissionOutcome, RateLimitOutcome, RateLimiter, RouteMetadataRegistry,
    identity_key,
};

use hd_auth::{AuthError, CredentialValidator, Principal};
use hd_tenant::{TenantDirectory, TenantHandle, TenantResolver};

use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, warn};

/// What an allowed request carries to its downstream handler
pub struct Admission<C> {
    pub tenant: Arc<TenantHandle<C>>,
    /// `None` on public routes
    pub principal: Option<Principal>,
}

impl<C> Clone for Admission<C> {
    fn clone(&self) -> Self {
        Self {
            tenant: Arc::clone(&self.tenant),
            principal: self.principal.clone(),
        }
    }
}

/// A decision plus, when allowed, the admission for the handler
pub struct GatewayOutcome<C> {
    pub decision: GatewayDecision,
    pub admission: Option<Admission<C>>,
}

impl<C> GatewayOutcome<C> {
    fn denied(decision: GatewayDecision) -> Self {
        Self {
            decision,
            admission: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.decision.allowed
    }
}

/// Runs every request through route lookup, tenant resolution, credential
/// validation, permission evaluation and rate limiting, in that order.
///
/// The first failing stage ends evaluation. Rate limiting only counts
/// requests that already passed authorization.
pub struct GatewayPipeline<D: TenantDirectory> {
    routes: Arc<RouteMetadataRegistry>,
    tenants: Arc<TenantResolver<D>>,
    credentials: Arc<CredentialValidator>,
    permissions: PermissionEvaluator,
    rate_limiter: Arc<RateLimiter>,
    metrics: GatewayMetrics,
}

impl<D: TenantDirectory> GatewayPipeline<D> {
    pub fn new(
        routes: Arc<RouteMetadataRegistry>,
        tenants: Arc<TenantResolver<D>>,
        credentials: Arc<CredentialValidator>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            routes,
            tenants,
            credentials,
            permissions: PermissionEvaluator::new(),
            rate_limiter,
            metrics: GatewayMetrics::new(),
        }
    }

    pub fn with_metrics(mut self, metrics: GatewayMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn routes(&self) -> &Arc<RouteMetadataRegistry> {
        &self.routes
    }

    pub fn tenants(&self) -> &Arc<TenantResolver<D>> {
        &self.tenants
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.rate_limiter
    }

    pub async fn evaluate(&self, request: &GatewayRequest) -> GatewayOutcome<D::Client> {
        let started = Instant::now();
        let outcome = self.run(request).await;
        self.metrics.decision(&outcome.decision, started.elapsed());
        outcome
    }

    async fn run(&self, request: &GatewayRequest) -> GatewayOutcome<D::Client> {
        let route_id = request.route_id.as_str();
        let requirement = self.routes.lookup(route_id);

        let tenant = match self.tenants.resolve_tracked(request.tenant_slug.as_deref()).await {
            Ok((tenant, loaded)) => {
                self.metrics.tenant_resolved(loaded);
                tenant
            }
            Err(e) => {
                let reason = DecisionReason::from(&e);
                if e.is_upstream() {
                    error!("Tenant resolution failed for {route_id}: {e}");
                } else {
                    debug!("Tenant resolution denied {route_id}: {e}");
                }
                return GatewayOutcome::denied(GatewayDecision::deny(reason));
            }
        };

        let principal = if requirement.is_public() {
            None
        } else {
            match self
                .credentials
                .validate(request.authorization.as_deref(), tenant.tenant())
                .await
            {
                Ok(principal) => Some(principal),
                Err(e) => {
                    if matches!(e, AuthError::KeyMaterialUnavailable { .. }) {
                        error!("Credential verification unavailable for {route_id}: {e}");
                    } else {
                        debug!(
                            "Credential rejected for {route_id} on tenant {}: {e}",
                            tenant.tenant_id()
                        );
                    }
                    return GatewayOutcome::denied(GatewayDecision::deny(DecisionReason::from(
                        &e,
                    )));
                }
            }
        };

        let allowed_reason = match self.permissions.evaluate(principal.as_ref(), &requirement) {
            PermissionOutcome::Public => DecisionReason::PublicRoute,
            PermissionOutcome::AuthenticatedOnly | PermissionOutcome::Granted => {
                DecisionReason::Authorized
            }
            PermissionOutcome::Denied(denial) => {
                let reason = match &denial {
                    PermissionDenial::NotAuthenticated => DecisionReason::CredentialMissing,
                    PermissionDenial::UnregisteredRoute => {
                        warn!("Denied unregistered route {route_id}");
                        DecisionReason::PermissionDenied
                    }
                    PermissionDenial::Missing { missing } => {
                        warn!(
                            "Permission denied on {route_id}: principal {} of tenant {} lacks {:?} ({} mode)",
                            principal.as_ref().map_or("-", |p| p.id.as_str()),
                            tenant.tenant_id(),
                            missing,
                            requirement.composition_mode()
                        );
                        DecisionReason::PermissionDenied
                    }
                };
                return GatewayOutcome::denied(GatewayDecision::deny(reason));
            }
        };

        if let Some(limit) = self.routes.effective_rate_limit(&requirement) {
            let identity = identity_key(principal.as_ref(), request.caller_addr.as_deref());
            if let RateLimitOutcome::Limited { retry_after_ms } =
                self.rate_limiter.check(&identity, route_id, &limit)
            {
                return GatewayOutcome::denied(GatewayDecision::rate_limited(retry_after_ms));
            }
        }

        debug!(
            "Allowed {route_id} for tenant {} ({:?})",
            tenant.tenant_id(),
            allowed_reason
        );

        GatewayOutcome {
            decision: GatewayDecision::allow(allowed_reason),
            admission: Some(Admission { tenant, principal }),
        }
    }
}

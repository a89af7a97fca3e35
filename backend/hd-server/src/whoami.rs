use hd_gateway::Admission;
use hd_tenant::TenantDirectory;

use axum::{Extension, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub tenant_id: String,
    pub tenant_slug: String,
    pub principal_id: Option<String>,
    pub permissions: Vec<String>,
}

/// GET /api/whoami - the tenant and principal the gateway admitted
pub async fn whoami<D: TenantDirectory>(
    Extension(admission): Extension<Admission<D::Client>>,
) -> Json<WhoAmIResponse> {
    let tenant = admission.tenant.tenant();
    let mut permissions: Vec<String> = admission
        .principal
        .as_ref()
        .map(|principal| principal.permissions.iter().cloned().collect())
        .unwrap_or_default();
    permissions.sort();

    Json(WhoAmIResponse {
        tenant_id: tenant.id.clone(),
        tenant_slug: tenant.slug.clone(),
        principal_id: admission.principal.map(|principal| principal.id),
        permissions,
    })
}

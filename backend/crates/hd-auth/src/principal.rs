use crate::Claims;

use std::collections::HashSet;

use serde::Serialize;

/// The authenticated caller of a single request.
///
/// Derived fresh from a verified credential on every request and never
/// persisted. `tenant_id` has already been checked against the resolved tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: String,
    pub tenant_id: String,
    pub permissions: HashSet<String>,
}

impl Principal {
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            tenant_id: claims.tenant_id,
            permissions: claims.permissions.into_iter().collect(),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

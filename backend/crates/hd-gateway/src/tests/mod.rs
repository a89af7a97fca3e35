
use hd_auth::Principal;

use std::collections::HashSet;

pub(crate) fn principal_with(permissions: &[&str]) -> Principal {
    Principal {
        id: "user-123".to_string(),
        tenant_id: "tenant-acme".to_string(),
        permissions: permissions
            .iter()
            .map(|p| p.to_string())
            .collect::<HashSet<_>>(),
    }
}

use crate::{CompositionMode, RouteRequirement};

use hd_auth::Principal;

/// Why a caller was refused by permission evaluation.
///
/// `Missing` carries permission names for logs only; they never reach the
/// client response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionDenial {
    NotAuthenticated,
    UnregisteredRoute,
    Missing { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionOutcome {
    /// Route is public
    Public,
    /// Route requires a principal but no particular permission
    AuthenticatedOnly,
    /// Principal satisfies the route's permission set
    Granted,
    Denied(PermissionDenial),
}

impl PermissionOutcome {
    pub fn is_allowed(&self) -> bool {
        !matches!(self, Self::Denied(_))
    }
}

/// Compares a principal's permissions against a route requirement
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(
        &self,
        principal: Option<&Principal>,
        requirement: &RouteRequirement,
    ) -> PermissionOutcome {
        if requirement.is_public() {
            return PermissionOutcome::Public;
        }

        let Some(principal) = principal else {
            return PermissionOutcome::Denied(PermissionDenial::NotAuthenticated);
        };

        if !requirement.is_registered() {
            return PermissionOutcome::Denied(PermissionDenial::UnregisteredRoute);
        }

        let required = requirement.required_permissions();
        if required.is_empty() {
            return PermissionOutcome::AuthenticatedOnly;
        }

        match requirement.composition_mode() {
            CompositionMode::Any => {
                if required.iter().any(|p| principal.has_permission(p)) {
                    PermissionOutcome::Granted
                } else {
                    PermissionOutcome::Denied(PermissionDenial::Missing {
                        missing: required.to_vec(),
                    })
                }
            }
            CompositionMode::All => {
                let missing: Vec<String> = required
                    .iter()
                    .filter(|p| !principal.has_permission(p))
                    .cloned()
                    .collect();
                if missing.is_empty() {
                    PermissionOutcome::Granted
                } else {
                    PermissionOutcome::Denied(PermissionDenial::Missing { missing })
                }
            }
        }
    }
}

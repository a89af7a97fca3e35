use crate::{CompositionMode, RateLimitConfig};

/// Access requirements declared by a route at registration time.
///
/// Immutable once built. `required_permissions` keeps declaration order and
/// drops duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequirement {
    is_public: bool,
    required_permissions: Vec<String>,
    composition_mode: CompositionMode,
    rate_limit: Option<RateLimitConfig>,
    skip_rate_limit: bool,
    registered: bool,
}

impl RouteRequirement {
    /// No credential needed; tenant resolution and rate limiting still apply
    pub fn public() -> Self {
        Self {
            is_public: true,
            ..Self::authenticated()
        }
    }

    /// Any valid credential for the tenant
    pub fn authenticated() -> Self {
        Self {
            is_public: false,
            required_permissions: Vec::new(),
            composition_mode: CompositionMode::All,
            rate_limit: None,
            skip_rate_limit: false,
            registered: true,
        }
    }

    /// Holder of at least one of `permissions`
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_permissions(CompositionMode::Any, permissions)
    }

    /// Holder of every one of `permissions`
    pub fn all_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_permissions(CompositionMode::All, permissions)
    }

    pub fn with_permissions<I, S>(mode: CompositionMode, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut required_permissions: Vec<String> = Vec::new();
        for permission in permissions {
            let permission = permission.into();
            if !required_permissions.contains(&permission) {
                required_permissions.push(permission);
            }
        }

        Self {
            required_permissions,
            composition_mode: mode,
            ..Self::authenticated()
        }
    }

    /// Override the registry's default limit for this route
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    /// Bypass rate limiting entirely, whatever limit is configured
    pub fn skipping_rate_limit(mut self) -> Self {
        self.skip_rate_limit = true;
        self
    }

    /// Requirement served for routes nobody registered: denies every caller
    pub(crate) fn unregistered() -> Self {
        Self {
            registered: false,
            ..Self::authenticated()
        }
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn required_permissions(&self) -> &[String] {
        &self.required_permissions
    }

    pub fn composition_mode(&self) -> CompositionMode {
        self.composition_mode
    }

    pub fn rate_limit(&self) -> Option<&RateLimitConfig> {
        self.rate_limit.as_ref()
    }

    pub fn skip_rate_limit(&self) -> bool {
        self.skip_rate_limit
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

//! Consumer-facing gates over the resolver.
//!
//! [`Gate`] decides whether a piece of UI renders; [`RouteGuard`] decides
//! whether a screen is reachable and where to send the user otherwise.

use serde::{Deserialize, Serialize};

use crate::resolver::{has_all_permissions, has_any_permission, has_permission};
use crate::User;

/// Where a denied route guard sends the user unless configured otherwise.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

/// Gate props as a UI consumer supplies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateProps {
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub require_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Nothing requested: always granted.
    Open,
    Single(String),
    AnyOf(Vec<String>),
    AllOf(Vec<String>),
}

impl Gate {
    /// A single `permission` takes precedence over a `permissions` list.
    pub fn from_props(props: GateProps) -> Self {
        match (props.permission, props.permissions) {
            (Some(slug), _) => Gate::Single(slug),
            (None, Some(list)) if props.require_all => Gate::AllOf(list),
            (None, Some(list)) => Gate::AnyOf(list),
            (None, None) => Gate::Open,
        }
    }

    pub fn allows(&self, user: Option<&User>) -> bool {
        match self {
            Gate::Open => true,
            Gate::Single(slug) => has_permission(user, slug),
            Gate::AnyOf(list) => has_any_permission(user, list),
            Gate::AllOf(list) => has_all_permissions(user, list),
        }
    }

    /// `children` when allowed, otherwise `fallback` (`None` renders nothing).
    pub fn render<T>(&self, user: Option<&User>, children: T, fallback: Option<T>) -> Option<T> {
        if self.allows(user) {
            Some(children)
        } else {
            fallback
        }
    }
}

impl From<GateProps> for Gate {
    fn from(props: GateProps) -> Self {
        Self::from_props(props)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Allow,
    Redirect(String),
}

/// Route protection: allow when the user holds any required permission,
/// redirect otherwise. No requirement list means no gating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    required_permissions: Option<Vec<String>>,
    redirect_to: String,
}

impl RouteGuard {
    pub fn new(required_permissions: Option<Vec<String>>) -> Self {
        Self {
            required_permissions,
            redirect_to: DEFAULT_REDIRECT.to_string(),
        }
    }

    pub fn redirect_to(mut self, location: impl Into<String>) -> Self {
        self.redirect_to = location.into();
        self
    }

    pub fn check(&self, user: Option<&User>) -> GuardOutcome {
        let allowed = match &self.required_permissions {
            None => true,
            Some(list) => has_any_permission(user, list),
        };
        if allowed {
            GuardOutcome::Allow
        } else {
            GuardOutcome::Redirect(self.redirect_to.clone())
        }
    }
}

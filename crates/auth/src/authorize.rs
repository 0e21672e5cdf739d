use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::{can_access_route, has_permission};
use crate::{GrantSet, RoutePermissionMap, User};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error("route '{0}' is not accessible")]
    RouteDenied(String),
}

/// Boundary check: `Ok` iff the user holds `slug`.
///
/// - No IO
/// - No panics
pub fn require_permission(user: Option<&User>, slug: &str) -> Result<(), AccessError> {
    if has_permission(user, slug) {
        Ok(())
    } else {
        Err(AccessError::Forbidden(slug.to_string()))
    }
}

/// Boundary check: `Ok` iff the user can reach `route_path`.
pub fn require_route(
    user: Option<&User>,
    routes: &RoutePermissionMap,
    route_path: &str,
) -> Result<(), AccessError> {
    if can_access_route(user, routes, route_path, None) {
        Ok(())
    } else {
        Err(AccessError::RouteDenied(route_path.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Access Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// A question put to the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessRequest {
    Permission { slug: String },
    AnyOf { slugs: Vec<String> },
    AllOf { slugs: Vec<String> },
    Route {
        path: String,
        #[serde(default)]
        pattern: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoUser,
    NoRole,
    NoPermissionList,
    EmptyRequirement,
    MissingPermission,
    UnmappedRoute,
}

/// Why a request was granted or denied.
///
/// `granted` always agrees with the matching boolean resolver call.
#[derive(Debug, Clone, Serialize)]
pub struct AccessExplanation {
    pub request: AccessRequest,
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Required slugs the user holds.
    pub held: Vec<String>,

    /// Required slugs the user lacks.
    pub missing: Vec<String>,

    pub denial: Option<DenialKind>,
}

#[derive(Clone, Copy)]
enum Mode {
    Any,
    All,
}

/// Explain how the resolver would answer `request` for `user`.
pub fn explain(
    user: Option<&User>,
    routes: &RoutePermissionMap,
    request: AccessRequest,
) -> AccessExplanation {
    let resolved = match &request {
        AccessRequest::Permission { slug } => Ok((vec![slug.clone()], Mode::All)),
        AccessRequest::AnyOf { slugs } => Ok((slugs.clone(), Mode::Any)),
        AccessRequest::AllOf { slugs } => Ok((slugs.clone(), Mode::All)),
        AccessRequest::Route { path, pattern } => match routes.resolve(path, pattern.as_deref()) {
            Some(r) => Ok((r.slugs.iter().map(|s| s.to_string()).collect(), Mode::Any)),
            None => Err(format!("route '{path}' is not mapped to any permission")),
        },
    };
    let (required, mode) = match resolved {
        Ok(v) => v,
        Err(reason) => return denied(request, reason, Vec::new(), DenialKind::UnmappedRoute),
    };

    if required.is_empty() {
        return denied(
            request,
            "empty requirement list is never granted".to_string(),
            Vec::new(),
            DenialKind::EmptyRequirement,
        );
    }

    let Some(user) = user else {
        return denied(request, "no authenticated user".to_string(), required, DenialKind::NoUser);
    };
    let Some(role) = user.role.as_ref() else {
        let reason = format!("user {} has no role", user.id);
        return denied(request, reason, required, DenialKind::NoRole);
    };
    if role.permissions.is_none() {
        let reason = format!("role '{}' carries no permission list", role.name);
        return denied(request, reason, required, DenialKind::NoPermissionList);
    }

    let grants = GrantSet::from_user(Some(user));
    let (held, missing): (Vec<String>, Vec<String>) =
        required.into_iter().partition(|s| grants.contains(s));

    let granted = match mode {
        Mode::Any => !held.is_empty(),
        Mode::All => missing.is_empty(),
    };

    tracing::debug!(user = %user.id, granted, ?held, ?missing, "access explanation");

    if granted {
        AccessExplanation {
            reason: format!("role '{}' grants {:?}", role.name, held),
            request,
            granted,
            held,
            missing,
            denial: None,
        }
    } else {
        AccessExplanation {
            reason: format!("role '{}' lacks {:?}", role.name, missing),
            request,
            granted,
            held,
            missing,
            denial: Some(DenialKind::MissingPermission),
        }
    }
}

fn denied(
    request: AccessRequest,
    reason: String,
    missing: Vec<String>,
    kind: DenialKind,
) -> AccessExplanation {
    AccessExplanation {
        request,
        granted: false,
        reason,
        held: Vec::new(),
        missing,
        denial: Some(kind),
    }
}

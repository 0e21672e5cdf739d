//! Request/response bodies for the access endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arena_auth::PermissionRecord;
use arena_core::UserId;

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub granted: bool,
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub path: String,
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub granted: bool,
    /// Template the path resolved to, if mapped.
    pub route: Option<String>,
    /// Where a denied client should go.
    pub redirect: Option<String>,
}

/// Strict boundary check: exactly one of `permission` or `path`.
#[derive(Debug, Deserialize)]
pub struct RequireQuery {
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GuardQuery {
    #[serde(default)]
    pub path: Option<String>,
    /// Comma-separated slugs; overrides the route map when present.
    #[serde(default)]
    pub required: Option<String>,
}

impl GuardQuery {
    pub fn required_list(&self) -> Option<Vec<String>> {
        self.required.as_ref().map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct PatternQuery {
    #[serde(default)]
    pub pattern: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: UserId,
    pub name: String,
    pub role: Option<String>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PermissionsResponse {
    pub permissions: Vec<PermissionRecord>,
}

#[derive(Debug, Serialize)]
pub struct ExistsResponse {
    pub slug: String,
    pub exists: bool,
}

#[derive(Debug, Serialize)]
pub struct CatalogStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub count: usize,
    pub routes: usize,
}

//! Catalog queries. These describe what the backend knows about, not what
//! the current user holds, so they need no grant.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_permissions))
        .route("/grouped", get(grouped_permissions))
        .route("/:slug/exists", get(permission_exists))
}

/// GET /permissions?pattern= - catalog entries whose slug contains `pattern`
pub async fn list_permissions(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::PatternQuery>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    let catalog = &state.snapshot.catalog;
    let permissions = match query.pattern.as_deref() {
        Some(pattern) => catalog.by_pattern(pattern).into_iter().cloned().collect(),
        None => catalog.records().to_vec(),
    };
    Json(dto::PermissionsResponse { permissions })
}

/// GET /permissions/grouped - catalog grouped by resource (role editors)
pub async fn grouped_permissions(
    Extension(services): Extension<Arc<AppServices>>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    Json(serde_json::json!({ "groups": state.snapshot.catalog.grouped_by_resource() }))
}

/// GET /permissions/:slug/exists - is this a permission the backend knows
pub async fn permission_exists(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    let exists = state.snapshot.catalog.exists(&slug);
    Json(dto::ExistsResponse { slug, exists })
}

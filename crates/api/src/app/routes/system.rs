use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::CurrentUser;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /me - current user and their granted slugs
pub async fn me(Extension(current): Extension<CurrentUser>) -> axum::response::Response {
    let Some(user) = current.user() else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "no authenticated user");
    };

    let grants = current.grants();
    Json(dto::MeResponse {
        id: user.id,
        name: user.name.clone(),
        role: user.role.as_ref().map(|r| r.name.clone()),
        permissions: grants.sorted().into_iter().map(str::to_string).collect(),
    })
    .into_response()
}

/// GET /catalog/status - loading/error flags of the catalog snapshot
pub async fn catalog_status(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let state = services.catalog.read().await;
    Json(dto::CatalogStatus {
        is_loading: state.snapshot.is_loading,
        error: state.snapshot.error.clone(),
        fetched_at: state.snapshot.fetched_at,
        count: state.snapshot.catalog.len(),
        routes: state.routes.len(),
    })
}

//! Access decisions for UI consumers: gate checks, route checks, the
//! redirect guard, explanations and the filtered navigation menu.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};

use arena_auth::{
    can_access_route, explain, require_permission, require_route, visible_entries, AccessRequest,
    Gate, GateProps, GuardOutcome, RouteGuard,
};

use crate::app::{dto, errors, services::AppServices};
use crate::context::CurrentUser;

pub fn router() -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/route", get(route))
        .route("/explain", post(explain_request))
        .route("/require", get(require))
}

/// POST /access/check - evaluate gate props for the current user
pub async fn check(
    Extension(current): Extension<CurrentUser>,
    Json(props): Json<GateProps>,
) -> impl IntoResponse {
    let granted = Gate::from_props(props).allows(current.user());
    Json(dto::CheckResponse { granted })
}

/// GET /access/route?path=&pattern= - can the current user reach a screen
pub async fn route(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<dto::RouteQuery>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    let granted = can_access_route(
        current.user(),
        &state.routes,
        &query.path,
        query.pattern.as_deref(),
    );
    let route = state.routes.lookup(&query.path).map(|e| e.template.clone());

    Json(dto::RouteResponse {
        granted,
        route,
        redirect: (!granted).then(|| services.default_redirect.clone()),
    })
}

/// GET /access/require?permission=|path= - strict check for service boundaries
///
/// 204 when allowed, 403 with a JSON error body when denied.
pub async fn require(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<dto::RequireQuery>,
) -> axum::response::Response {
    let result = match (query.permission.as_deref(), query.path.as_deref()) {
        (Some(slug), None) => require_permission(current.user(), slug),
        (None, Some(path)) => {
            let state = services.catalog.read().await;
            require_route(current.user(), &state.routes, path)
        }
        _ => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_require_query",
                "exactly one of permission or path must be given",
            );
        }
    };

    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::access_error_to_response(e),
    }
}

/// POST /access/explain - why a request would be granted or denied
pub async fn explain_request(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Json(request): Json<AccessRequest>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    Json(explain(current.user(), &state.routes, request))
}

/// GET /guard?path=&required= - route protection for a reverse proxy or SPA shell.
///
/// 204 when allowed, 303 to the default location when denied. `required`
/// replaces the route-map lookup with an explicit any-of list.
pub async fn guard(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<dto::GuardQuery>,
) -> axum::response::Response {
    let outcome = match (query.required_list(), query.path.as_deref()) {
        (Some(required), _) => RouteGuard::new(Some(required))
            .redirect_to(services.default_redirect.clone())
            .check(current.user()),
        (None, Some(path)) => {
            let state = services.catalog.read().await;
            if can_access_route(current.user(), &state.routes, path, None) {
                GuardOutcome::Allow
            } else {
                GuardOutcome::Redirect(services.default_redirect.clone())
            }
        }
        (None, None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_guard_query",
                "either path or required must be given",
            );
        }
    };

    match outcome {
        GuardOutcome::Allow => StatusCode::NO_CONTENT.into_response(),
        GuardOutcome::Redirect(location) => {
            tracing::debug!(path = ?query.path, %location, "guard redirect");
            Redirect::to(&location).into_response()
        }
    }
}

/// GET /navigation - menu entries the current user can reach
pub async fn navigation(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(current): Extension<CurrentUser>,
) -> impl IntoResponse {
    let state = services.catalog.read().await;
    Json(serde_json::json!({ "items": visible_entries(current.user(), &state.routes) }))
}


use axum::{routing::get, Router};

pub mod access;
pub mod permissions;
pub mod system;

/// Router for every endpoint behind the auth middleware.
pub fn router() -> Router {
    Router::new()
        .route("/me", get(system::me))
        .route("/catalog/status", get(system::catalog_status))
        .route("/guard", get(access::guard))
        .route("/navigation", get(access::navigation))
        .nest("/access", access::router())
        .nest("/permissions", permissions::router())
}

use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::context::CurrentUser;
use crate::directory::UserDirectory;

#[derive(Clone)]
pub struct AuthState {
    pub users: Arc<dyn UserDirectory>,
}

/// Resolve the bearer token to a user and attach it to the request.
///
/// Missing, malformed or unknown tokens continue as anonymous; every access
/// check then denies.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let user = extract_bearer(req.headers()).and_then(|token| state.users.user_for_token(token));
    if user.is_none() {
        tracing::debug!(path = %req.uri().path(), "anonymous request");
    }

    req.extensions_mut().insert(CurrentUser::new(user));
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

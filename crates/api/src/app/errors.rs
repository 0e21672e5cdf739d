use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use arena_auth::AccessError;

pub fn access_error_to_response(err: AccessError) -> axum::response::Response {
    match err {
        AccessError::Forbidden(_) => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
        AccessError::RouteDenied(_) => json_error(StatusCode::FORBIDDEN, "route_denied", err.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

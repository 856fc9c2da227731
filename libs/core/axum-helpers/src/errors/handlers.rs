use axum::{
    extract::Request,
    http::StatusCode,
    response::Response,
};

use super::{ErrorCode, error_response};

/// Handler for 404 Not Found errors.
///
/// This can be used as a fallback handler in your router.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// Handler for 405 Method Not Allowed errors.
///
/// Use it as a `MethodRouter` fallback so unsupported verbs answer with the
/// standard JSON error body instead of an empty 405.
pub async fn method_not_allowed(request: Request) -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("Method {} not allowed", request.method()),
        ErrorCode::MethodNotAllowed,
    )
}

//! The response for routes that do not exist.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Fallback route handler for unknown paths.
pub async fn get_404_not_found() -> Response {
    not_found_response()
}

/// A 404 response with the body `{"error": "Not found"}`.
pub fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

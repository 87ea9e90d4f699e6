use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Contract every service error enum fulfils to be rendered as
/// `{ "kind": ..., "message": ..., "fields"?: ... }`.
pub trait ServiceError: std::error::Error {
    /// Stable SCREAMING_SNAKE_CASE identifier clients switch on.
    fn kind(&self) -> &'static str;

    fn status(&self) -> StatusCode;

    /// Extra per-field detail (validation errors).
    fn fields(&self) -> Option<serde_json::Value> {
        None
    }

    /// The underlying cause when this is an internal (500) error.
    fn internal(&self) -> Option<&anyhow::Error> {
        None
    }
}

/// Render a service error as a JSON response.
pub fn error_response<E: ServiceError>(error: &E) -> Response {
    // Log 500s only; tower-http TraceLayer already records method/uri/status for all
    // requests. 4xx are expected client errors; logging them here would be noise.
    if let Some(e) = error.internal() {
        tracing::error!(error = ?e, kind = error.kind(), "internal error");
    }
    let mut body = serde_json::json!({
        "kind": error.kind(),
        "message": error.to_string(),
    });
    if let Some(fields) = error.fields() {
        body["fields"] = fields;
    }
    (error.status(), axum::Json(body)).into_response()
}

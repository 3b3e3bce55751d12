//! Domain error to HTTP response mapping
//!
//! Kind-to-status: Validation and Conflict map to 400, NotFound to 404,
//! everything else to 500. The body shape is
//! `{status, title, messages[], path}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

/// Structured error body returned to clients
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// HTTP status code
    pub status: u16,
    /// Short error title
    pub title: String,
    /// One entry per problem
    pub messages: Vec<String>,
    /// Request path the error occurred on
    pub path: String,
}

/// A domain error bound to the request path it occurred on
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    title: &'static str,
    messages: Vec<String>,
    path: String,
}

impl ApiError {
    /// Map a core error onto its HTTP representation
    pub fn from_domain(err: desk_core::Error, path: &str) -> Self {
        let (status, title, messages) = match err {
            desk_core::Error::Validation { messages } => {
                (StatusCode::BAD_REQUEST, "Validation Error", messages)
            }
            desk_core::Error::Conflict(message) => {
                (StatusCode::BAD_REQUEST, "Business Error", vec![message])
            }
            desk_core::Error::NotFound(message) => {
                (StatusCode::NOT_FOUND, "Resource Not Found", vec![message])
            }
            other => {
                tracing::error!(error = %other, path, "unclassified failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    vec![format!("Internal server error: {other}")],
                )
            }
        };

        Self {
            status,
            title,
            messages,
            path: path.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: self.status.as_u16(),
            title: self.title.to_string(),
            messages: self.messages,
            path: self.path,
        };
        (self.status, Json(body)).into_response()
    }
}

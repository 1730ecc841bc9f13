//! JSON error responses.
//!
//! # Responsibilities
//! - Render request-time failures as `{"message": ...}` bodies
//! - Map unmatched routes to 404, wrong methods to 405 and placeholder
//!   endpoints to 501
//!
//! # Design Decisions
//! - Routing failures and handler errors have JSON bodies
//! - Middleware rejections (408 timeout, 413 body limit) keep axum's plain bodies
//! - The status code carries the failure class; the message is for humans

use axum::{
    extract::OriginalUri,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// An error returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("The requested URL {path} was not found on the server"),
        )
    }

    pub fn method_not_allowed(method: &Method, path: &str) -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            format!("The method {method} is not allowed for the requested URL {path}"),
        )
    }

    pub fn not_implemented(operation: &str) -> Self {
        Self::new(
            StatusCode::NOT_IMPLEMENTED,
            format!("{operation} is not implemented"),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

/// Router fallback for paths no namespace serves.
pub async fn fallback(uri: Uri) -> ApiError {
    tracing::debug!(path = %uri.path(), "No route matched");
    ApiError::not_found(uri.path())
}

/// Fallback for known paths requested with an undeclared method.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!(method = %method, path = %uri.path(), "Method not allowed");
    ApiError::method_not_allowed(&method, uri.path())
}

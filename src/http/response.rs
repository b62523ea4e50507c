//! Error responses.
//!
//! # Responsibilities
//! - Define the request-level error taxonomy
//! - Map errors to HTTP status codes and a JSON body
//! - Turn handler panics into 500 responses
//! - Give middleware-produced errors (timeouts, body limits, unknown routes)
//!   the same JSON body

use std::any::Any;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    middleware::Next,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors a request can end in.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Input that fails basic type coercion.
    #[error("{0}")]
    InvalidInput(String),

    /// Unexpected failure while computing a response.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        json_error(self.status(), self.code(), self.to_string())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Error code for a status the handlers do not render themselves.
pub fn error_code(status: StatusCode) -> &'static str {
    match status {
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::METHOD_NOT_ALLOWED => "method_not_allowed",
        StatusCode::REQUEST_TIMEOUT => "timeout",
        StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
        s if s.is_server_error() => "internal",
        _ => "invalid_input",
    }
}

/// Rewrite 4xx/5xx responses that are not already JSON into the error body.
///
/// Covers responses produced outside the handlers: `TimeoutLayer` (408),
/// `RequestBodyLimitLayer` and body extraction (413), routing (404, 405).
pub async fn json_error_bodies(request: Request<Body>, next: Next) -> axum::response::Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response;
    }

    let message = status.canonical_reason().unwrap_or("request failed");
    let mut rewritten = json_error(status, error_code(status), message);
    if let Some(allow) = response.headers().get(header::ALLOW) {
        rewritten.headers_mut().insert(header::ALLOW, allow.clone());
    }
    rewritten
}

/// Panic handler for `CatchPanicLayer`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::Internal("internal server error".to_string()).into_response()
}

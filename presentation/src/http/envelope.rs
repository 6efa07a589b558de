//! Uniform response envelope and header set

use axum::Json;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_MAX_AGE, HeaderName, X_CONTENT_TYPE_OPTIONS,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

/// Where the service's source code lives
pub const SOURCE_ATTRIBUTION: &str = "https://github.com/molikai-work/hitokoto-cloudflare";

pub const X_SOURCE_CODE: HeaderName = HeaderName::from_static("x-source-code");

/// Message shown for 500 responses unless debug output is enabled
pub const GENERIC_INTERNAL_ERROR: &str = "internal server error";

/// Error body: `{code, message, timestamp}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Mirrors the HTTP status
    pub code: u16,
    pub message: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl ErrorEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Envelope for an unexpected failure, redacted unless `expose` is set
    pub fn internal(detail: &str, expose: bool) -> Self {
        let message = if expose { detail } else { GENERIC_INTERNAL_ERROR };
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// The CORS and security headers every response carries
pub fn standard_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(6);
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_SOURCE_CODE, HeaderValue::from_static(SOURCE_ATTRIBUTION));
    headers
}

/// Response middleware applying [`standard_headers`]
pub async fn apply_standard_headers(mut response: Response) -> Response {
    response.headers_mut().extend(standard_headers());
    response
}

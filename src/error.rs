// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::{JwtError, PasswordError};
use crate::database::DatabaseError;
use crate::filter::FilterError;
use crate::media::MediaError;

/// HTTP API error rendered as a `{status, message, data}` envelope.
///
/// `message` is the short human label; `detail` (when present) is surfaced
/// as `data.error`, which for downstream failures is the raw driver or
/// upload error text.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest { message: String, detail: Option<String> },

    // 401 Unauthorized
    Unauthorized { message: String, detail: Option<String> },

    // 404 Not Found
    NotFound { message: String, detail: Option<String> },

    // 409 Conflict
    Conflict { message: String, detail: Option<String> },

    // 500 Internal Server Error
    InternalServerError { message: String, detail: Option<String> },

    // 503 Service Unavailable
    ServiceUnavailable { message: String, detail: Option<String> },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest { .. } => 400,
            ApiError::Unauthorized { .. } => 401,
            ApiError::NotFound { .. } => 404,
            ApiError::Conflict { .. } => 409,
            ApiError::InternalServerError { .. } => 500,
            ApiError::ServiceUnavailable { .. } => 503,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest { message, .. }
            | ApiError::Unauthorized { message, .. }
            | ApiError::NotFound { message, .. }
            | ApiError::Conflict { message, .. }
            | ApiError::InternalServerError { message, .. }
            | ApiError::ServiceUnavailable { message, .. } => message,
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::BadRequest { detail, .. }
            | ApiError::Unauthorized { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Conflict { detail, .. }
            | ApiError::InternalServerError { detail, .. }
            | ApiError::ServiceUnavailable { detail, .. } => detail.as_deref(),
        }
    }

    /// Attach the underlying error text reported under `data.error`.
    pub fn with_detail(mut self, error: impl std::fmt::Display) -> Self {
        let text = error.to_string();
        match &mut self {
            ApiError::BadRequest { detail, .. }
            | ApiError::Unauthorized { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Conflict { detail, .. }
            | ApiError::InternalServerError { detail, .. }
            | ApiError::ServiceUnavailable { detail, .. } => *detail = Some(text),
        }
        self
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let data = match self.detail() {
            Some(detail) => json!({ "error": detail }),
            None => Value::Null,
        };

        json!({
            "status": self.status_code(),
            "message": self.message(),
            "data": data
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest { message: message.into(), detail: None }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized { message: message.into(), detail: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound { message: message.into(), detail: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict { message: message.into(), detail: None }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError { message: message.into(), detail: None }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable { message: message.into(), detail: None }
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => ApiError::not_found(format!("{} not found", what)),
            DatabaseError::InvalidId(_) => ApiError::bad_request("error").with_detail(&err),
            DatabaseError::Duplicate(_) => ApiError::conflict("error").with_detail(&err),
            DatabaseError::Timeout => {
                tracing::error!("Database deadline exceeded");
                ApiError::internal_server_error("error").with_detail(&err)
            }
            DatabaseError::Encode(ref encode_err) => {
                tracing::error!("Document encoding error: {}", encode_err);
                ApiError::internal_server_error("error").with_detail(encode_err)
            }
            DatabaseError::Mongo(ref mongo_err) => {
                tracing::error!("MongoDB error: {}", mongo_err);
                ApiError::internal_server_error("error").with_detail(mongo_err)
            }
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::bad_request("error").with_detail(err)
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        tracing::error!("Token generation failed: {}", err);
        ApiError::internal_server_error("error").with_detail(err)
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Password hashing failed: {}", err);
        ApiError::internal_server_error("error").with_detail("failed to hash password")
    }
}

impl From<MediaError> for ApiError {
    fn from(err: MediaError) -> Self {
        tracing::error!("Media upload error: {}", err);
        ApiError::internal_server_error("Error uploading image").with_detail(err)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.message(), detail),
            None => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

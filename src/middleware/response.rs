use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Success envelope: `{status, message, data}`.
///
/// `status` in the body normally mirrors the HTTP status, but list endpoints
/// answer an empty page with HTTP 200 and body status 204 (see [`ApiResponse::empty`]).
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub message: String,
    pub status_code: StatusCode,
    pub body_status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response with default 200 status
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// Create an API response with custom status code
    pub fn with_status(status_code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status_code,
            body_status: status_code,
        }
    }

    /// Create a 201 Created response
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }

    /// HTTP 200 carrying a body status of 204 for an empty result page.
    pub fn empty(message: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            message: message.into(),
            status_code: StatusCode::OK,
            body_status: StatusCode::NO_CONTENT,
        }
    }
}

impl ApiResponse<()> {
    /// Response whose `data` is `null`.
    pub fn without_data(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: message.into(),
            status_code,
            body_status: status_code,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match self.data.as_ref().map(serde_json::to_value).transpose() {
            Ok(value) => value.unwrap_or(Value::Null),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "status": 500,
                        "message": "error",
                        "data": { "error": "Failed to serialize response data" }
                    })),
                )
                    .into_response();
            }
        };

        let envelope = json!({
            "status": self.body_status.as_u16(),
            "message": self.message,
            "data": data_value
        });

        (self.status_code, Json(envelope)).into_response()
    }
}

// Convenience type aliases
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

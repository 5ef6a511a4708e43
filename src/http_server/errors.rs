//! # HTTP API Errors
//!
//! Maps thermostat service errors and request problems to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::thermostat::ServiceError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Domain Errors
    // ==================
    /// Error raised by the thermostat service
    #[error("{0}")]
    Service(#[from] ServiceError),

    // ==================
    // Request Errors
    // ==================
    /// Write request without a Content-Type header
    #[error("missing Content-Type header")]
    MissingContentType,

    /// Write request with a Content-Type other than application/json
    #[error("unsupported Content-Type: {0}")]
    UnsupportedMediaType(String),

    /// Request body is not valid JSON
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),

    /// Request body is valid JSON but not an object
    #[error("payload must be a JSON object")]
    NotAnObject,

    /// No route for the requested path
    #[error("not found")]
    NotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(err) => match err {
                ServiceError::UnknownThermostat(_) | ServiceError::UnknownAttribute(_) => {
                    StatusCode::NOT_FOUND
                }
                ServiceError::Readonly(_) => StatusCode::FORBIDDEN,
                ServiceError::Validation { .. } => StatusCode::BAD_REQUEST,
            },

            ApiError::MissingContentType => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotAnObject => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_status_codes() {
        assert_eq!(
            ApiError::from(ServiceError::unknown_thermostat("102")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ServiceError::unknown_attribute("fake")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ServiceError::readonly("id")).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(ServiceError::validation("name", "value cannot be blank")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_request_error_status_codes() {
        assert_eq!(ApiError::MissingContentType.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnsupportedMediaType("text/plain".to_string()).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(ApiError::NotAnObject.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal("poisoned".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let body = ErrorResponse::from(ApiError::from(ServiceError::readonly("current-temp")));
        assert_eq!(body.code, 403);
        assert_eq!(body.error, "value is readonly");
    }
}

//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::service::PauseError;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    BadGateway(String),
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => {
                tracing::error!("Control plane error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<PauseError> for ApiError {
    fn from(err: PauseError) -> Self {
        match err {
            PauseError::UnknownPipelineSystem(_) => ApiError::NotFound(err.to_string()),
            PauseError::EventNotFound(id) => ApiError::NotFound(format!("Event '{}' was not found.", id)),
            PauseError::MultiplePauseEventsFound(id) => ApiError::Conflict(format!(
                "Multiple events found with ID '{}'? Should not happen - check the object store.",
                id
            )),
            PauseError::HistoricalEventNotFound { .. } => ApiError::InternalError(err.to_string()),
            PauseError::Store(err) => {
                tracing::error!("Storage error: {:?}", err);
                ApiError::InternalError("Pause event storage failed".to_string())
            }
            PauseError::Control(err) => ApiError::BadGateway(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

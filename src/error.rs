use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure inside the enhancement pipeline.
///
/// Decode failures are the only early exit; everything after decoding either
/// succeeds or surfaces as an encode failure.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("image decode error: {0}")]
    Decode(String),

    #[error("PDF encode error: {0}")]
    Encode(String),
}

/// Error surfaced by an HTTP handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Malformed multipart request: {0}")]
    Multipart(String),

    #[error("Not found")]
    NotFound,

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingField(_) | ApiError::InvalidField { .. } | ApiError::Multipart(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            // Undecodable uploads are a client problem; everything else that
            // goes wrong during processing is ours.
            ApiError::Process(ProcessError::Decode(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Process(ProcessError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

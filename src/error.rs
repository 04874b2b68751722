// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Hard failures of a chat request. Remote-service faults never end up here;
/// the dispatcher turns those into ordinary replies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("no message provided")]
    EmptyMessage,
    #[error("invalid request body: {detail}")]
    InvalidBody { status: StatusCode, detail: String },
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            RequestError::EmptyMessage => (StatusCode::BAD_REQUEST, "No message provided"),
            RequestError::InvalidBody { status, detail } => (*status, detail.as_str()),
            RequestError::Internal(detail) => {
                tracing::error!(%detail, "chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

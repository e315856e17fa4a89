use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const SUCCESS_MESSAGE: &str = "Message saved & email sent!";
pub const FAILURE_MESSAGE: &str = "Server error";

/// Body returned by the submission route, for success and failure alike.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: &'static str,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE,
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            message: FAILURE_MESSAGE,
        }
    }
}

#[derive(Debug)]
pub enum SubmitError {
    InvalidPayload(String),
    Store(sqlx::Error),
    Notify(String),
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::InvalidPayload(msg) => write!(f, "Invalid payload: {msg}"),
            SubmitError::Store(err) => write!(f, "Store error: {err}"),
            SubmitError::Notify(msg) => write!(f, "Notification error: {msg}"),
        }
    }
}

impl std::error::Error for SubmitError {}

impl IntoResponse for SubmitError {
    fn into_response(self) -> Response {
        // Detail stays in the logs; callers only ever see the generic body.
        match &self {
            SubmitError::InvalidPayload(_) => tracing::warn!("Submission rejected: {self}"),
            SubmitError::Store(_) | SubmitError::Notify(_) => {
                tracing::error!("Submission failed: {self}")
            }
        }

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::failed())).into_response()
    }
}

impl From<sqlx::Error> for SubmitError {
    fn from(err: sqlx::Error) -> Self {
        SubmitError::Store(err)
    }
}

impl From<JsonRejection> for SubmitError {
    fn from(rejection: JsonRejection) -> Self {
        SubmitError::InvalidPayload(rejection.body_text())
    }
}

//! HTTP error mapping
//!
//! Every failure reaches the client as `{"detail": "..."}`. Internal errors
//! are logged with a generated error id and never leak their cause.

use crate::auth::jwt::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use edprep_mentorship::MentorshipError;
use serde_json::json;
use std::any::Any;
use tracing::{error, warn};
use uuid::Uuid;

pub const INTERNAL_ERROR_DETAIL: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<MentorshipError> for ApiError {
    fn from(err: MentorshipError) -> Self {
        match err {
            MentorshipError::NotFound { .. } => Self::NotFound(err.to_string()),
            MentorshipError::Forbidden { .. } => Self::Forbidden(err.to_string()),
            MentorshipError::Validation { .. }
            | MentorshipError::Duplicate { .. }
            | MentorshipError::InvalidTransition { .. } => Self::BadRequest(err.to_string()),
            MentorshipError::Internal { message } => Self::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Auth(auth) => return auth.into_response(),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Forbidden(detail) => (StatusCode::FORBIDDEN, detail),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            ApiError::MethodNotAllowed(detail) => (StatusCode::METHOD_NOT_ALLOWED, detail),
            ApiError::Internal(cause) => {
                let error_id = Uuid::new_v4();
                error!(%error_id, cause = %cause, "Request failed");
                return internal_error_response();
            }
        };

        warn!(status = status.as_u16(), detail = %detail, "Request rejected");
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": INTERNAL_ERROR_DETAIL })),
    )
        .into_response()
}

/// Converts a handler panic into the standard 500 body
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let cause = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    let error_id = Uuid::new_v4();
    error!(%error_id, cause = %cause, "Handler panicked");
    internal_error_response()
}

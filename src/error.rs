use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::services::assistant::FallbackFailure;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("All models failed")]
    AllModelsFailed(FallbackFailure),

    /// Raw upstream payload relayed when a single-shot call produced no
    /// completion. The body is passed through unmodified under `error`.
    #[error("Upstream rejected the request")]
    UpstreamRejected(Value),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

impl From<FallbackFailure> for AppError {
    fn from(failure: FallbackFailure) -> Self {
        AppError::AllModelsFailed(failure)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::AllModelsFailed(failure) => {
                for attempt in &failure.attempts {
                    tracing::warn!(
                        model = %attempt.model,
                        reason = %attempt.reason,
                        "Fallback attempt failed"
                    );
                }
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "All models failed" }),
                )
            }
            AppError::UpstreamRejected(payload) => {
                (StatusCode::BAD_REQUEST, json!({ "error": payload }))
            }
            AppError::ConfigError(err) | AppError::InternalError(err) => {
                tracing::error!("Unhandled error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::github::GitHubError;
use crate::interpret::ClassifiedError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("LLM call timed out after {0}s")]
    LlmTimeout(u64),

    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// The model answered, but its output could not be interpreted.
    #[error("Interpretation error: {0}")]
    Interpretation(#[from] ClassifiedError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut raw_preview = None;

        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Could not read access token".to_string(),
            ),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "The AI service could not be reached".to_string(),
                )
            }
            AppError::LlmTimeout(secs) => {
                tracing::error!("LLM call timed out after {secs}s");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "LLM_TIMEOUT",
                    "The AI service did not respond in time".to_string(),
                )
            }
            AppError::GitHub(GitHubError::Unauthorized) => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "GitHub rejected the access token".to_string(),
            ),
            AppError::GitHub(GitHubError::NotFound(path)) => {
                tracing::warn!("GitHub resource not found: {path}");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "The requested GitHub resource was not found".to_string(),
                )
            }
            AppError::GitHub(e) => {
                tracing::error!("GitHub error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GITHUB_ERROR",
                    "GitHub could not be reached".to_string(),
                )
            }
            AppError::Interpretation(e) => {
                raw_preview = Some(e.raw_preview.clone());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    e.kind.code(),
                    format!(
                        "Failed to interpret AI response. The format was not as expected ({}).",
                        e.kind
                    ),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(preview) = raw_preview {
            error["raw_preview"] = json!(preview);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

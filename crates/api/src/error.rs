use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use scriptflow_audio::NarrationError;
use scriptflow_core::error::CoreError;
use scriptflow_gemini::GeminiError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and upstream error taxonomies and implements
/// [`IntoResponse`] to produce consistent `{ "error", "code" }` JSON.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `scriptflow_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A classified text-generation failure.
    #[error(transparent)]
    Gemini(#[from] GeminiError),

    /// A narration pipeline failure (TTS or storage upload).
    #[error(transparent)]
    Narration(#[from] NarrationError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// HTTP status, stable error code, and user-facing message for this
    /// error. Split out of `into_response` so tests can assert the
    /// mapping without building a response body.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // Each taxonomy class gets its own stable code so the client
            // can render the matching blocking notification.
            AppError::Gemini(err) => match err {
                GeminiError::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK", err.to_string()),
                GeminiError::ModelNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "MODEL_NOT_FOUND", err.to_string())
                }
                GeminiError::Auth => (StatusCode::BAD_GATEWAY, "AUTH", err.to_string()),
                GeminiError::EmptyResult => {
                    (StatusCode::BAD_GATEWAY, "EMPTY_RESULT", err.to_string())
                }
                GeminiError::Other(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM", err.to_string()),
            },

            AppError::Narration(err) => match err {
                NarrationError::Tts(inner) => {
                    (StatusCode::BAD_GATEWAY, "TTS_ERROR", inner.to_string())
                }
                NarrationError::Storage(inner) => {
                    (StatusCode::BAD_GATEWAY, "STORAGE_ERROR", inner.to_string())
                }
            },

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

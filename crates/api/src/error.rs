use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use happydate_core::error::CoreError;
use happydate_notify::DispatchError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `happydate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A reminder dispatch run failed before any sends.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// One or more request fields failed validation.
    #[error("invalid fields: {0:?}")]
    InvalidFields(Vec<&'static str>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, json!({ "error": msg }))
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, json!({ "error": msg }))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "internal error" }),
                    )
                }
            },

            AppError::Dispatch(DispatchError::Store(err)) => fetch_failure(err),

            AppError::InvalidFields(fields) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "invalid fields", "fields": fields }),
            ),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Map a store failure onto the 500 contract without leaking connection
/// details into the response body.
fn fetch_failure(err: &sqlx::Error) -> (StatusCode, serde_json::Value) {
    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "failed to fetch events" }),
    )
}

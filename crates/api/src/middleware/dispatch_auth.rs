//! Shared-secret authentication for the reminder dispatch endpoint.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use happydate_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the dispatch secret.
const SECRET_HEADER: &str = "x-reminders-secret";

/// Proof that the caller presented the configured dispatch secret.
///
/// Use this as an extractor parameter on the dispatch handler; extraction
/// runs before the handler body, so an unauthorized caller is rejected
/// before any data access:
///
/// ```ignore
/// async fn dispatch(_auth: DispatchAuth, State(state): State<AppState>) -> AppResult<...> {
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DispatchAuth;

impl FromRequestParts<AppState> for DispatchAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.reminders_secret.as_deref() else {
            tracing::warn!("REMINDERS_SECRET is not configured, rejecting dispatch request");
            return Err(unauthorized());
        };

        let presented = parts
            .headers
            .get(SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        if presented != expected {
            return Err(unauthorized());
        }

        Ok(DispatchAuth)
    }
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("unauthorized".into()))
}

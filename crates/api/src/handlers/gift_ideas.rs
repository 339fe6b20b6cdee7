//! Handler for `POST /api/v1/gift-ideas`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use axum::Json;
use happydate_core::gift::{self, GiftIdea};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Marker header present on degraded (fallback) responses.
const FALLBACK_HEADER: &str = "x-fallback";

/// Response body: 1–3 ideas, with a marker when the fallback produced them.
#[derive(Debug, Serialize)]
pub struct IdeasResponse {
    pub ideas: Vec<GiftIdea>,
    /// `"fallback"` when generation degraded to the templates. Degraded
    /// responses are still successes; callers may surface "suggestions are
    /// generic" messaging but must not treat this as an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<&'static str>,
}

/// POST /api/v1/gift-ideas
///
/// Validates the request body (accumulating every invalid field name),
/// generates up to three gift ideas, and responds 200 even when generation
/// degraded to the deterministic fallback.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Response> {
    let Json(body) = payload.map_err(|_| AppError::BadRequest("invalid JSON body".into()))?;

    let request = gift::validate_request(&body).map_err(AppError::InvalidFields)?;

    let suggestions = state.gifts.generate(&request).await;

    let response = IdeasResponse {
        ideas: suggestions.ideas,
        note: suggestions.degraded.then_some("fallback"),
    };

    if suggestions.degraded {
        let headers = [(
            HeaderName::from_static(FALLBACK_HEADER),
            HeaderValue::from_static("true"),
        )];
        Ok((headers, Json(response)).into_response())
    } else {
        Ok(Json(response).into_response())
    }
}

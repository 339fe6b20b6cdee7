pub mod health;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /gift-ideas            POST  gift-idea generation
/// /reminders/dispatch    POST  reminder batch trigger (secret-protected)
/// ```
///
/// Unmatched methods on these paths get axum's 405; CORS preflight is
/// answered by the `CorsLayer` installed in `main.rs`.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/gift-ideas", post(handlers::gift_ideas::generate))
        .route("/reminders/dispatch", post(handlers::reminders::dispatch))
}

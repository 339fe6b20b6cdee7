//! Handler for `POST /api/v1/reminders/dispatch`.

use axum::extract::State;
use axum::Json;
use happydate_notify::DispatchOutcome;
use serde_json::json;

use crate::error::AppResult;
use crate::middleware::dispatch_auth::DispatchAuth;
use crate::state::AppState;

/// POST /api/v1/reminders/dispatch
///
/// Runs one reminder dispatch pass for today. Requires the shared dispatch
/// secret (checked by [`DispatchAuth`] before this body runs, so an
/// unauthorized caller triggers zero store reads). Re-running the same day
/// re-sends; there is no delivery dedup record.
pub async fn dispatch(
    _auth: DispatchAuth,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let outcome = state.dispatcher.run().await?;

    let body = match outcome {
        DispatchOutcome::NoEvents => json!({ "status": "no-events" }),
        DispatchOutcome::Completed { sent } => json!({ "status": "ok", "sent": sent }),
    };

    Ok(Json(body))
}

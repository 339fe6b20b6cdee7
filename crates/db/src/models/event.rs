use chrono::NaiveDate;
use happydate_core::types::DbId;
use serde::Serialize;
use uuid::Uuid;

/// An event due for a reminder today, joined with the owner's contact email.
///
/// `email` is `None` when the owner has no profile row or an empty address;
/// the dispatcher skips such events without recording an error.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct DueEvent {
    pub id: DbId,
    pub user_id: Uuid,
    pub title: Option<String>,
    /// Stored category value (`birthday`, `anniversary`, ...). Parsed into
    /// `EventType` at render time; display only.
    pub kind: String,
    pub person: String,
    pub date: NaiveDate,
    pub email: Option<String>,
}

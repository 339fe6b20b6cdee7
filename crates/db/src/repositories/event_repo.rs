//! Repository for the `events` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::DueEvent;

/// Provides read operations for calendar events.
pub struct EventRepo;

impl EventRepo {
    /// List every event whose date equals `date`, joined with the owning
    /// profile's email.
    ///
    /// Ordered by event id so repeated runs process rows in a stable order.
    /// Events whose owner has no profile row still appear, with a `NULL`
    /// email.
    pub async fn list_due_with_contacts(
        pool: &PgPool,
        date: NaiveDate,
    ) -> Result<Vec<DueEvent>, sqlx::Error> {
        sqlx::query_as::<_, DueEvent>(
            "SELECT e.id, e.user_id, e.title, e.type AS kind, e.person, e.date, p.email \
             FROM events e \
             LEFT JOIN profiles p ON p.id = e.user_id \
             WHERE e.date = $1 \
             ORDER BY e.id",
        )
        .bind(date)
        .fetch_all(pool)
        .await
    }
}

//! The daily reminder batch.
//!
//! [`ReminderDispatcher`] fetches every event dated today (in the operating
//! time zone), renders one notification per event, and sends it to the
//! owner's address. Collaborators are injected behind traits so the batch
//! logic runs in tests without a database or SMTP server.
//!
//! Failure semantics: a store fetch error aborts the whole run; a single
//! delivery failure is logged and the batch continues. Re-running the same
//! day re-sends every reminder — there is no "last sent" record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use happydate_core::civil;
use happydate_core::event::EventType;
use happydate_core::reminder::{self, ReminderMessage};
use happydate_db::models::DueEvent;
use happydate_db::repositories::EventRepo;
use happydate_db::DbPool;

use crate::delivery::email::{EmailDelivery, EmailError};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Source of events due on a given date.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn due_events(&self, date: NaiveDate) -> Result<Vec<DueEvent>, sqlx::Error>;
}

/// Sends a rendered reminder to one recipient.
#[async_trait]
pub trait ReminderMailer: Send + Sync {
    async fn deliver(&self, to: &str, message: &ReminderMessage) -> Result<(), EmailError>;
}

/// Provides the current instant. Injected so tests can pin "today".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation of [`Clock`].
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// [`EventSource`] backed by the Postgres events table.
pub struct SqlEventSource {
    pool: DbPool,
}

impl SqlEventSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventSource for SqlEventSource {
    async fn due_events(&self, date: NaiveDate) -> Result<Vec<DueEvent>, sqlx::Error> {
        EventRepo::list_due_with_contacts(&self.pool, date).await
    }
}

#[async_trait]
impl ReminderMailer for EmailDelivery {
    async fn deliver(&self, to: &str, message: &ReminderMessage) -> Result<(), EmailError> {
        self.send(to, message).await
    }
}

/// Mailer used when no SMTP transport is configured. Every delivery fails
/// with [`EmailError::Unconfigured`], which the dispatcher logs per event;
/// the run still completes and reports its attempted count.
pub struct UnconfiguredMailer;

#[async_trait]
impl ReminderMailer for UnconfiguredMailer {
    async fn deliver(&self, _to: &str, _message: &ReminderMessage) -> Result<(), EmailError> {
        Err(EmailError::Unconfigured)
    }
}

// ---------------------------------------------------------------------------
// Outcome / error
// ---------------------------------------------------------------------------

/// Summary of a dispatch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No events matched today's date. A success, not an error.
    NoEvents,
    /// `sent` events had a resolvable address and a delivery was attempted.
    /// Per-event delivery failures are logged, not subtracted.
    Completed { sent: usize },
}

/// Fatal dispatch failure. Only the initial store fetch can fail the run.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to fetch today's events: {0}")]
    Store(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// ReminderDispatcher
// ---------------------------------------------------------------------------

/// Stateless batch job sending one reminder email per event due today.
pub struct ReminderDispatcher {
    events: Arc<dyn EventSource>,
    mailer: Arc<dyn ReminderMailer>,
    clock: Arc<dyn Clock>,
    dashboard_url: String,
}

impl ReminderDispatcher {
    pub fn new(
        events: Arc<dyn EventSource>,
        mailer: Arc<dyn ReminderMailer>,
        clock: Arc<dyn Clock>,
        dashboard_url: String,
    ) -> Self {
        Self {
            events,
            mailer,
            clock,
            dashboard_url,
        }
    }

    /// Run one dispatch pass for today's civil date.
    ///
    /// Events are processed in store order. Owners without a resolvable
    /// email are skipped silently; per-event send failures are logged and
    /// do not abort the batch.
    pub async fn run(&self) -> Result<DispatchOutcome, DispatchError> {
        let today = civil::civil_date(self.clock.now());
        let events = self.events.due_events(today).await?;

        if events.is_empty() {
            tracing::info!(%today, "No events due today");
            return Ok(DispatchOutcome::NoEvents);
        }

        let mut sent = 0usize;
        for event in &events {
            let Some(email) = event.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
            else {
                tracing::debug!(event_id = event.id, "Owner has no email, skipping");
                continue;
            };

            let message = self.render(event);
            sent += 1;

            if let Err(e) = self.mailer.deliver(email, &message).await {
                tracing::error!(event_id = event.id, error = %e, "Failed to send reminder");
            }
        }

        tracing::info!(total = events.len(), sent, "Dispatch pass complete");
        Ok(DispatchOutcome::Completed { sent })
    }

    fn render(&self, event: &DueEvent) -> ReminderMessage {
        reminder::render(
            &event.person,
            event.title.as_deref(),
            EventType::parse(&event.kind),
            event.date,
            &self.dashboard_url,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Mutex;
    use uuid::Uuid;

    // A fixed instant: 2026-08-07 10:00 UTC, i.e. 2026-08-07 in Warsaw.
    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn due_event(id: i64, email: Option<&str>) -> DueEvent {
        DueEvent {
            id,
            user_id: Uuid::nil(),
            title: Some(format!("Event {id}")),
            kind: "birthday".to_string(),
            person: format!("Person {id}"),
            date: today(),
            email: email.map(str::to_string),
        }
    }

    struct FakeSource {
        events: Vec<DueEvent>,
        fail: bool,
    }

    #[async_trait]
    impl EventSource for FakeSource {
        async fn due_events(&self, date: NaiveDate) -> Result<Vec<DueEvent>, sqlx::Error> {
            assert_eq!(date, today());
            if self.fail {
                return Err(sqlx::Error::PoolTimedOut);
            }
            Ok(self.events.clone())
        }
    }

    /// Records every delivery; fails sends addressed to `fail_for`.
    struct RecordingMailer {
        delivered: Mutex<Vec<String>>,
        fail_for: Option<String>,
    }

    impl RecordingMailer {
        fn new() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                fail_for: None,
            }
        }

        fn failing_for(address: &str) -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
                fail_for: Some(address.to_string()),
            }
        }

        fn recipients(&self) -> Vec<String> {
            self.delivered.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReminderMailer for RecordingMailer {
        async fn deliver(&self, to: &str, _message: &ReminderMessage) -> Result<(), EmailError> {
            self.delivered.lock().unwrap().push(to.to_string());
            if self.fail_for.as_deref() == Some(to) {
                return Err(EmailError::Build("simulated failure".to_string()));
            }
            Ok(())
        }
    }

    fn dispatcher(
        events: Vec<DueEvent>,
        mailer: Arc<RecordingMailer>,
    ) -> ReminderDispatcher {
        ReminderDispatcher::new(
            Arc::new(FakeSource {
                events,
                fail: false,
            }),
            mailer,
            Arc::new(FixedClock),
            "https://happydate.pl".to_string(),
        )
    }

    // -----------------------------------------------------------------------
    // Outcomes
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn empty_day_reports_no_events_and_sends_nothing() {
        let mailer = Arc::new(RecordingMailer::new());
        let outcome = dispatcher(vec![], Arc::clone(&mailer)).run().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::NoEvents);
        assert!(mailer.recipients().is_empty());
    }

    #[tokio::test]
    async fn sends_one_email_per_event_in_store_order() {
        let events = vec![
            due_event(1, Some("a@example.com")),
            due_event(2, Some("b@example.com")),
            due_event(3, Some("c@example.com")),
        ];
        let mailer = Arc::new(RecordingMailer::new());
        let outcome = dispatcher(events, Arc::clone(&mailer)).run().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Completed { sent: 3 });
        assert_eq!(
            mailer.recipients(),
            vec!["a@example.com", "b@example.com", "c@example.com"]
        );
    }

    #[tokio::test]
    async fn skips_owners_without_email() {
        let events = vec![
            due_event(1, Some("a@example.com")),
            due_event(2, None),
            due_event(3, Some("  ")),
            due_event(4, Some("d@example.com")),
        ];
        let mailer = Arc::new(RecordingMailer::new());
        let outcome = dispatcher(events, Arc::clone(&mailer)).run().await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Completed { sent: 2 });
        assert_eq!(mailer.recipients(), vec!["a@example.com", "d@example.com"]);
    }

    #[tokio::test]
    async fn one_delivery_failure_does_not_abort_the_batch() {
        let events = vec![
            due_event(1, Some("a@example.com")),
            due_event(2, Some("broken@example.com")),
            due_event(3, Some("c@example.com")),
        ];
        let mailer = Arc::new(RecordingMailer::failing_for("broken@example.com"));
        let outcome = dispatcher(events, Arc::clone(&mailer)).run().await.unwrap();

        // The failed send still counts as attempted.
        assert_eq!(outcome, DispatchOutcome::Completed { sent: 3 });
        assert_eq!(mailer.recipients().len(), 3);
    }

    #[tokio::test]
    async fn store_failure_is_fatal() {
        let mailer = Arc::new(RecordingMailer::new());
        let dispatcher = ReminderDispatcher::new(
            Arc::new(FakeSource {
                events: vec![],
                fail: true,
            }),
            mailer.clone(),
            Arc::new(FixedClock),
            "https://happydate.pl".to_string(),
        );

        let result = dispatcher.run().await;
        assert!(matches!(result, Err(DispatchError::Store(_))));
        assert!(mailer.recipients().is_empty());
    }
}

//! Reminder dispatch and email delivery.
//!
//! - [`delivery`] — SMTP email delivery via `lettre`.
//! - [`dispatcher`] — the daily reminder batch: fetch today's events, send
//!   one notification per event, report a summary.
//! - [`scheduler`] — optional in-process daily trigger for deployments
//!   without an external cron.

pub mod delivery;
pub mod dispatcher;
pub mod scheduler;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use dispatcher::{
    Clock, DispatchError, DispatchOutcome, EventSource, ReminderDispatcher, ReminderMailer,
    SqlEventSource, SystemClock, UnconfiguredMailer,
};
pub use scheduler::ReminderScheduler;

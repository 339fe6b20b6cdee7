//! In-process daily trigger for the reminder dispatcher.
//!
//! Deployments normally invoke `POST /api/v1/reminders/dispatch` from an
//! external cron. Where no cron exists, [`ReminderScheduler`] runs inside
//! the server process: it polls hourly and fires one dispatch per civil day
//! once the configured local send hour has been reached. The once-per-day
//! guard lives in memory only — a restart same-day re-sends, matching the
//! dispatcher's documented semantics.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Timelike};
use happydate_core::civil::OPERATING_ZONE;
use tokio_util::sync::CancellationToken;

use crate::dispatcher::ReminderDispatcher;

/// How often the scheduler checks whether a dispatch is due.
const CHECK_INTERVAL: Duration = Duration::from_secs(3600);

/// Whether a dispatch should fire now.
///
/// Fires when the local hour has reached `send_hour` and nothing was
/// dispatched for `today` yet.
fn dispatch_due(
    last_dispatched: Option<NaiveDate>,
    today: NaiveDate,
    local_hour: u32,
    send_hour: u32,
) -> bool {
    local_hour >= send_hour && last_dispatched != Some(today)
}

/// Background service running one reminder dispatch per day.
pub struct ReminderScheduler {
    dispatcher: Arc<ReminderDispatcher>,
    /// Local hour (operating zone) after which the daily dispatch fires.
    send_hour: u32,
}

impl ReminderScheduler {
    pub fn new(dispatcher: Arc<ReminderDispatcher>, send_hour: u32) -> Self {
        Self {
            dispatcher,
            send_hour,
        }
    }

    /// Run the scheduler loop until the token is cancelled.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(CHECK_INTERVAL);
        let mut last_dispatched: Option<NaiveDate> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Reminder scheduler cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let local = chrono::Utc::now().with_timezone(&OPERATING_ZONE);
                    let today = local.date_naive();

                    if !dispatch_due(last_dispatched, today, local.hour(), self.send_hour) {
                        continue;
                    }

                    match self.dispatcher.run().await {
                        Ok(outcome) => {
                            last_dispatched = Some(today);
                            tracing::info!(%today, ?outcome, "Scheduled dispatch complete");
                        }
                        Err(e) => {
                            // Left unmarked so the next tick retries.
                            tracing::error!(error = %e, "Scheduled dispatch failed");
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn fires_once_the_send_hour_is_reached() {
        assert!(!dispatch_due(None, day(7), 7, 8));
        assert!(dispatch_due(None, day(7), 8, 8));
        assert!(dispatch_due(None, day(7), 23, 8));
    }

    #[test]
    fn does_not_fire_twice_on_the_same_day() {
        assert!(!dispatch_due(Some(day(7)), day(7), 9, 8));
    }

    #[test]
    fn fires_again_on_the_next_day() {
        assert!(dispatch_due(Some(day(7)), day(8), 8, 8));
    }
}

//! Reminder email rendering.

use chrono::NaiveDate;

use crate::event::EventType;

/// Default label when an event has no title.
const DEFAULT_TITLE: &str = "Wydarzenie";

/// A rendered reminder notification, ready to hand to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderMessage {
    pub subject: String,
    pub html: String,
}

/// Render the notification for a single event.
///
/// `dashboard_url` is the public base URL of the application; the message
/// links back to the calendar so the recipient can review the event.
pub fn render(
    person: &str,
    title: Option<&str>,
    kind: EventType,
    date: NaiveDate,
    dashboard_url: &str,
) -> ReminderMessage {
    let title = match title {
        Some(t) if !t.trim().is_empty() => t.trim(),
        _ => DEFAULT_TITLE,
    };

    let subject = format!("Przypomnienie: {person} — {title} 🎉");

    let html = format!(
        "<h2>Cześć!</h2>\
         <p>Przypominamy o ważnym wydarzeniu dzisiaj:</p>\
         <ul>\
           <li><b>Osoba:</b> {person}</li>\
           <li><b>Rodzaj:</b> {}</li>\
           <li><b>Data:</b> {date}</li>\
         </ul>\
         <p>Sprawdź szczegóły w swoim kalendarzu HappyDate:</p>\
         <a href=\"{}/pages/dashboard.html\" \
            style=\"color:white;background:#3b82f6;padding:10px 18px;border-radius:8px;text-decoration:none\">\
            Otwórz kalendarz\
         </a>",
        kind.label(),
        dashboard_url.trim_end_matches('/'),
    );

    ReminderMessage { subject, html }
}

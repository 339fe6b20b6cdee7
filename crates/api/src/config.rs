/// How the daily reminder dispatch is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderSchedule {
    /// An external cron calls `POST /api/v1/reminders/dispatch`. Default.
    External,
    /// The server runs its own in-process daily scheduler.
    Internal,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// An empty list is development mode: the request's own origin is
    /// mirrored back. This relaxation is deliberate and logged at startup.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL used in notification links.
    pub public_base_url: String,
    /// Shared secret for the dispatch endpoint. When unset, every dispatch
    /// request is rejected as unauthorized.
    pub reminders_secret: Option<String>,
    /// Dispatch trigger mode.
    pub reminder_schedule: ReminderSchedule,
    /// Local hour (operating zone) for the internal scheduler's daily run.
    pub reminders_send_hour: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | empty (dev mode)        |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000` |
    /// | `REMINDERS_SECRET`     | unset (reject all)      |
    /// | `REMINDERS_SCHEDULE`   | `external`              |
    /// | `REMINDERS_SEND_HOUR`  | `8`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let reminders_secret = std::env::var("REMINDERS_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let reminder_schedule = match std::env::var("REMINDERS_SCHEDULE").as_deref() {
            Ok("internal") => ReminderSchedule::Internal,
            _ => ReminderSchedule::External,
        };

        let reminders_send_hour: u32 = std::env::var("REMINDERS_SEND_HOUR")
            .unwrap_or_else(|_| "8".into())
            .parse()
            .expect("REMINDERS_SEND_HOUR must be an hour 0-23");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            reminders_secret,
            reminder_schedule,
            reminders_send_hour,
        }
    }
}

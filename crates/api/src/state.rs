use std::sync::Arc;

use happydate_notify::ReminderDispatcher;
use happydate_suggest::GiftIdeaService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The dispatcher
/// and gift service are constructed once at startup and passed in, rather
/// than reached through process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: happydate_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The reminder batch job, shared by the HTTP trigger and the optional
    /// internal scheduler.
    pub dispatcher: Arc<ReminderDispatcher>,
    /// Gift-idea generation service.
    pub gifts: Arc<GiftIdeaService>,
}

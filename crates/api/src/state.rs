use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quill_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Domain event bus carrying view-invalidation signals.
    pub event_bus: Arc<quill_events::EventBus>,
}

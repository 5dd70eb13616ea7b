use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (the pool is reference-counted, config is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, opened in `main` and closed after shutdown.
    pub pool: heatlog_db::DbPool,
    /// Server configuration (annotation policy is read per request).
    pub config: Arc<ServerConfig>,
}

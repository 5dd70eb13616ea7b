//! PostgreSQL persistence for heats, logs and annotations.
//!
//! The pool is created once by the binary and passed by reference into every
//! repository call; nothing here holds global state.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

pub mod error;
pub mod models;
pub mod projection;
pub mod reconcile;
pub mod repositories;
pub mod views;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Connection settings for [`create_pool`].
#[derive(Debug, Clone)]
pub struct PoolSettings {
    /// Upper bound on pooled connections (default: `20`).
    pub max_connections: u32,
    /// Require TLS on every connection. The server certificate is not
    /// verified, matching hosted Postgres providers with self-signed chains.
    pub require_tls: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            require_tls: false,
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, settings: &PoolSettings) -> Result<DbPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(database_url)?;
    if settings.require_tls {
        options = options.ssl_mode(PgSslMode::Require);
    }
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

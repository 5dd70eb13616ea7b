//! Repository for the `logs` table.

use heatlog_core::types::DbId;
use sqlx::postgres::PgExecutor;
use sqlx::FromRow;

use crate::models::log::{Log, ReconcileLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, heat_id, log_number, name, finished_diameter, finished_length, \
                       unit, transducer, calibration, gain, prf, created_at, updated_at";

/// Result of [`LogRepo::upsert`].
#[derive(Debug, FromRow)]
pub struct UpsertedLog {
    #[sqlx(flatten)]
    pub log: Log,
    /// `true` if the row was inserted, `false` if an existing row was updated.
    pub inserted: bool,
}

/// Provides data access for inspection logs.
pub struct LogRepo;

impl LogRepo {
    /// Insert or update a log in one statement.
    ///
    /// The id and owning heat are fixed at creation: when `log_id` already
    /// belongs to a different heat the conflict clause matches no row and
    /// `None` is returned without modifying anything.
    pub async fn upsert<'e, E: PgExecutor<'e>>(
        executor: E,
        heat_id: DbId,
        log_id: &str,
        log_number: i32,
        input: &ReconcileLog,
    ) -> Result<Option<UpsertedLog>, sqlx::Error> {
        let query = format!(
            "INSERT INTO logs (id, heat_id, log_number, name, finished_diameter, finished_length, \
                               unit, transducer, calibration, gain, prf) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, ''), COALESCE($8, ''), COALESCE($9, ''), $10, $11) \
             ON CONFLICT (id) DO UPDATE SET \
                log_number = EXCLUDED.log_number, \
                name = EXCLUDED.name, \
                finished_diameter = EXCLUDED.finished_diameter, \
                finished_length = EXCLUDED.finished_length, \
                unit = EXCLUDED.unit, \
                transducer = EXCLUDED.transducer, \
                calibration = EXCLUDED.calibration, \
                gain = EXCLUDED.gain, \
                prf = EXCLUDED.prf \
             WHERE logs.heat_id = EXCLUDED.heat_id \
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedLog>(&query)
            .bind(log_id)
            .bind(heat_id)
            .bind(log_number)
            .bind(&input.name)
            .bind(input.finished_diameter)
            .bind(input.finished_length)
            .bind(&input.unit)
            .bind(&input.transducer)
            .bind(&input.calibration)
            .bind(input.gain)
            .bind(input.prf)
            .fetch_optional(executor)
            .await
    }

    /// Find a log by id.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
    ) -> Result<Option<Log>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM logs WHERE id = $1");
        sqlx::query_as::<_, Log>(&query)
            .bind(log_id)
            .fetch_optional(executor)
            .await
    }

    /// List a heat's logs ordered by log number.
    pub async fn list_by_heat<'e, E: PgExecutor<'e>>(
        executor: E,
        heat_id: DbId,
    ) -> Result<Vec<Log>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM logs WHERE heat_id = $1 ORDER BY log_number, id");
        sqlx::query_as::<_, Log>(&query)
            .bind(heat_id)
            .fetch_all(executor)
            .await
    }

    /// Check whether a log exists.
    pub async fn exists<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM logs WHERE id = $1)")
            .bind(log_id)
            .fetch_one(executor)
            .await?;
        Ok(row.0)
    }

    /// Take a transaction-scoped advisory lock keyed on the log id.
    ///
    /// Serializes concurrent reconciliations of the same log; released on
    /// commit or rollback.
    pub async fn lock_for_reconcile<'e, E: PgExecutor<'e>>(
        executor: E,
        log_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(log_id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

//! Repository for the `heats` table.

use heatlog_core::heat::HeatRef;
use heatlog_core::types::DbId;
use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use crate::models::heat::{CreateHeat, Heat, UpdateHeat};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, heat_number, customer, alloy, diameter, length, created_at, updated_at";

/// Provides the Heat Store operations.
pub struct HeatRepo;

impl HeatRepo {
    /// Insert a new heat, returning the created row.
    ///
    /// Missing `customer`/`alloy` default to `""`. A duplicate heat number
    /// fails with a unique violation on `uq_heats_heat_number`.
    pub async fn create(pool: &PgPool, input: &CreateHeat) -> Result<Heat, sqlx::Error> {
        let query = format!(
            "INSERT INTO heats (heat_number, customer, alloy, diameter, length)
             VALUES ($1, COALESCE($2, ''), COALESCE($3, ''), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Heat>(&query)
            .bind(&input.heat_number)
            .bind(&input.customer)
            .bind(&input.alloy)
            .bind(input.diameter)
            .bind(input.length)
            .fetch_one(pool)
            .await
    }

    /// Replace customer/alloy/diameter/length on the heat with this number.
    ///
    /// Returns `None` if no row matched.
    pub async fn update_by_number(
        pool: &PgPool,
        heat_number: &str,
        input: &UpdateHeat,
    ) -> Result<Option<Heat>, sqlx::Error> {
        let query = format!(
            "UPDATE heats SET
                customer = COALESCE($2, ''),
                alloy = COALESCE($3, ''),
                diameter = $4,
                length = $5
             WHERE heat_number = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Heat>(&query)
            .bind(heat_number)
            .bind(&input.customer)
            .bind(&input.alloy)
            .bind(input.diameter)
            .bind(input.length)
            .fetch_optional(pool)
            .await
    }

    /// List all heats, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Heat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heats ORDER BY id DESC");
        sqlx::query_as::<_, Heat>(&query).fetch_all(pool).await
    }

    /// Find a heat by its public heat number.
    pub async fn find_by_number<'e, E: PgExecutor<'e>>(
        executor: E,
        heat_number: &str,
    ) -> Result<Option<Heat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heats WHERE heat_number = $1");
        sqlx::query_as::<_, Heat>(&query)
            .bind(heat_number)
            .fetch_optional(executor)
            .await
    }

    /// Find a heat by its internal id.
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Heat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM heats WHERE id = $1");
        sqlx::query_as::<_, Heat>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a heat by whichever form the caller addressed it with.
    pub async fn resolve<'e, E: PgExecutor<'e>>(
        executor: E,
        heat_ref: &HeatRef,
    ) -> Result<Option<Heat>, sqlx::Error> {
        match heat_ref {
            HeatRef::Id(id) => Self::find_by_id(executor, *id).await,
            HeatRef::Number(number) => Self::find_by_number(executor, number).await,
        }
    }
}

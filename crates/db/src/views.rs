//! Heat aggregate view: heat -> logs -> annotations in one document.

use heatlog_core::error::CoreError;
use heatlog_core::heat::validate_heat_number;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::heat::Heat;
use crate::models::log::LogWithAnnotations;
use crate::projection::project_annotations;
use crate::repositories::{HeatRepo, LogRepo};

/// A heat with its logs (by log number) and their annotations (by position).
#[derive(Debug, Clone, Serialize)]
pub struct HeatDetail {
    #[serde(flatten)]
    pub heat: Heat,
    pub logs: Vec<LogWithAnnotations>,
}

/// Load the full nested document for `heat_number`.
///
/// Reads run in one repeatable-read transaction so the three queries see
/// the same snapshot even while a reconciliation commits concurrently.
pub async fn heat_aggregate(pool: &PgPool, heat_number: &str) -> Result<HeatDetail, DbError> {
    validate_heat_number(heat_number)?;

    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;

    let heat = HeatRepo::find_by_number(&mut *tx, heat_number)
        .await?
        .ok_or_else(|| CoreError::not_found("Heat", heat_number))?;
    let logs = LogRepo::list_by_heat(&mut *tx, heat.id).await?;
    let logs = project_annotations(&mut *tx, logs).await?;
    tx.commit().await?;

    Ok(HeatDetail { heat, logs })
}

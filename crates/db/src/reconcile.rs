//! Log reconciliation: upsert a log, then replace its annotation set.
//!
//! The whole sequence runs in one transaction behind an advisory lock on
//! the log id, so concurrent saves of the same log are serialized and a
//! failure never leaves the annotation set half-replaced. What counts as a
//! failure depends on [`AnnotationPolicy`]:
//!
//! - `Strict`: every annotation is validated before anything is written,
//!   and any insert error rolls back the whole call.
//! - `Lenient`: invalid entries are skipped, and each insert runs in its
//!   own savepoint so a rejected row is dropped without aborting the rest.

use heatlog_core::annotation::AnnotationPolicy;
use heatlog_core::error::CoreError;
use heatlog_core::heat::HeatRef;
use heatlog_core::log::validate_log_id;
use serde_json::Value;
use sqlx::{Connection, PgConnection, PgPool};

use crate::error::DbError;
use crate::models::annotation::{AnnotationInput, NewAnnotation};
use crate::models::log::{LogWithAnnotations, ReconcileLog};
use crate::repositories::{AnnotationRepo, HeatRepo, LogRepo};

/// Outcome of a successful reconciliation.
#[derive(Debug, Clone)]
pub struct Reconciled {
    /// The stored log and its annotations, ascending by position.
    pub log: LogWithAnnotations,
    /// `true` if the log row was created by this call.
    pub created: bool,
    /// Number of submitted annotations that were not stored (lenient only).
    pub skipped: usize,
}

/// Upsert the log `log_id` under `heat_ref` and replace its annotations
/// with `payload.annotations`.
///
/// Errors:
/// - `CoreError::Validation` for a bad log id, bad scalar fields, or (strict
///   policy) any bad annotation. Nothing is written.
/// - `CoreError::NotFound` when the heat does not exist.
/// - `CoreError::Conflict` when the log id already belongs to another heat.
/// - `sqlx::Error` for any store failure; the transaction is rolled back.
pub async fn reconcile_log(
    pool: &PgPool,
    heat_ref: &HeatRef,
    log_id: &str,
    payload: &ReconcileLog,
    policy: AnnotationPolicy,
) -> Result<Reconciled, DbError> {
    validate_log_id(log_id)?;
    let log_number = payload.validate_scalars()?;
    let (annotations, mut skipped) = prepare_annotations(log_id, &payload.annotations, policy)?;

    let mut tx = pool.begin().await?;
    LogRepo::lock_for_reconcile(&mut *tx, log_id).await?;

    let heat = HeatRepo::resolve(&mut *tx, heat_ref)
        .await?
        .ok_or_else(|| CoreError::not_found("Heat", heat_ref))?;

    let upserted = LogRepo::upsert(&mut *tx, heat.id, log_id, log_number, payload)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict(format!(
                "Log {log_id} belongs to a different heat than {}",
                heat.heat_number
            ))
        })?;

    let removed = AnnotationRepo::delete_by_log(&mut *tx, log_id).await?;

    match policy {
        AnnotationPolicy::Strict => {
            for annotation in &annotations {
                AnnotationRepo::create(&mut *tx, log_id, annotation).await?;
            }
        }
        AnnotationPolicy::Lenient => {
            skipped += insert_each_in_savepoint(&mut tx, log_id, &annotations).await?;
        }
    }

    let stored = AnnotationRepo::list_by_log(&mut *tx, log_id).await?;
    tx.commit().await?;

    tracing::info!(
        heat_number = %heat.heat_number,
        log_id = %log_id,
        created = upserted.inserted,
        removed,
        stored = stored.len(),
        skipped,
        policy = %policy,
        "Log reconciled"
    );

    Ok(Reconciled {
        log: LogWithAnnotations {
            log: upserted.log,
            annotations: stored,
        },
        created: upserted.inserted,
        skipped,
    })
}

/// Parse and validate the raw annotation list according to `policy`.
///
/// Strict returns the first failure, naming its index. Lenient logs and
/// drops failures, returning how many were dropped.
fn prepare_annotations(
    log_id: &str,
    raw: &[Value],
    policy: AnnotationPolicy,
) -> Result<(Vec<NewAnnotation>, usize), CoreError> {
    let mut prepared = Vec::with_capacity(raw.len());
    let mut skipped = 0;

    for (index, value) in raw.iter().enumerate() {
        let result = AnnotationInput::from_value(value.clone()).and_then(AnnotationInput::into_new);
        match (result, policy) {
            (Ok(annotation), _) => prepared.push(annotation),
            (Err(err), AnnotationPolicy::Strict) => {
                return Err(CoreError::Validation(format!("annotations[{index}]: {}", inner(&err))));
            }
            (Err(err), AnnotationPolicy::Lenient) => {
                tracing::warn!(log_id = %log_id, index, error = %err, "Skipping invalid annotation");
                skipped += 1;
            }
        }
    }

    Ok((prepared, skipped))
}

/// Insert each annotation inside its own savepoint, rolling back and
/// skipping the ones the database rejects. Returns the number skipped.
async fn insert_each_in_savepoint(
    conn: &mut PgConnection,
    log_id: &str,
    annotations: &[NewAnnotation],
) -> Result<usize, sqlx::Error> {
    let mut skipped = 0;
    for (index, annotation) in annotations.iter().enumerate() {
        let mut savepoint = conn.begin().await?;
        match AnnotationRepo::create(&mut *savepoint, log_id, annotation).await {
            Ok(_) => savepoint.commit().await?,
            Err(err) => {
                savepoint.rollback().await?;
                tracing::warn!(
                    log_id = %log_id,
                    index,
                    error = %err,
                    "Annotation insert failed, skipping"
                );
                skipped += 1;
            }
        }
    }
    Ok(skipped)
}

/// Strip the `Validation failed: ` prefix so nested messages read cleanly.
fn inner(err: &CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg.clone(),
        other => other.to_string(),
    }
}

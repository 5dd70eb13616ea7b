//! Handlers for inspection logs: listing, lookup, and reconciliation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use heatlog_core::error::CoreError;
use heatlog_core::heat::HeatRef;
use heatlog_core::log::derive_log_id;
use heatlog_db::models::annotation::Annotation;
use heatlog_db::models::log::{LogWithAnnotations, ReconcileLog};
use heatlog_db::projection::project_annotations;
use heatlog_db::reconcile::{reconcile_log, Reconciled};
use heatlog_db::repositories::{AnnotationRepo, HeatRepo, LogRepo};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::LogListParams;
use crate::response::SavedLogResponse;
use crate::state::AppState;

/// GET /api/heats/{heat}/logs
///
/// Logs ordered by log number, each with its annotations unless
/// `include_annotations=false`.
pub async fn list_by_heat(
    State(state): State<AppState>,
    Path(heat): Path<String>,
    Query(params): Query<LogListParams>,
) -> AppResult<Response> {
    let heat_ref = HeatRef::parse(&heat)?;
    let heat = HeatRepo::resolve(&state.pool, &heat_ref)
        .await?
        .ok_or_else(|| CoreError::not_found("Heat", &heat_ref))?;

    let logs = LogRepo::list_by_heat(&state.pool, heat.id).await?;
    if params.include_annotations.unwrap_or(true) {
        let logs = project_annotations(&state.pool, logs).await?;
        Ok(Json(logs).into_response())
    } else {
        Ok(Json(logs).into_response())
    }
}

/// PUT /api/heats/{heat}/logs/{log_id}
///
/// Upsert the log and replace its annotation set.
pub async fn reconcile(
    State(state): State<AppState>,
    Path((heat, log_id)): Path<(String, String)>,
    AppJson(payload): AppJson<ReconcileLog>,
) -> AppResult<Json<SavedLogResponse>> {
    let heat_ref = HeatRef::parse(&heat)?;
    let reconciled = reconcile_log(
        &state.pool,
        &heat_ref,
        &log_id,
        &payload,
        state.config.annotation_policy,
    )
    .await?;
    Ok(Json(saved(reconciled)))
}

/// POST /api/heats/{heat}/logs
///
/// Same as [`reconcile`] with the log id derived as
/// `{heat_number}-{log_number}`. Returns 201 when the log is new.
pub async fn save_derived(
    State(state): State<AppState>,
    Path(heat): Path<String>,
    AppJson(payload): AppJson<ReconcileLog>,
) -> AppResult<(StatusCode, Json<SavedLogResponse>)> {
    let heat_ref = HeatRef::parse(&heat)?;
    let log_number = payload.validate_scalars()?;
    let heat = HeatRepo::resolve(&state.pool, &heat_ref)
        .await?
        .ok_or_else(|| CoreError::not_found("Heat", &heat_ref))?;

    let log_id = derive_log_id(&heat.heat_number, log_number);
    let reconciled = reconcile_log(
        &state.pool,
        &HeatRef::Id(heat.id),
        &log_id,
        &payload,
        state.config.annotation_policy,
    )
    .await?;

    let status = if reconciled.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved(reconciled))))
}

/// GET /api/logs/{log_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
) -> AppResult<Json<LogWithAnnotations>> {
    let log = LogRepo::find_by_id(&state.pool, &log_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Log", &log_id))?;
    let annotations = AnnotationRepo::list_by_log(&state.pool, &log.id).await?;
    Ok(Json(LogWithAnnotations { log, annotations }))
}

/// GET /api/logs/{log_id}/annotations
///
/// Annotations ordered by ascending position.
pub async fn list_annotations(
    State(state): State<AppState>,
    Path(log_id): Path<String>,
) -> AppResult<Json<Vec<Annotation>>> {
    if !LogRepo::exists(&state.pool, &log_id).await? {
        return Err(CoreError::not_found("Log", &log_id).into());
    }
    let annotations = AnnotationRepo::list_by_log(&state.pool, &log_id).await?;
    Ok(Json(annotations))
}

fn saved(reconciled: Reconciled) -> SavedLogResponse {
    SavedLogResponse {
        message: "Saved",
        created: reconciled.created,
        skipped: reconciled.skipped,
        data: reconciled.log,
    }
}

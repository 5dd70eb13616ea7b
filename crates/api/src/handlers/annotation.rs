//! Handlers for individual annotations.
//!
//! Bulk replacement goes through log reconciliation; these endpoints add or
//! remove a single annotation without touching the rest of the set.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use heatlog_core::annotation::parse_annotation_id;
use heatlog_core::error::CoreError;
use heatlog_core::log::validate_log_id;
use heatlog_db::models::annotation::{Annotation, CreateAnnotation};
use heatlog_db::repositories::{AnnotationRepo, LogRepo};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/annotations
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAnnotation>,
) -> AppResult<(StatusCode, Json<Annotation>)> {
    validate_log_id(&input.log_id)?;
    let new = input.annotation.into_new()?;

    if !LogRepo::exists(&state.pool, &input.log_id).await? {
        return Err(CoreError::not_found("Log", &input.log_id).into());
    }

    let annotation = AnnotationRepo::create(&state.pool, &input.log_id, &new).await?;
    tracing::info!(
        annotation_id = annotation.id,
        log_id = %annotation.log_id,
        position = annotation.position,
        "Annotation created"
    );
    Ok((StatusCode::CREATED, Json(annotation)))
}

/// DELETE /api/annotations/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    let id = parse_annotation_id(&id)?;
    if AnnotationRepo::delete(&state.pool, id).await? {
        tracing::info!(annotation_id = id, "Annotation deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::not_found("Annotation", id).into())
    }
}

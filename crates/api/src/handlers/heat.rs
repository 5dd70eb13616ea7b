//! Handlers for the `/heats` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use heatlog_core::error::CoreError;
use heatlog_core::heat::validate_heat_number;
use heatlog_db::models::heat::{CreateHeat, Heat, UpdateHeat};
use heatlog_db::repositories::HeatRepo;
use heatlog_db::views::{heat_aggregate, HeatDetail};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/heats
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateHeat>,
) -> AppResult<(StatusCode, Json<Heat>)> {
    input.ensure_valid()?;
    let heat = HeatRepo::create(&state.pool, &input).await?;
    tracing::info!(heat_id = heat.id, heat_number = %heat.heat_number, "Heat created");
    Ok((StatusCode::CREATED, Json(heat)))
}

/// GET /api/heats
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Heat>>> {
    let heats = HeatRepo::list(&state.pool).await?;
    Ok(Json(heats))
}

/// GET /api/heats/{heat_number}
///
/// The heat with its logs and their annotations nested.
pub async fn get_aggregate(
    State(state): State<AppState>,
    Path(heat_number): Path<String>,
) -> AppResult<Json<HeatDetail>> {
    let detail = heat_aggregate(&state.pool, &heat_number).await?;
    Ok(Json(detail))
}

/// PUT /api/heats/{heat_number}
pub async fn update(
    State(state): State<AppState>,
    Path(heat_number): Path<String>,
    AppJson(input): AppJson<UpdateHeat>,
) -> AppResult<Json<Heat>> {
    validate_heat_number(&heat_number)?;
    input.ensure_valid()?;
    let heat = HeatRepo::update_by_number(&state.pool, &heat_number, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Heat", &heat_number))?;
    tracing::info!(heat_id = heat.id, heat_number = %heat.heat_number, "Heat updated");
    Ok(Json(heat))
}

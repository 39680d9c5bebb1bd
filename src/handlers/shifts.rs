use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateShiftRequest, Shift};
use crate::AppState;

/// `POST /api/shifts` — record a doctor's shift with its handoff summary.
pub async fn create_shift(
    State(state): State<AppState>,
    Json(req): Json<CreateShiftRequest>,
) -> Result<(StatusCode, Json<Shift>), ApiError> {
    let shift = state.db.create_shift(req).await?;
    Ok((StatusCode::CREATED, Json(shift)))
}

/// `GET /api/units/:id/shifts` — newest first.
pub async fn list_shifts(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<Vec<Shift>>, ApiError> {
    let shifts = state.db.list_shifts(unit_id).await?;
    Ok(Json(shifts))
}

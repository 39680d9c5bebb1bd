use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{Bed, UpdateBedStatusRequest};
use crate::AppState;

/// `PUT /api/beds/:id/status` — transition a bed between Available,
/// Occupied, Maintenance and Blocked.
pub async fn update_bed_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBedStatusRequest>,
) -> Result<Json<Bed>, ApiError> {
    let bed = state
        .db
        .update_bed_status(id, req.status)
        .await?
        .ok_or(ApiError::NotFound("bed"))?;

    Ok(Json(bed))
}

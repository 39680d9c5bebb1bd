use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::UnitWithBeds;
use crate::AppState;

/// `GET /api/units` — active units with bed grids and occupancy.
pub async fn list_units(
    State(state): State<AppState>,
) -> Result<Json<Vec<UnitWithBeds>>, ApiError> {
    let units = state.db.list_units_with_beds().await?;
    Ok(Json(units))
}

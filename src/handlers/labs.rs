use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateLaboratoryRequest, Laboratory};
use crate::AppState;

/// `POST /api/patients/:id/labs` — the result payload is a typed panel
/// tagged by lab type; a payload that does not match its tag is rejected at
/// deserialization.
pub async fn create_laboratory(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(req): Json<CreateLaboratoryRequest>,
) -> Result<(StatusCode, Json<Laboratory>), ApiError> {
    let lab = state.db.create_laboratory(patient_id, req).await?;
    Ok((StatusCode::CREATED, Json(lab)))
}

/// `GET /api/patients/:id/labs`
pub async fn list_laboratories(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<Laboratory>>, ApiError> {
    let labs = state.db.list_laboratories(patient_id).await?;
    Ok(Json(labs))
}

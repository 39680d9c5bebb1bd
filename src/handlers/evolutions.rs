use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateEvolutionRequest, EvolutionWithPlans};
use crate::AppState;

/// `POST /api/patients/:id/evolutions` — append a clinical note, manual or
/// AI-generated, with optional per-system plans.
pub async fn create_evolution(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Json(req): Json<CreateEvolutionRequest>,
) -> Result<(StatusCode, Json<EvolutionWithPlans>), ApiError> {
    let evolution = state.db.create_evolution(patient_id, req).await?;
    Ok((StatusCode::CREATED, Json(evolution)))
}

/// `GET /api/patients/:id/evolutions` — newest first, each with its system
/// plans.
pub async fn list_evolutions(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<EvolutionWithPlans>>, ApiError> {
    let evolutions = state.db.list_evolutions(patient_id).await?;
    Ok(Json(evolutions))
}

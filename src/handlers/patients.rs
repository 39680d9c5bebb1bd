use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    CreatePatientRequest, Patient, PatientFilters, PatientWithRelations,
    UpdatePatientStatusRequest,
};
use crate::AppState;

/// `POST /api/patients` — admit a patient into a bed. The bed flip to
/// Occupied happens in the same transaction as the insert.
pub async fn create_patient(
    State(state): State<AppState>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    if req.name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "name and lastName are required".to_string(),
        ));
    }

    let patient = state.db.admit_patient(req).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /api/patients` — filter by unit and/or status.
pub async fn list_patients(
    State(state): State<AppState>,
    Query(filters): Query<PatientFilters>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    let patients = state.db.list_patients(&filters).await?;
    Ok(Json(patients))
}

/// `GET /api/patients/:id` — patient with bed, unit, diagnoses, evolutions,
/// tasks and labs.
pub async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PatientWithRelations>, ApiError> {
    let patient = state
        .db
        .get_patient_with_relations(id)
        .await?
        .ok_or(ApiError::NotFound("patient"))?;

    Ok(Json(patient))
}

/// `PUT /api/patients/:id/status` — status transition; Alta and Fallecido
/// close the episode and free the bed.
pub async fn update_patient_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePatientStatusRequest>,
) -> Result<Json<Patient>, ApiError> {
    let patient = state
        .db
        .update_patient_status(id, req.status)
        .await?
        .ok_or(ApiError::NotFound("patient"))?;

    Ok(Json(patient))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{CreateTaskRequest, Task, UpdateTaskStatusRequest};
use crate::AppState;

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let task = state.db.create_task(req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /api/patients/:id/tasks` — most urgent first.
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.db.list_tasks(patient_id).await?;
    Ok(Json(tasks))
}

/// `PUT /api/tasks/:id/status` — Completada stamps `completedAt`.
pub async fn update_task_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskStatusRequest>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .update_task_status(id, req.status)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    Ok(Json(task))
}

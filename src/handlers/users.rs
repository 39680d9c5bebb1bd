use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::User;
use crate::AppState;

/// `GET /api/users` — active users, for author/assignee pickers. Credential
/// handling lives with the external identity provider.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, ApiError> {
    let users = state.db.list_users().await?;
    Ok(Json(users))
}

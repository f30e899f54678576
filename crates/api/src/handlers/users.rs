//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cuadrante_core::types::DbId;
use cuadrante_core::{NewUser, User};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = state.users().list().await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
///
/// Broadcasts `userAdded`. Returns 409 when the name or identifier is taken.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let user = state.users().create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// DELETE /api/v1/users/{id}
///
/// Broadcasts `userDeleted`. Entries and log records naming the user are
/// left untouched.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.users().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

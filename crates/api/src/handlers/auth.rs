//! Identifier login.

use axum::extract::State;
use axum::Json;
use cuadrante_core::User;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
}

/// POST /api/v1/login
///
/// Look up the user owning `identifier`. Returns 404 for an unknown one.
/// No session or token is issued; the client keeps the returned user.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = state.users().login(&input.identifier).await?;
    Ok(Json(DataResponse { data: user }))
}

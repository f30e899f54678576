//! Handlers for the `/calendar` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cuadrante_core::{DateKey, Entry, EntryPatch, YearMonth};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/calendar/{year}/{month}
///
/// All entries of the month, ordered by date.
pub async fn list_month(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<DataResponse<Vec<Entry>>>> {
    let month = YearMonth::new(year, month)?;
    let entries = state.calendar().list_month(month).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/calendar/{date_key}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let key = DateKey::parse(&date_key)?;
    let entry = state.calendar().get(key).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/calendar
///
/// Create a full entry. Returns 409 if the date already has one.
pub async fn create_entry(
    State(state): State<AppState>,
    Json(entry): Json<Entry>,
) -> AppResult<(StatusCode, Json<DataResponse<Entry>>)> {
    let entry = state.calendar().create(entry).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// PUT /api/v1/calendar/{date_key}
///
/// Create or merge. Supplied fields replace stored ones; `editor` is
/// required.
pub async fn upsert_entry(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
    Json(patch): Json<EntryPatch>,
) -> AppResult<Json<DataResponse<Entry>>> {
    let key = DateKey::parse(&date_key)?;
    let entry = state.calendar().upsert(key, &patch).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// DELETE /api/v1/calendar/{date_key}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date_key): Path<String>,
) -> AppResult<StatusCode> {
    let key = DateKey::parse(&date_key)?;
    state.calendar().delete(key).await?;
    Ok(StatusCode::NO_CONTENT)
}

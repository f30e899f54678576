//! Handlers for the `/logs` resource.

use axum::extract::{Path, State};
use axum::Json;
use cuadrante_core::report::ReportItem;
use cuadrante_core::{ChangeLogRecord, YearMonth};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/logs/{year}/{month}
///
/// Records written during the month (by record time, not by the entry's
/// date), newest first.
pub async fn list_logs(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<DataResponse<Vec<ChangeLogRecord>>>> {
    let month = YearMonth::new(year, month)?;
    let records = state.calendar().logs(month).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/logs/{year}/{month}/report
pub async fn month_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<DataResponse<Vec<ReportItem>>>> {
    let month = YearMonth::new(year, month)?;
    let report = state.calendar().report(month).await?;
    Ok(Json(DataResponse { data: report }))
}

//! Route definitions for the `/logs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::logs;
use crate::state::AppState;

/// Routes mounted at `/logs`.
///
/// ```text
/// GET /{year}/{month}          -> list_logs
/// GET /{year}/{month}/report   -> month_report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{year}/{month}", get(logs::list_logs))
        .route("/{year}/{month}/report", get(logs::month_report))
}

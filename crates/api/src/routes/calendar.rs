//! Route definitions for the `/calendar` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::calendar;
use crate::state::AppState;

/// Routes mounted at `/calendar`.
///
/// ```text
/// POST   /                 -> create_entry
/// GET    /{year}/{month}   -> list_month
/// GET    /{date_key}       -> get_entry
/// PUT    /{date_key}       -> upsert_entry
/// DELETE /{date_key}       -> delete_entry
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(calendar::create_entry))
        .route("/{year}/{month}", get(calendar::list_month))
        .route(
            "/{date_key}",
            get(calendar::get_entry)
                .put(calendar::upsert_entry)
                .delete(calendar::delete_entry),
        )
}

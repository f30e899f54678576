pub mod calendar;
pub mod health;
pub mod logs;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket sync channel
///
/// /login                               identifier login (POST)
///
/// /users                               list, create
/// /users/{id}                          delete
///
/// /calendar                            create (POST)
/// /calendar/{year}/{month}             list month
/// /calendar/{date_key}                 get, upsert (PUT), delete
///
/// /logs/{year}/{month}                 change log for the month
/// /logs/{year}/{month}/report          change log with field diffs
///
/// /upload                              image upload (multipart `image`)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_handler))
        // Login
        .route("/login", post(handlers::auth::login))
        // Resources
        .nest("/users", users::router())
        .nest("/calendar", calendar::router())
        .nest("/logs", logs::router())
        // Uploads
        .route("/upload", post(handlers::upload::upload_image))
}

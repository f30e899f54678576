//! Image upload into the blob store.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// POST /api/v1/upload
///
/// Store the `image` field and return its URL. The URL is only attached to
/// an entry by a later `PUT /calendar/{date_key}`.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadResponse>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".into()));
        }

        let image_url = state
            .blobs
            .put(file_name.as_deref(), &data)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;
        return Ok(Json(DataResponse {
            data: UploadResponse { image_url },
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing required '{IMAGE_FIELD}' field"
    )))
}

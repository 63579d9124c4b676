// handlers/media/upload.rs - POST /api/media/upload

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MediaUploadRequest {
    /// Base64 contents, optionally as a `data:` URI
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub directory: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MediaUploaded {
    pub url: String,
    pub public_id: String,
    pub format: String,
    pub size: u64,
    pub directory: String,
}

/// Folder under the configured root, e.g. `follooow` + `/news` -> `follooow/news`.
pub fn full_directory(root: &str, directory: &str) -> String {
    format!("{}/{}", root, directory.trim_start_matches('/'))
}

pub async fn upload_media(
    State(state): State<AppState>,
    payload: Result<Json<MediaUploadRequest>, JsonRejection>,
) -> ApiResult<MediaUploaded> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request("Error parsing request body").with_detail(e.body_text()))?;

    if request.file.is_empty() {
        return Err(ApiError::bad_request("File is required"));
    }
    if request.directory.is_empty() {
        return Err(ApiError::bad_request("Directory is required"));
    }

    within(state.config.upload_timeout(), async {
        let directory = full_directory(&state.config.media.directory, &request.directory);
        let filename = format!("media_{}", Utc::now().timestamp());

        let result = state
            .media
            .upload_from_base64(&request.file, &directory, &filename)
            .await
            .map_err(|e| {
                error!("Media upload to {} failed: {}", directory, e);
                ApiError::internal_server_error("Error uploading file to Cloudinary").with_detail(e)
            })?;
        info!("Uploaded {} ({} bytes)", result.public_id, result.bytes);

        Ok(ApiResponse::success("File uploaded successfully", MediaUploaded {
            url: result.secure_url,
            public_id: result.public_id,
            format: result.format,
            size: result.bytes,
            directory,
        }))
    })
    .await
}

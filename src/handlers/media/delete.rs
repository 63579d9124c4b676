// handlers/media/delete.rs - DELETE /api/media

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::ApiError;
use crate::media::public_id_from_url;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

/// Either the public id itself or a CDN delivery URL it can be read from.
#[derive(Debug, Default, Deserialize)]
pub struct MediaDeleteRequest {
    pub public_id: Option<String>,
    pub url: Option<String>,
}

impl MediaDeleteRequest {
    pub fn resolve_public_id(&self) -> String {
        match (self.public_id.as_deref(), self.url.as_deref()) {
            (Some(id), _) if !id.is_empty() => id.to_string(),
            (_, Some(url)) => public_id_from_url(url),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MediaDeleted {
    pub public_id: String,
    pub result: String,
}

pub async fn delete_media(
    State(state): State<AppState>,
    payload: Result<Json<MediaDeleteRequest>, JsonRejection>,
) -> ApiResult<MediaDeleted> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request("Error parsing request body").with_detail(e.body_text()))?;

    let public_id = request.resolve_public_id();
    if public_id.is_empty() {
        return Err(ApiError::bad_request("public_id or url is required"));
    }

    within(state.config.request_timeout(), async {
        let destroyed = state.media.delete_image(&public_id).await.map_err(|e| {
            error!("Failed to delete {}: {}", public_id, e);
            ApiError::internal_server_error("Error deleting file from Cloudinary").with_detail(e)
        })?;
        info!("Deleted {} ({})", public_id, destroyed.result);

        Ok(ApiResponse::success("File deleted successfully", MediaDeleted {
            public_id: public_id.clone(),
            result: destroyed.result,
        }))
    })
    .await
}

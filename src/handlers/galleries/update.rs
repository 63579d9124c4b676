// handlers/galleries/update.rs - PUT|PATCH /api/galleries/:gallery_id

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::{error, info};

use crate::database::models::{GalleryPayload, GalleryUpdate};
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::handlers::form::read_gallery_form;
use crate::media::UploadResult;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::upload_gallery_images;
use crate::state::AppState;

use super::GalleryRef;

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Partial update. A multipart body may carry new `images`, which replace
/// the stored list; a JSON body only sets the fields it names.
pub async fn update_gallery(
    State(state): State<AppState>,
    Path(gallery_id): Path<String>,
    request: Request,
) -> ApiResult<GalleryRef> {
    let id = parse_object_id(&gallery_id).map_err(|e| ApiError::bad_request("Invalid gallery ID").with_detail(e))?;

    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| ApiError::bad_request("Error parsing multipart form").with_detail(e.body_text()))?;
        within(state.config.upload_timeout(), update_with_images(&state, id, multipart)).await
    } else {
        let Json(payload) = Json::<GalleryPayload>::from_request(request, &state)
            .await
            .map_err(|e| ApiError::bad_request("Error parsing request body").with_detail(e.body_text()))?;
        within(state.config.request_timeout(), async {
            ensure_exists(&state, id).await?;
            apply(&state, id, &GalleryUpdate::from_payload(payload), &[]).await?;
            Ok(ApiResponse::success("Gallery updated successfully", GalleryRef {
                gallery_id: id.to_hex(),
            }))
        })
        .await
    }
}

async fn update_with_images(state: &AppState, id: ObjectId, multipart: Multipart) -> ApiResult<GalleryRef> {
    let form = read_gallery_form(multipart).await?;
    ensure_exists(state, id).await?;

    let mut update = GalleryUpdate {
        title: form.optional("title"),
        description: form.optional("description"),
        lang: form.optional("lang"),
        images: None,
        influencers: form.list("influencers"),
        tags: form.list("tags"),
    };

    let mut assets = Vec::new();
    if !form.images.is_empty() {
        let uploaded = upload_gallery_images(&state.media, &form.images, Utc::now().timestamp()).await?;
        update.images = Some(uploaded.images);
        assets = uploaded.assets;
    }

    apply(state, id, &update, &assets).await?;

    Ok(ApiResponse::success("Gallery updated successfully with images", GalleryRef {
        gallery_id: id.to_hex(),
    }))
}

async fn ensure_exists(state: &AppState, id: ObjectId) -> Result<(), ApiError> {
    match state.galleries.find_by_id(id, None).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ApiError::not_found("Gallery not found")),
        Err(e) => Err(ApiError::internal_server_error("Error fetching gallery").with_detail(e)),
    }
}

/// Write the update; fresh uploads are removed again if it does not land.
async fn apply(state: &AppState, id: ObjectId, update: &GalleryUpdate, uploaded: &[UploadResult]) -> Result<(), ApiError> {
    let result = state.galleries.update(id, update, Utc::now().timestamp_millis()).await;

    let err = match result {
        Ok(true) => {
            info!("Updated gallery {}", id.to_hex());
            return Ok(());
        }
        Ok(false) => ApiError::not_found("Gallery not found"),
        Err(e) => {
            error!("Failed to update gallery {}: {}", id.to_hex(), e);
            ApiError::internal_server_error("Error updating gallery").with_detail(e)
        }
    };

    state.media.compensate(uploaded).await;
    Err(err)
}

// handlers/galleries/create.rs - POST /api/galleries

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::{error, info};

use crate::database::models::{GalleryDocument, GalleryPayload, NewGallery};
use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::{announce, gallery_announcement};
use crate::state::AppState;

/// Create a gallery whose images are already hosted.
pub async fn create_gallery(
    State(state): State<AppState>,
    payload: Result<Json<GalleryPayload>, JsonRejection>,
) -> ApiResult<()> {
    let Json(payload) = payload.map_err(|e| ApiError::bad_request("Error parsing json").with_detail(e.body_text()))?;

    within(state.config.request_timeout(), async {
        let gallery = GalleryDocument::create(
            NewGallery {
                title: payload.title.unwrap_or_default(),
                description: payload.description.unwrap_or_default(),
                lang: payload.lang.unwrap_or_default(),
                images: payload.images.unwrap_or_default(),
                influencers: payload.influencers.unwrap_or_default(),
                author_id: payload.author_id.unwrap_or_default(),
                tags: payload.tags.unwrap_or_default(),
            },
            Utc::now().timestamp_millis(),
        );

        state.galleries.insert(&gallery).await.map_err(|e| {
            error!("Failed to insert gallery: {}", e);
            ApiError::internal_server_error("Error insert data").with_detail(e)
        })?;
        info!("Created gallery {} ({})", gallery.id.to_hex(), gallery.slug);

        announce(
            state.notifier.clone(),
            gallery_announcement(
                &state.config.notify.site_url,
                &gallery.title,
                &gallery.lang,
                &gallery.slug,
                &gallery.id.to_hex(),
            ),
        );

        Ok(ApiResponse::without_data(StatusCode::CREATED, "Success create gallery"))
    })
    .await
}

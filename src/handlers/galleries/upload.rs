// handlers/galleries/upload.rs - POST /api/galleries/upload

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use chrono::Utc;
use tracing::{error, info};

use crate::database::models::{GalleryDocument, NewGallery};
use crate::error::ApiError;
use crate::handlers::form::{read_gallery_form, GalleryForm};
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::{announce, gallery_announcement, upload_gallery_images};
use crate::state::AppState;

use super::{GalleryRef, DEFAULT_LANG};

/// Create a gallery from a multipart form, uploading every `images` part.
///
/// Images are uploaded before the insert; if the insert fails they are
/// deleted again so no unreferenced assets are left on the CDN.
pub async fn upload_gallery(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<GalleryRef> {
    let multipart =
        multipart.map_err(|e| ApiError::bad_request("Error parsing multipart form").with_detail(e.body_text()))?;

    within(state.config.upload_timeout(), async {
        let form = read_gallery_form(multipart).await?;
        let new = validate(&form)?;

        let now = Utc::now();
        let uploaded = upload_gallery_images(&state.media, &form.images, now.timestamp()).await?;

        let gallery = GalleryDocument::create(
            NewGallery {
                images: uploaded.images.clone(),
                ..new
            },
            now.timestamp_millis(),
        );

        if let Err(e) = state.galleries.insert(&gallery).await {
            error!("Failed to insert gallery, removing {} upload(s): {}", uploaded.assets.len(), e);
            state.media.compensate(&uploaded.assets).await;
            return Err(ApiError::internal_server_error("Error creating gallery").with_detail(e));
        }
        info!("Created gallery {} with {} image(s)", gallery.id.to_hex(), gallery.images.len());

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

        Ok(ApiResponse::created("Success create gallery with images", GalleryRef {
            gallery_id: gallery.id.to_hex(),
        }))
    })
    .await
}

fn validate(form: &GalleryForm) -> Result<NewGallery, ApiError> {
    let title = form.text("title");
    if title.is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }
    if form.images.is_empty() {
        return Err(ApiError::bad_request("At least one image is required"));
    }

    Ok(NewGallery {
        title: title.to_string(),
        description: form.text("description").to_string(),
        lang: form.optional("lang").unwrap_or_else(|| DEFAULT_LANG.to_string()),
        images: Vec::new(),
        influencers: form.list("influencers").unwrap_or_default(),
        author_id: form.text("author_id").to_string(),
        tags: form.list("tags").unwrap_or_default(),
    })
}

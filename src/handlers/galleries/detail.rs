// handlers/galleries/detail.rs - GET /api/galleries/:gallery_id

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::database::models::GalleryView;
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::enrich;
use crate::state::AppState;

use super::GalleryBody;

#[derive(Debug, Default, Deserialize)]
pub struct DetailParams {
    pub lang: Option<String>,
}

impl DetailParams {
    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref().filter(|l| !l.is_empty())
    }
}

/// Fetch one gallery and count the view. The returned `views` is the value
/// read before the increment.
pub async fn gallery_detail(
    State(state): State<AppState>,
    Path(gallery_id): Path<String>,
    Query(params): Query<DetailParams>,
) -> ApiResult<GalleryBody> {
    within(state.config.request_timeout(), async {
        let id = parse_object_id(&gallery_id)?;

        let gallery = state
            .galleries
            .find_by_id(id, params.lang())
            .await?
            .ok_or_else(|| ApiError::not_found("Gallery not found"))?;

        state.galleries.increment_views(id).await?;

        let enrichment = enrich(
            state.influencers.as_ref(),
            state.users.as_ref(),
            &gallery.influencers,
            &gallery.author_id,
        )
        .await;

        Ok(ApiResponse::success("OK", GalleryBody {
            gallery: GalleryView::new(gallery, enrichment),
        }))
    })
    .await
}

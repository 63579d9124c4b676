// handlers/galleries/list.rs - GET /api/galleries

use axum::extract::{Query, State};

use crate::database::models::GalleryView;
use crate::filter::ListParams;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::enrich;
use crate::state::AppState;

use super::GalleryPage;

pub async fn list_galleries(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<GalleryPage> {
    within(state.config.request_timeout(), async {
        let query = state.list_filter().parse(&params)?;
        let documents = state.galleries.list(&query).await?;
        let total = state.galleries.count(&query.filter).await?;

        let mut galleries = Vec::with_capacity(documents.len());
        for gallery in documents {
            let enrichment = enrich(
                state.influencers.as_ref(),
                state.users.as_ref(),
                &gallery.influencers,
                &gallery.author_id,
            )
            .await;
            galleries.push(GalleryView::new(gallery, enrichment));
        }

        if galleries.is_empty() {
            return Ok(ApiResponse::empty("Gallery not available", GalleryPage { galleries, total }));
        }
        Ok(ApiResponse::success("success", GalleryPage { galleries, total }))
    })
    .await
}

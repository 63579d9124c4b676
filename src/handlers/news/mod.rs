// handlers/news - GET /api/news, GET /api/news/:news_id

use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::database::models::NewsView;
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::filter::ListParams;
use crate::handlers::galleries::detail::DetailParams;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::services::enrich;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct NewsPage {
    pub news: Vec<NewsView>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct NewsBody {
    pub news: NewsView,
}

pub async fn list_news(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<NewsPage> {
    within(state.config.request_timeout(), async {
        let query = state.list_filter().parse(&params)?;
        let documents = state.news.list(&query).await?;
        let total = state.news.count(&query.filter).await?;

        let mut news = Vec::with_capacity(documents.len());
        for item in documents {
            let enrichment = enrich(state.influencers.as_ref(), state.users.as_ref(), &item.influencers, &item.author_id).await;
            news.push(NewsView::new(item, enrichment));
        }

        if news.is_empty() {
            return Ok(ApiResponse::empty("News not available", NewsPage { news, total }));
        }
        Ok(ApiResponse::success("success", NewsPage { news, total }))
    })
    .await
}

/// Same read-then-increment behaviour as gallery detail.
pub async fn news_detail(
    State(state): State<AppState>,
    Path(news_id): Path<String>,
    Query(params): Query<DetailParams>,
) -> ApiResult<NewsBody> {
    within(state.config.request_timeout(), async {
        let id = parse_object_id(&news_id)?;

        let item = state
            .news
            .find_by_id(id, params.lang())
            .await?
            .ok_or_else(|| ApiError::not_found("News not found"))?;

        state.news.increment_views(id).await?;

        let enrichment = enrich(state.influencers.as_ref(), state.users.as_ref(), &item.influencers, &item.author_id).await;
        Ok(ApiResponse::success("OK", NewsBody {
            news: NewsView::new(item, enrichment),
        }))
    })
    .await
}

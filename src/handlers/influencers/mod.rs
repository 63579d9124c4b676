// handlers/influencers - GET /api/influencers, GET /api/influencers/:influencer_id

use axum::extract::{Path, Query, State};
use serde::Serialize;

use crate::database::models::InfluencerSmall;
use crate::database::parse_object_id;
use crate::error::ApiError;
use crate::filter::ListParams;
use crate::middleware::{within, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InfluencerPage {
    pub influencers: Vec<InfluencerSmall>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct InfluencerBody {
    pub influencer: InfluencerSmall,
}

/// Only `lang` filters influencers; `influencer_ids` is ignored here.
pub async fn list_influencers(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<InfluencerPage> {
    within(state.config.request_timeout(), async {
        let query = state.list_filter().parse(&params)?;
        let influencers = state.influencers.list(&query).await?;
        let total = state.influencers.count(&query.filter).await?;

        if influencers.is_empty() {
            return Ok(ApiResponse::empty("Influencer not available", InfluencerPage { influencers, total }));
        }
        Ok(ApiResponse::success("success", InfluencerPage { influencers, total }))
    })
    .await
}

pub async fn influencer_detail(State(state): State<AppState>, Path(influencer_id): Path<String>) -> ApiResult<InfluencerBody> {
    within(state.config.request_timeout(), async {
        let id = parse_object_id(&influencer_id)?;
        let influencer = state
            .influencers
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Influencer not found"))?;

        Ok(ApiResponse::success("OK", InfluencerBody { influencer }))
    })
    .await
}

// handlers/system.rs - GET / and GET /health

use std::time::Duration;

use axum::extract::State;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

const PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub database: &'static str,
}

pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(
        "success",
        json!({
            "name": "follooow-api",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Content API for galleries, news, influencers and users",
            "endpoints": {
                "galleries": "/api/galleries[/:gallery_id], /api/galleries/upload",
                "news": "/api/news[/:news_id]",
                "influencers": "/api/influencers[/:influencer_id]",
                "users": "/api/users, /api/users/login, /api/users/:user_id",
                "media": "/api/media/upload, /api/media",
                "health": "/health"
            }
        }),
    )
}

/// 200 while the database answers a ping, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> ApiResult<HealthBody> {
    match tokio::time::timeout(PING_TIMEOUT, state.health.ping()).await {
        Ok(Ok(())) => Ok(ApiResponse::success("OK", HealthBody { database: "connected" })),
        Ok(Err(e)) => {
            warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Service Unavailable").with_detail(e))
        }
        Err(_) => {
            warn!("Health check timed out after {:?}", PING_TIMEOUT);
            Err(ApiError::service_unavailable("Service Unavailable").with_detail("database ping timed out"))
        }
    }
}

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{galleries, influencers, media, news, system, users};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let api = state.config.api.clone();

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(gallery_routes())
        .merge(news_routes())
        .merge(influencer_routes())
        .merge(user_routes())
        .merge(media_routes())
        // Global middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(api.max_request_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if api.enable_cors {
        router.layer(cors_layer(&api))
    } else {
        router
    }
}

fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/api/galleries", get(galleries::list_galleries).post(galleries::create_gallery))
        .route("/api/galleries/upload", post(galleries::upload_gallery))
        .route(
            "/api/galleries/:gallery_id",
            get(galleries::gallery_detail)
                .put(galleries::update_gallery)
                .patch(galleries::update_gallery),
        )
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/api/news", get(news::list_news))
        .route("/api/news/:news_id", get(news::news_detail))
}

fn influencer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/influencers", get(influencers::list_influencers))
        .route("/api/influencers/:influencer_id", get(influencers::influencer_detail))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(users::create_user))
        .route("/api/users/login", post(users::login_user))
        .route("/api/users/:user_id", get(users::get_user))
}

fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/api/media/upload", post(media::upload_media))
        .route("/api/media", axum::routing::delete(media::delete_media))
}

/// Permissive for `*`, otherwise the configured origin list.
fn cors_layer(api: &ApiConfig) -> CorsLayer {
    if api.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = api
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

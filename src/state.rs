use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{GalleryStore, HealthCheck, InfluencerStore, NewsStore, UserStore};
use crate::filter::Filter;
use crate::media::MediaAdapter;
use crate::services::Notifier;

/// Everything a handler needs, built once in `main` and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub galleries: Arc<dyn GalleryStore>,
    pub news: Arc<dyn NewsStore>,
    pub influencers: Arc<dyn InfluencerStore>,
    pub users: Arc<dyn UserStore>,
    pub media: MediaAdapter,
    pub notifier: Arc<dyn Notifier>,
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// List query parser with this deployment's limits.
    pub fn list_filter(&self) -> Filter {
        Filter::new(self.config.api.default_limit, self.config.api.max_limit)
    }
}

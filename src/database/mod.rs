pub mod manager;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{parse_object_id, DatabaseError, DatabaseManager, HealthCheck};
pub use repository::Repository;
pub use store::{GalleryStore, InfluencerStore, NewsStore, UserStore};

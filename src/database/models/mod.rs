pub mod gallery;
pub mod influencer;
pub mod news;
pub mod user;

use serde::{Deserialize, Deserializer};

pub use gallery::{slugify, GalleryDocument, GalleryPayload, GalleryUpdate, GalleryView, ImageDocument, NewGallery};
pub use influencer::InfluencerSmall;
pub use news::{NewsDocument, NewsView};
pub use user::{AuthorSummary, CreateUserRequest, LoginRequest, LoginResponse, UserDocument, UserResponse};

/// Request-time joins resolved for a gallery or news item. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub influencers_data: Option<Vec<InfluencerSmall>>,
    pub author: Option<AuthorSummary>,
}

/// Reads a stored `null` as the field's default. Older writers persisted
/// empty lists as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

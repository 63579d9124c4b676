pub mod create;
pub mod detail;
pub mod list;
pub mod update;
pub mod upload;

use serde::{Deserialize, Serialize};

use crate::database::models::GalleryView;

pub use create::create_gallery;
pub use detail::gallery_detail;
pub use list::list_galleries;
pub use update::update_gallery;
pub use upload::upload_gallery;

/// Language assigned to form-created galleries that don't name one
pub const DEFAULT_LANG: &str = "ID";

#[derive(Debug, Serialize)]
pub struct GalleryPage {
    pub galleries: Vec<GalleryView>,
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct GalleryBody {
    pub gallery: GalleryView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GalleryRef {
    pub gallery_id: String,
}

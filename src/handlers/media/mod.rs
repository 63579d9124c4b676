pub mod delete;
pub mod upload;

pub use delete::delete_media;
pub use upload::upload_media;

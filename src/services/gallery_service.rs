use tracing::{info, warn};

use crate::database::models::ImageDocument;
use crate::media::{FormFile, MediaAdapter, MediaError, UploadResult};

/// CDN folder for gallery images
pub const GALLERY_FOLDER: &str = "galleries";

/// Images uploaded for one gallery write, kept so they can be removed again
/// if the write does not go through.
#[derive(Debug, Default)]
pub struct UploadedImages {
    pub images: Vec<ImageDocument>,
    pub assets: Vec<UploadResult>,
}

/// Upload every file in order; the first becomes the cover. If any upload
/// fails, the ones already stored are deleted before the error is returned.
pub async fn upload_gallery_images(
    media: &MediaAdapter,
    files: &[FormFile],
    now_secs: i64,
) -> Result<UploadedImages, MediaError> {
    let mut uploaded = UploadedImages::default();

    for (i, file) in files.iter().enumerate() {
        match media.upload_from_form(file, GALLERY_FOLDER).await {
            Ok(result) => {
                uploaded.images.push(ImageDocument {
                    url: result.secure_url.clone(),
                    caption: file.file_name.clone(),
                    is_cover: i == 0,
                    created_on: now_secs,
                    updated_on: now_secs,
                });
                uploaded.assets.push(result);
            }
            Err(e) => {
                warn!(
                    "Upload {} of {} ({}) failed, removing {} stored image(s)",
                    i + 1,
                    files.len(),
                    file.file_name,
                    uploaded.assets.len()
                );
                media.compensate(&uploaded.assets).await;
                return Err(e);
            }
        }
    }

    info!("Uploaded {} gallery image(s)", uploaded.assets.len());
    Ok(uploaded)
}

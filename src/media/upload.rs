use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::warn;

use super::{DestroyResult, MediaError, MediaUploader, UploadParams, UploadResult, UploadSource};

/// A file part received from a multipart form.
#[derive(Debug, Clone)]
pub struct FormFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// The three upload entry points over a single [`MediaUploader`].
#[derive(Clone)]
pub struct MediaAdapter {
    uploader: Arc<dyn MediaUploader>,
    default_folder: String,
}

impl MediaAdapter {
    pub fn new(uploader: Arc<dyn MediaUploader>, default_folder: impl Into<String>) -> Self {
        Self {
            uploader,
            default_folder: default_folder.into(),
        }
    }

    fn folder_or_default(&self, folder: &str) -> String {
        if folder.is_empty() {
            self.default_folder.clone()
        } else {
            folder.to_string()
        }
    }

    /// Upload a multipart file under a timestamped public id derived from its name.
    pub async fn upload_from_form(&self, file: &FormFile, folder: &str) -> Result<UploadResult, MediaError> {
        if file.data.is_empty() {
            return Err(MediaError::NoFile);
        }

        let params = UploadParams {
            folder: self.folder_or_default(folder),
            public_id: generate_unique_filename(&file.file_name, chrono::Utc::now().timestamp()),
        };
        let source = UploadSource::Bytes {
            data: file.data.clone(),
            file_name: file.file_name.clone(),
        };
        self.uploader.upload(source, &params).await
    }

    /// Upload a base64 payload; a `data:<mime>;base64,` prefix is stripped first.
    pub async fn upload_from_base64(&self, payload: &str, folder: &str, filename: &str) -> Result<UploadResult, MediaError> {
        let data = decode_base64_payload(payload)?;

        let params = UploadParams {
            folder: self.folder_or_default(folder),
            public_id: filename.to_string(),
        };
        let source = UploadSource::Bytes {
            data,
            file_name: filename.to_string(),
        };
        self.uploader.upload(source, &params).await
    }

    /// Have the CDN fetch a remote image into the default folder.
    pub async fn upload_from_url(&self, image_url: &str, filename: &str) -> Result<UploadResult, MediaError> {
        if image_url.is_empty() {
            return Err(MediaError::NoUrl);
        }
        let parsed = url::Url::parse(image_url).map_err(|e| MediaError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MediaError::InvalidUrl(format!("unsupported scheme {}", parsed.scheme())));
        }

        let params = UploadParams {
            folder: self.default_folder.clone(),
            public_id: filename.to_string(),
        };
        self.uploader.upload(UploadSource::RemoteUrl(image_url.to_string()), &params).await
    }

    pub async fn delete_image(&self, public_id: &str) -> Result<DestroyResult, MediaError> {
        if public_id.is_empty() {
            return Err(MediaError::NoPublicId);
        }
        self.uploader.destroy(public_id).await
    }

    /// Best-effort removal of assets from a failed multi-step write.
    pub async fn compensate(&self, uploaded: &[UploadResult]) {
        for asset in uploaded {
            if let Err(e) = self.delete_image(&asset.public_id).await {
                warn!("Failed to remove orphaned upload {}: {}", asset.public_id, e);
            }
        }
    }
}

pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>, MediaError> {
    if payload.is_empty() {
        return Err(MediaError::NoData);
    }

    let encoded = match payload.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, data)| data).unwrap_or(payload),
        None => payload,
    };

    Ok(STANDARD.decode(encoded.trim())?)
}

/// `photo one.jpg` at t=1700000000 becomes `photo_one_jpg_1700000000.jpg`.
pub fn generate_unique_filename(original: &str, timestamp: i64) -> String {
    let extension = original.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    let base = original.replace(['.', ' '], "_");

    if extension.is_empty() {
        format!("{}_{}", base, timestamp)
    } else {
        format!("{}_{}.{}", base, timestamp, extension)
    }
}

/// Recover the public id from a CDN delivery URL: the path after
/// `upload/<version>/`, without the file extension. Empty when absent.
pub fn public_id_from_url(image_url: &str) -> String {
    let parts: Vec<&str> = image_url.split('/').collect();

    for (i, part) in parts.iter().enumerate() {
        if *part == "upload" && i + 2 < parts.len() {
            let public_id = parts[i + 2..].join("/");
            return match public_id.rfind('.') {
                Some(dot) => public_id[..dot].to_string(),
                None => public_id,
            };
        }
    }

    String::new()
}

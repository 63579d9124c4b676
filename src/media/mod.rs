pub mod cloudinary;
pub mod upload;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use cloudinary::CloudinaryClient;
pub use upload::{decode_base64_payload, generate_unique_filename, public_id_from_url, FormFile, MediaAdapter};

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no file provided")]
    NoFile,

    #[error("no base64 data provided")]
    NoData,

    #[error("no image URL provided")]
    NoUrl,

    #[error("no public ID provided")]
    NoPublicId,

    #[error("invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("failed to decode base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("media storage is not configured")]
    NotConfigured,

    #[error("failed to {action}: {message}")]
    Provider { action: &'static str, message: String },

    #[error("failed to reach media storage: {0}")]
    Http(#[from] reqwest::Error),
}

/// What to send to the CDN.
#[derive(Debug, Clone)]
pub enum UploadSource {
    /// Raw file contents with the client-side file name.
    Bytes { data: Vec<u8>, file_name: String },
    /// The CDN fetches the asset itself.
    RemoteUrl(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadParams {
    pub folder: String,
    pub public_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    pub secure_url: String,
    pub public_id: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestroyResult {
    pub result: String,
}

/// The external media service: one upload call, one destroy call.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, source: UploadSource, params: &UploadParams) -> Result<UploadResult, MediaError>;
    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaError>;
}

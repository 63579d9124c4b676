use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::config::{MediaConfig, SignatureAlgorithm};

use super::{DestroyResult, MediaError, MediaUploader, UploadParams, UploadResult, UploadSource};

const RESOURCE_TYPE: &str = "image";

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorMessage {
    message: String,
}

/// Signed uploads against the Cloudinary REST upload API.
#[derive(Clone)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: MediaConfig,
}

impl CloudinaryClient {
    pub fn new(config: MediaConfig) -> Result<Self, MediaError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if config.cloud_name.is_empty() {
            info!("Cloudinary cloud name not set; uploads will fail until configured");
        } else {
            info!("Configured Cloudinary client for cloud: {}", config.cloud_name);
        }

        Ok(Self { http, config })
    }

    fn is_configured(&self) -> bool {
        !self.config.cloud_name.is_empty() && !self.config.api_key.is_empty() && !self.config.api_secret.is_empty()
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/{}/{}", self.config.api_base, self.config.cloud_name, RESOURCE_TYPE, action)
    }

    /// Parameters sorted by name, joined as `k=v&k=v`, secret appended, hex digest.
    pub fn sign(params: &[(&str, String)], api_secret: &str, algorithm: SignatureAlgorithm) -> String {
        let mut sorted: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        let payload = format!("{}{}", to_sign, api_secret);

        match algorithm {
            SignatureAlgorithm::Sha1 => format!("{:x}", Sha1::digest(payload.as_bytes())),
            SignatureAlgorithm::Sha256 => format!("{:x}", Sha256::digest(payload.as_bytes())),
        }
    }

    /// Signed parameter list plus `api_key` and `signature`.
    fn signed_fields(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.retain(|(_, v)| !v.is_empty());
        let signature = Self::sign(&params, &self.config.api_secret, self.config.signature_algorithm);
        params.push(("api_key", self.config.api_key.clone()));
        params.push(("signature", signature));
        params
    }

    async fn read_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
        action: &'static str,
    ) -> Result<T, MediaError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ProviderErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| format!("HTTP {}: {}", status, body));
        Err(MediaError::Provider { action, message })
    }
}

#[async_trait]
impl MediaUploader for CloudinaryClient {
    async fn upload(&self, source: UploadSource, params: &UploadParams) -> Result<UploadResult, MediaError> {
        if !self.is_configured() {
            return Err(MediaError::NotConfigured);
        }

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let fields = self.signed_fields(vec![
            ("folder", params.folder.clone()),
            ("public_id", params.public_id.clone()),
            ("timestamp", timestamp),
        ]);

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        form = match source {
            UploadSource::Bytes { data, file_name } => form.part("file", Part::bytes(data).file_name(file_name)),
            UploadSource::RemoteUrl(url) => form.text("file", url),
        };

        debug!("Uploading {}/{} to Cloudinary", params.folder, params.public_id);
        let response = self.http.post(self.endpoint("upload")).multipart(form).send().await?;
        Self::read_response(response, "upload image").await
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaError> {
        if !self.is_configured() {
            return Err(MediaError::NotConfigured);
        }

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let fields = self.signed_fields(vec![("public_id", public_id.to_string()), ("timestamp", timestamp)]);

        debug!("Destroying {} on Cloudinary", public_id);
        let response = self.http.post(self.endpoint("destroy")).form(&fields).send().await?;
        Self::read_response(response, "delete image").await
    }
}

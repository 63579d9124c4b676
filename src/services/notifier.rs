use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::NotifyConfig;

const TELEGRAM_API: &str = "https://api.telegram.org";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram rejected the message: HTTP {0}")]
    Rejected(reqwest::StatusCode),

    #[error("failed to reach telegram: {0}")]
    Http(#[from] reqwest::Error),
}

/// Outbound channel for "something was published" announcements.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

pub struct TelegramNotifier {
    http: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            bot_token,
            chat_id,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API, self.bot_token);
        let response = self
            .http
            .post(url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status()));
        }
        Ok(())
    }
}

/// Used when no bot credentials are configured.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send(&self, _text: &str) -> Result<(), NotifyError> {
        debug!("Notifications disabled, dropping message");
        Ok(())
    }
}

pub fn notifier_from_config(config: &NotifyConfig) -> Arc<dyn Notifier> {
    match (&config.telegram_bot_token, &config.telegram_chat_id) {
        (Some(token), Some(chat_id)) => Arc::new(TelegramNotifier::new(token.clone(), chat_id.clone())),
        _ => Arc::new(DisabledNotifier),
    }
}

/// Public link plus title, as posted to the channel.
pub fn gallery_announcement(site_url: &str, title: &str, lang: &str, slug: &str, gallery_id: &str) -> String {
    format!(
        "New Gallery:\n{}\n{}/{}/gallery/{}-{}",
        title,
        site_url.trim_end_matches('/'),
        lang,
        slug,
        gallery_id
    )
}

/// Fire and forget; the request that triggered it never waits on delivery.
pub fn announce(notifier: Arc<dyn Notifier>, text: String) {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(&text).await {
            warn!("Failed to send announcement: {}", e);
        }
    });
}

use super::{compose_content, Notifier};
use crate::config::DiscordConfig;
use crate::error::{BackupError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, error, info};

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    content: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// 204 No Content, the usual webhook reply.
    NoContent,
    Ok,
}

/// Posts notifications to a Discord channel webhook as a form field.
pub struct DiscordWebhook {
    url: String,
    client: Client,
}

impl DiscordWebhook {
    pub fn new(config: &DiscordConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mysql-s3-backup/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            url: config.webhook_url.clone(),
            client,
        })
    }

    pub async fn send(&self, content: &str) -> Result<DeliveryStatus> {
        let response = self
            .client
            .post(&self.url)
            .form(&WebhookMessage { content })
            .send()
            .await?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(DeliveryStatus::NoContent),
            StatusCode::OK => Ok(DeliveryStatus::Ok),
            status => Err(BackupError::Notify(format!("status: {}", status))),
        }
    }
}

#[async_trait]
impl Notifier for DiscordWebhook {
    async fn notify(&self, message: &str, error: Option<&BackupError>, file_name: &str) {
        let content = compose_content(message, error);

        match self.send(&content).await {
            Ok(DeliveryStatus::NoContent) => {
                info!(file = file_name, "Discord notification sent successfully.")
            }
            Ok(DeliveryStatus::Ok) => debug!(file = file_name, "Discord notification accepted"),
            Err(e) => error!(file = file_name, "{}", e),
        }
    }
}

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::shared::errors::DeliveryError;

use super::Notifier;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API `sendMessage`
pub struct TelegramNotifier {
    http_client: Client,
    api_base: String,
    token: String,
}

impl TelegramNotifier {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        let body = SendMessage {
            chat_id: destination,
            text,
        };

        let response = self.http_client.post(self.endpoint()).json(&body).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        // A 200 without `ok: true` still means the message was not posted.
        let reply: BotReply = serde_json::from_str(&raw)
            .map_err(|e| DeliveryError::Rejected(format!("unreadable reply: {}", e)))?;
        if !reply.ok {
            return Err(DeliveryError::Rejected(
                reply.description.unwrap_or_else(|| "no description".to_string()),
            ));
        }

        info!("📨 Sent Telegram notification to {}", destination);
        Ok(())
    }
}

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::types::error_chain;
use crate::DeliveryError;

pub const DEFAULT_TELEGRAM_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone)]
pub struct TelegramSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TELEGRAM_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Outbound text channel for notifications.
#[async_trait::async_trait]
pub trait Messenger: Send + Sync {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages through the Telegram Bot API `sendMessage` method.
#[derive(Clone)]
pub struct TelegramMessenger {
    send_url: String,
    client: reqwest::Client,
}

impl TelegramMessenger {
    pub fn new(settings: TelegramSettings, bot_token: &str) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| DeliveryError::Request(error_chain(&err)))?;
        let send_url = format!(
            "{}/bot{}/sendMessage",
            settings.base_url.trim_end_matches('/'),
            bot_token
        );
        Ok(Self { send_url, client })
    }
}

#[async_trait::async_trait]
impl Messenger for TelegramMessenger {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let payload = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        // The bot token is part of the URL, so reqwest errors are reported without it.
        let response = self
            .client
            .post(&self.send_url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .send()
            .await
            .map_err(|err| DeliveryError::Request(error_chain(&err.without_url())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| DeliveryError::Request(error_chain(&err.without_url())))?;
        let parsed = serde_json::from_str::<TelegramResponse>(&body).ok();

        match parsed {
            Some(TelegramResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(TelegramResponse { description, .. }) => Err(DeliveryError::Rejected {
                code: status.as_u16(),
                description: description.unwrap_or_else(|| status.to_string()),
            }),
            None => Err(DeliveryError::Rejected {
                code: status.as_u16(),
                description: format!("unexpected response: {body}"),
            }),
        }
    }
}

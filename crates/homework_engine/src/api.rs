use std::time::Duration;

use futures_util::StreamExt;
use notifier_logging::notifier_info;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;

use crate::types::error_chain;
use crate::ApiError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Error bodies longer than this are cut before they reach the log.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
        }
    }
}

/// Source of homework status payloads.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches statuses changed since `from_timestamp` and decodes the JSON body.
    async fn fetch_status(&self, from_timestamp: i64) -> Result<Value, ApiError>;
}

/// Polls the review-status endpoint with an OAuth token.
#[derive(Clone)]
pub struct PracticumClient {
    settings: ApiSettings,
    token: String,
    client: reqwest::Client,
}

impl PracticumClient {
    pub fn new(settings: ApiSettings, token: impl Into<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::Request(error_chain(&err)))?;
        Ok(Self {
            settings,
            token: token.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }
}

#[async_trait::async_trait]
impl StatusSource for PracticumClient {
    async fn fetch_status(&self, from_timestamp: i64) -> Result<Value, ApiError> {
        let mut url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| ApiError::InvalidEndpoint(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("from_date", &from_timestamp.to_string());

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            notifier_info!("API response status: {}", status.as_u16());
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::BadStatus {
                code: status.as_u16(),
                body: truncate_chars(&body, MAX_ERROR_BODY_CHARS),
            });
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes).map_err(|err| ApiError::Undecodable(err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: u64) -> ApiError {
    ApiError::Undecodable(format!(
        "response too large (max {max_bytes}, actual {actual})"
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Timeout;
    }
    ApiError::Request(error_chain(&err))
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("ééééé", 2), "éé...");
    }
}

use crate::config::ChatCredentials;
use crate::error::PipelineError;
use crate::services::notifier::{MessageTransport, ParseMode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramTransport {
    api_url: String,
    client: reqwest::Client,
}

impl TelegramTransport {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Unexpected(format!("http client: {}", e)))?;
        Ok(Self::with_client(api_url, client))
    }

    pub fn with_client(api_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_url: api_url.into(),
            client,
        }
    }
}

#[async_trait::async_trait]
impl MessageTransport for TelegramTransport {
    async fn send_message(
        &self,
        credentials: &ChatCredentials,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), PipelineError> {
        let url = format!("{}/bot{}/sendMessage", self.api_url, credentials.token);
        let request = SendMessageRequest {
            chat_id: &credentials.chat_id,
            text,
            parse_mode: parse_mode.api_value(),
        };

        // reqwest errors embed the URL, which carries the token
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::DeliveryFailure(e.without_url().to_string()))?;

        let status = response.status();
        let body: Option<ApiResponse> = response.json().await.ok();
        debug!(status = %status, "Telegram sendMessage response");

        match body {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(PipelineError::DeliveryFailure(format!(
                "{}: {}",
                status,
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(PipelineError::DeliveryFailure(format!(
                "{}: unreadable response",
                status
            ))),
        }
    }
}

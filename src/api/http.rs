//! HTTP implementation of [`ChatBackend`] over `reqwest`.
//!
//! No request timeout is configured: a pending call stays pending until the
//! backend answers or the connection drops.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{ApiError, ChatBackend, ChatReply, ChatRequest, HistoryEnvelope};
use crate::config::{EditableConfig, RawConfig};
use crate::message::ChatMessage;
use crate::settings::WidgetSettings;

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a backend for the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(settings: &WidgetSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: settings.base_url.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let (status, text) = read_body(response).await?;
        if !(200..300).contains(&status) {
            return Err(ApiError::Status { status, body: text });
        }
        decode(&text)
    }

    async fn post(&self, path: &str, body: Option<&(impl Serialize + Sync)>) -> Result<(u16, String), ApiError> {
        let mut request = self.http.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        read_body(response).await
    }
}

#[async_trait::async_trait]
impl ChatBackend for HttpBackend {
    async fn get_config(&self) -> Result<RawConfig, ApiError> {
        self.get_json("/get_config").await
    }

    async fn get_chat_history(&self) -> Result<Vec<ChatMessage>, ApiError> {
        let envelope: HistoryEnvelope = self.get_json("/get_chat_history").await?;
        Ok(envelope.history)
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let body = ChatRequest { message: message.to_owned() };
        let (status, text) = self.post("/chat", Some(&body)).await?;
        if !(200..300).contains(&status) {
            debug!(%status, "chat returned non-success status; decoding body anyway");
        }
        decode(&text)
    }

    async fn reset_chat(&self) -> Result<(), ApiError> {
        let (status, body) = self.post("/reset_chat", None::<&()>).await?;
        check_status(status, body)
    }

    async fn save_config(&self, update: &EditableConfig) -> Result<(), ApiError> {
        let (status, body) = self.post("/save_config", Some(update)).await?;
        check_status(status, body)
    }
}

async fn read_body(response: reqwest::Response) -> Result<(u16, String), ApiError> {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    Ok((status, text))
}

fn check_status(status: u16, body: String) -> Result<(), ApiError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(ApiError::Status { status, body }) }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

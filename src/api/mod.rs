//! Backend API — the five endpoints the widget talks to.
//!
//! DESIGN
//! ======
//! `ChatBackend` is the seam between the controller and the network. The
//! controller only decides what to do with success or failure; transport,
//! status checks and body decoding live in the implementation. `HttpBackend`
//! is the real one; tests substitute scripted backends.
//!
//! ERROR HANDLING
//! ==============
//! Every method returns `ApiError` rather than panicking. The controller
//! degrades each failure into a fallback, an inline message, or an alert.

pub mod http;

use serde::{Deserialize, Serialize};

use crate::config::{EditableConfig, RawConfig};
use crate::message::ChatMessage;

pub use http::HttpBackend;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, aborted).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success HTTP status.
    #[error("backend returned status {status}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// True when the backend was reached and rejected the request.
    #[must_use]
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// `POST /chat` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /chat` response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

/// `GET /get_chat_history` response body.
///
/// A missing or non-array `history` decodes as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEnvelope {
    #[serde(default, deserialize_with = "history_or_empty")]
    pub history: Vec<ChatMessage>,
}

fn history_or_empty<'de, D>(deserializer: D) -> Result<Vec<ChatMessage>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(serde::de::Error::custom)
    } else {
        Ok(Vec::new())
    }
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Async access to the chat backend. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// `GET /get_config`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-OK status, or an
    /// undecodable body.
    async fn get_config(&self) -> Result<RawConfig, ApiError>;

    /// `GET /get_chat_history`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-OK status, or an
    /// undecodable body.
    async fn get_chat_history(&self) -> Result<Vec<ChatMessage>, ApiError>;

    /// `POST /chat`. Only the body matters: a non-OK status whose body
    /// decodes as a [`ChatReply`] is still a reply.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or an undecodable body.
    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError>;

    /// `POST /reset_chat`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or non-OK status.
    async fn reset_chat(&self) -> Result<(), ApiError>;

    /// `POST /save_config` with exactly the editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the backend rejects the update, or
    /// another variant when it could not be reached.
    async fn save_config(&self, update: &EditableConfig) -> Result<(), ApiError>;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

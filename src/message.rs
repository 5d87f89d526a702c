//! Chat transcript entries.
//!
//! Messages are append-only. The controller never edits or removes a single
//! entry; history is only ever cleared in bulk on reset.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Wire/CSS name of the sender (`user` or `bot`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A single message in the chat history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// ISO-8601 creation time. Older server payloads may omit it.
    #[serde(default)]
    pub timestamp: String,
}

impl ChatMessage {
    /// Build a message stamped with the current UTC time.
    #[must_use]
    pub fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self { sender, text: text.into(), timestamp: now_iso8601() }
    }
}

/// Current UTC time as an RFC 3339 string.
#[must_use]
pub fn now_iso8601() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

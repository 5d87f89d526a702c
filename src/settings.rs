//! Widget settings parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const BASE_URL_VAR: &str = "CHAT_WIDGET_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSettings {
    /// Origin the backend endpoints are resolved against, without a trailing `/`.
    pub base_url: String,
}

impl WidgetSettings {
    /// Build settings from environment variables.
    ///
    /// Optional:
    /// - `CHAT_WIDGET_BASE_URL`: default `http://127.0.0.1:5000`
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_base_url(&std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }

    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

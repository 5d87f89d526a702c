//! Bot configuration as seen by the widget.
//!
//! DESIGN
//! ======
//! The backend may return a partial config. `RawConfig` mirrors the wire
//! shape with every field optional, and `BotConfig::normalize` fills each
//! missing or empty field with its own default. Defaults are per field, never
//! all-or-nothing. `sensitive_words` is carried through untouched; the widget
//! neither renders nor edits it, and it is never part of a save payload.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BOT_NAME: &str = "文心一言";
pub const DEFAULT_BOT_ROLE: &str = "我是一个AI助手";
pub const DEFAULT_MODEL_NAME: &str = "ernie-4.5-turbo-128k";
/// Welcome text used only when the config fetch fails outright.
pub const FALLBACK_WELCOME_WORDS: &str = "欢迎使用聊天机器人！";

// =============================================================================
// WIRE SHAPE
// =============================================================================

/// Config as returned by `/get_config`. Any field may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub bot_name: Option<String>,
    pub bot_role: Option<String>,
    pub welcome_words: Option<String>,
    pub model_name_text_generate: Option<String>,
    pub sensitive_words: Option<Vec<String>>,
}

// =============================================================================
// BOT CONFIG
// =============================================================================

/// Fully populated configuration held by a widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    pub bot_name: String,
    pub bot_role: String,
    pub welcome_words: String,
    pub model_name_text_generate: String,
    /// Server-only. Round-tripped opaquely.
    pub sensitive_words: Vec<String>,
}

impl BotConfig {
    /// Fill every missing or empty field of `raw` with its default.
    #[must_use]
    pub fn normalize(raw: RawConfig) -> Self {
        Self {
            bot_name: non_empty_or(raw.bot_name, DEFAULT_BOT_NAME),
            bot_role: non_empty_or(raw.bot_role, DEFAULT_BOT_ROLE),
            welcome_words: raw.welcome_words.unwrap_or_default(),
            model_name_text_generate: non_empty_or(raw.model_name_text_generate, DEFAULT_MODEL_NAME),
            sensitive_words: raw.sensitive_words.unwrap_or_default(),
        }
    }

    /// Config used when the backend cannot be reached at startup.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            bot_name: DEFAULT_BOT_NAME.to_owned(),
            bot_role: DEFAULT_BOT_ROLE.to_owned(),
            welcome_words: FALLBACK_WELCOME_WORDS.to_owned(),
            model_name_text_generate: DEFAULT_MODEL_NAME.to_owned(),
            sensitive_words: Vec::new(),
        }
    }

    /// The welcome text, if it is non-blank.
    ///
    /// The returned text is the configured value as-is, not trimmed.
    #[must_use]
    pub fn welcome_message(&self) -> Option<&str> {
        if self.welcome_words.trim().is_empty() { None } else { Some(&self.welcome_words) }
    }

    /// The user-editable subset, as shown in the config form.
    #[must_use]
    pub fn editable(&self) -> EditableConfig {
        EditableConfig {
            bot_name: self.bot_name.clone(),
            bot_role: self.bot_role.clone(),
            welcome_words: self.welcome_words.clone(),
            model_name_text_generate: self.model_name_text_generate.clone(),
        }
    }

    /// Overwrite the four editable fields. Server-only fields are kept.
    pub fn merge_editable(&mut self, update: EditableConfig) {
        self.bot_name = update.bot_name;
        self.bot_role = update.bot_role;
        self.welcome_words = update.welcome_words;
        self.model_name_text_generate = update.model_name_text_generate;
    }
}

fn non_empty_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}

// =============================================================================
// EDITABLE CONFIG
// =============================================================================

/// The fields a user may change. This is also the complete `/save_config`
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditableConfig {
    pub bot_name: String,
    pub bot_role: String,
    pub welcome_words: String,
    pub model_name_text_generate: String,
}

impl EditableConfig {
    /// Copy with surrounding whitespace removed from every field.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        Self {
            bot_name: self.bot_name.trim().to_owned(),
            bot_role: self.bot_role.trim().to_owned(),
            welcome_words: self.welcome_words.trim().to_owned(),
            model_name_text_generate: self.model_name_text_generate.trim().to_owned(),
        }
    }

    /// Set a field by its wire name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        let slot = match name {
            "bot_name" => &mut self.bot_name,
            "bot_role" => &mut self.bot_role,
            "welcome_words" => &mut self.welcome_words,
            "model_name_text_generate" => &mut self.model_name_text_generate,
            _ => return false,
        };
        *slot = value.into();
        true
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

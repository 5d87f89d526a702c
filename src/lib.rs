//! Chat widget controller.
//!
//! A `ChatWidget` keeps one chat session (bot config, history, config panel)
//! in sync with a chat backend and renders it into a `ChatView`.

pub mod api;
pub mod config;
pub mod message;
pub mod panel;
pub mod settings;
pub mod view;
pub mod widget;

pub use api::{ApiError, ChatBackend, HttpBackend};
pub use config::{BotConfig, EditableConfig};
pub use message::{ChatMessage, Sender};
pub use panel::ConfigPanel;
pub use settings::WidgetSettings;
pub use view::{ChatView, MemoryView};
pub use widget::{ChatWidget, WidgetEvent};

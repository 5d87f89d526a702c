//! Chat widget controller.
//!
//! DESIGN
//! ======
//! `ChatWidget` owns one session: the bot config, the chat history, and the
//! config panel state, plus the view they are rendered into. The backend is
//! the source of truth at startup; after that, history is appended locally
//! around each `/chat` round trip and is never pushed back to the server.
//!
//! The handle is a cheap `Clone` over `Arc<Mutex<..>>` so a UI loop can run
//! several actions at once. The lock is never held across an `.await`, which
//! means overlapping sends, or a reset during a pending send, interleave
//! freely. Replies render in completion order.
//!
//! ERROR HANDLING
//! ==============
//! No failure is fatal. Config and history fetches fall back silently, a
//! failed send renders one inline bot message, a failed reset is ignored,
//! and a failed save raises a blocking alert without touching state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ChatBackend, ChatReply};
use crate::config::BotConfig;
use crate::message::{ChatMessage, Sender};
use crate::panel::{ConfigPanel, PanelTrigger};
use crate::view::ChatView;

/// Bot text rendered when a send fails.
pub const SEND_FAILED_MESSAGE: &str = "抱歉，发送消息时出现错误";
/// Alert shown when the backend rejects a config update.
pub const SAVE_REJECTED_ALERT: &str = "保存配置失败";
/// Alert shown when a config update could not be delivered.
pub const SAVE_FAILED_ALERT: &str = "保存配置时出现错误";

const ENTER_KEY: &str = "Enter";

// =============================================================================
// EVENTS
// =============================================================================

/// UI events the widget reacts to once its handlers are bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    SendClicked,
    /// A key pressed in the input box, by DOM key name.
    KeyPressed(String),
    ResetClicked,
    ConfigOpenClicked,
    ConfigSaveClicked,
    ConfigCancelClicked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Starting,
    Bound,
    Disposed,
}

// =============================================================================
// SESSION
// =============================================================================

struct Session<V> {
    config: BotConfig,
    history: Vec<ChatMessage>,
    panel: ConfigPanel,
    phase: Phase,
    view: V,
}

impl<V: ChatView> Session<V> {
    fn render(&mut self, sender: Sender, text: &str) {
        self.view.append_message(sender, text);
        self.view.scroll_to_bottom();
    }

    fn add_message(&mut self, sender: Sender, text: &str, persist: bool) {
        self.render(sender, text);
        if persist {
            self.history.push(ChatMessage::now(sender, text));
        }
    }

    /// Render the welcome text, unpersisted, if one is configured.
    fn render_welcome(&mut self) {
        if let Some(welcome) = self.config.welcome_message().map(str::to_owned) {
            self.add_message(Sender::Bot, &welcome, false);
        }
    }

    fn apply_panel(&mut self, trigger: PanelTrigger) {
        let next = self.panel.transition(trigger);
        self.panel = next;
        self.view.show_config_panel(next);
    }
}

// =============================================================================
// CHAT WIDGET
// =============================================================================

pub struct ChatWidget<V> {
    id: Uuid,
    backend: Arc<dyn ChatBackend>,
    session: Arc<Mutex<Session<V>>>,
}

impl<V> Clone for ChatWidget<V> {
    fn clone(&self) -> Self {
        Self { id: self.id, backend: Arc::clone(&self.backend), session: Arc::clone(&self.session) }
    }
}

impl<V: ChatView + 'static> ChatWidget<V> {
    /// Start a widget: load config, load history, show the welcome message
    /// when the history is empty, then bind event handling.
    ///
    /// Every step is awaited before the next. Fetch failures fall back to
    /// defaults, so startup itself cannot fail.
    pub async fn create(backend: Arc<dyn ChatBackend>, view: V) -> Self {
        let widget = Self {
            id: Uuid::new_v4(),
            backend,
            session: Arc::new(Mutex::new(Session {
                config: BotConfig::fallback(),
                history: Vec::new(),
                panel: ConfigPanel::Closed,
                phase: Phase::Starting,
                view,
            })),
        };

        widget.load_config().await;
        widget.load_history().await;
        {
            let mut session = widget.session();
            if session.history.is_empty() {
                session.render_welcome();
            }
            session.phase = Phase::Bound;
        }

        info!(widget_id = %widget.id, "chat widget ready");
        widget
    }

    /// End the widget's lifetime. Events are ignored from here on and replies
    /// to sends still in flight are dropped instead of rendered.
    pub fn dispose(self) {
        self.session().phase = Phase::Disposed;
        info!(widget_id = %self.id, "chat widget disposed");
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> BotConfig {
        self.session().config.clone()
    }

    #[must_use]
    pub fn history(&self) -> Vec<ChatMessage> {
        self.session().history.clone()
    }

    #[must_use]
    pub fn panel(&self) -> ConfigPanel {
        self.session().panel
    }

    /// Run `f` against the view.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.session().view)
    }

    /// Run `f` against the view mutably, e.g. to type into the input box.
    pub fn with_view_mut<R>(&self, f: impl FnOnce(&mut V) -> R) -> R {
        f(&mut self.session().view)
    }

    // =========================================================================
    // STARTUP
    // =========================================================================

    async fn load_config(&self) {
        match self.backend.get_config().await {
            Ok(raw) => {
                let config = BotConfig::normalize(raw);
                let mut session = self.session();
                session.view.fill_config_form(&config.editable());
                session.config = config;
            }
            Err(e) => {
                warn!(widget_id = %self.id, error = %e, "config load failed; using fallback config");
                self.session().config = BotConfig::fallback();
            }
        }
    }

    async fn load_history(&self) {
        let history = match self.backend.get_chat_history().await {
            Ok(history) => history,
            Err(e) => {
                warn!(widget_id = %self.id, error = %e, "history load failed; starting empty");
                Vec::new()
            }
        };

        let mut session = self.session();
        for message in &history {
            session.render(message.sender, &message.text);
        }
        debug!(widget_id = %self.id, count = history.len(), "history loaded");
        session.history = history;
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Dispatch a UI event. Events arriving before startup finishes or after
    /// dispose are ignored.
    pub async fn handle_event(&self, event: WidgetEvent) {
        let phase = self.session().phase;
        if phase != Phase::Bound {
            debug!(widget_id = %self.id, ?event, ?phase, "event ignored; handlers not bound");
            return;
        }

        match event {
            WidgetEvent::SendClicked => self.submit_input().await,
            WidgetEvent::KeyPressed(key) => {
                if key == ENTER_KEY {
                    self.submit_input().await;
                }
            }
            WidgetEvent::ResetClicked => self.reset_chat(),
            WidgetEvent::ConfigOpenClicked => self.session().apply_panel(PanelTrigger::OpenClicked),
            WidgetEvent::ConfigCancelClicked => self.session().apply_panel(PanelTrigger::CancelClicked),
            WidgetEvent::ConfigSaveClicked => self.save_config().await,
        }
    }

    /// Send whatever is in the input box.
    pub async fn submit_input(&self) {
        let text = self.session().view.input_text();
        self.send_message(&text).await;
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Render and record a message. With `persist` false the message is only
    /// displayed, as for the welcome text.
    pub fn add_message(&self, sender: Sender, text: &str, persist: bool) {
        self.session().add_message(sender, text, persist);
    }

    /// Send one user message and render the bot's reply.
    ///
    /// Blank input is a no-op. The user message is shown and recorded before
    /// the request goes out; a failed request renders [`SEND_FAILED_MESSAGE`].
    pub async fn send_message(&self, text: &str) {
        let message = text.trim();
        if message.is_empty() {
            return;
        }

        {
            let mut session = self.session();
            if session.phase == Phase::Disposed {
                return;
            }
            session.add_message(Sender::User, message, true);
            session.view.clear_input();
        }

        let reply = self.backend.chat(message).await;

        let mut session = self.session();
        if session.phase == Phase::Disposed {
            debug!(widget_id = %self.id, "reply arrived after dispose; dropped");
            return;
        }
        match reply {
            Ok(ChatReply { response: Some(text) }) if !text.is_empty() => {
                session.add_message(Sender::Bot, &text, true);
            }
            Ok(_) => debug!(widget_id = %self.id, "chat reply carried no response text"),
            Err(e) => {
                warn!(widget_id = %self.id, error = %e, "chat request failed");
                session.add_message(Sender::Bot, SEND_FAILED_MESSAGE, true);
            }
        }
    }

    /// Clear the transcript locally and ask the backend to do the same.
    ///
    /// The `/reset_chat` request is fire-and-forget: it is dispatched and its
    /// outcome never observed, so the view is usable again immediately. The
    /// welcome message is re-rendered, unpersisted, right after dispatch.
    pub fn reset_chat(&self) {
        {
            let mut session = self.session();
            session.view.clear_messages();
            session.history.clear();
        }

        self.dispatch_reset();

        self.session().render_welcome();
    }

    /// Submit the config form.
    ///
    /// Only the four editable fields are sent, trimmed. On success they are
    /// merged into the config, the panel closes, and the chat is reset. On
    /// failure an alert is shown and nothing else changes.
    pub async fn save_config(&self) {
        let update = self.session().view.read_config_form().trimmed();

        let result = self.backend.save_config(&update).await;
        match result {
            Ok(()) => {
                {
                    let mut session = self.session();
                    session.config.merge_editable(update);
                    session.apply_panel(PanelTrigger::SaveSucceeded);
                }
                info!(widget_id = %self.id, "config saved");
                self.reset_chat();
            }
            Err(e) => {
                let alert = if e.is_status() { SAVE_REJECTED_ALERT } else { SAVE_FAILED_ALERT };
                warn!(widget_id = %self.id, error = %e, "config save failed");
                self.session().view.alert(alert);
            }
        }
    }

    fn dispatch_reset(&self) {
        let backend = Arc::clone(&self.backend);
        let widget_id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    if let Err(e) = backend.reset_chat().await {
                        debug!(%widget_id, error = %e, "reset request failed; ignored");
                    }
                });
            }
            Err(_) => warn!(%widget_id, "no async runtime; reset request not sent"),
        }
    }

    fn session(&self) -> MutexGuard<'_, Session<V>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;

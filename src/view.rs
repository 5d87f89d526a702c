//! Rendering surface for the widget.
//!
//! DESIGN
//! ======
//! `ChatView` is everything the controller touches on screen: the message
//! list, the input box, the four config form fields, panel visibility and
//! blocking alerts. The controller owns the session state; a view only
//! displays it and hands back what the user typed.

use crate::config::EditableConfig;
use crate::message::Sender;
use crate::panel::ConfigPanel;

/// A DOM-like surface the controller renders into.
pub trait ChatView: Send {
    /// Append one message node at the bottom of the list.
    fn append_message(&mut self, sender: Sender, text: &str);

    /// Scroll so the newest message is visible.
    fn scroll_to_bottom(&mut self);

    /// Remove every message node.
    fn clear_messages(&mut self);

    /// Current contents of the input box.
    fn input_text(&self) -> String;

    fn clear_input(&mut self);

    /// Current contents of the config form fields, untrimmed.
    fn read_config_form(&self) -> EditableConfig;

    fn fill_config_form(&mut self, config: &EditableConfig);

    fn show_config_panel(&mut self, panel: ConfigPanel);

    /// Show a blocking alert.
    fn alert(&mut self, message: &str);
}

// =============================================================================
// MEMORY VIEW
// =============================================================================

/// A rendered message node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMessage {
    pub sender: Sender,
    pub text: String,
}

/// Headless view that keeps everything it is asked to display.
#[derive(Clone, Debug, Default)]
pub struct MemoryView {
    pub messages: Vec<RenderedMessage>,
    /// Number of messages visible at the last scroll-to-bottom.
    pub scrolled_to: usize,
    pub input: String,
    pub form: EditableConfig,
    pub panel: ConfigPanel,
    pub alerts: Vec<String>,
}

impl MemoryView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate typing into the input box.
    pub fn type_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// `(sender, text)` pairs in display order.
    #[must_use]
    pub fn transcript(&self) -> Vec<(Sender, &str)> {
        self.messages.iter().map(|m| (m.sender, m.text.as_str())).collect()
    }
}

impl ChatView for MemoryView {
    fn append_message(&mut self, sender: Sender, text: &str) {
        self.messages.push(RenderedMessage { sender, text: text.to_owned() });
    }

    fn scroll_to_bottom(&mut self) {
        self.scrolled_to = self.messages.len();
    }

    fn clear_messages(&mut self) {
        self.messages.clear();
        self.scrolled_to = 0;
    }

    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn read_config_form(&self) -> EditableConfig {
        self.form.clone()
    }

    fn fill_config_form(&mut self, config: &EditableConfig) {
        self.form = config.clone();
    }

    fn show_config_panel(&mut self, panel: ConfigPanel) {
        self.panel = panel;
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

//! Terminal rendering and command parsing for the `chat-widget` binary.
//!
//! Stdout plays the message list, stdin lines play the input box, and slash
//! commands stand in for the widget's buttons.

use std::fmt;
use std::io::Write;

use chat_widget::config::EditableConfig;
use chat_widget::message::Sender;
use chat_widget::panel::ConfigPanel;
use chat_widget::view::ChatView;
use chat_widget::widget::{ChatWidget, WidgetEvent};
use tracing::{debug, warn};

#[cfg(test)]
#[path = "terminal_test.rs"]
mod terminal_test;

pub const HELP: &str = "\
commands:
  <text>                 send a message
  /reset                 clear the conversation
  /config                open the config panel
  /set <field> <value>   edit a config field (bot_name, bot_role, welcome_words, model_name_text_generate)
  /save                  save the config form
  /cancel                close the config panel without saving
  /help                  show this help
  /quit                  exit";

// =============================================================================
// COMMANDS
// =============================================================================

/// One line of terminal input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Reset,
    Config,
    Set { field: String, value: String },
    Save,
    Cancel,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Self::Say(line.to_owned());
        };
        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match name {
            "reset" => Self::Reset,
            "config" => Self::Config,
            "set" => {
                let args = args.trim_start();
                let (field, value) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
                Self::Set { field: field.to_owned(), value: value.to_owned() }
            }
            "save" => Self::Save,
            "cancel" => Self::Cancel,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

// =============================================================================
// TERMINAL VIEW
// =============================================================================

/// A [`ChatView`] that writes the conversation to a terminal stream.
///
/// The first failed write marks the view broken; later writes are skipped.
pub struct TerminalView<W> {
    out: W,
    input: String,
    broken: bool,
    pub form: EditableConfig,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out, input: String::new(), broken: false, form: EditableConfig::default() }
    }

    /// Put `text` in the input box, replacing whatever was there.
    pub fn type_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// True once the output stream has failed.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn print_help(&mut self) {
        self.emit(format_args!("{HELP}"));
    }

    pub fn notice(&mut self, text: &str) {
        self.emit(format_args!("* {text}"));
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn emit(&mut self, line: fmt::Arguments<'_>) {
        if self.broken {
            debug!("terminal output broken; line dropped");
            return;
        }
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!(error = %e, "terminal write failed; output disabled");
            self.broken = true;
        }
    }

    fn print_form(&mut self) {
        let form = self.form.clone();
        self.emit(format_args!("[config]"));
        for (name, value) in [
            ("bot_name", &form.bot_name),
            ("bot_role", &form.bot_role),
            ("welcome_words", &form.welcome_words),
            ("model_name_text_generate", &form.model_name_text_generate),
        ] {
            self.emit(format_args!("  {name}: {value}"));
        }
        self.emit(format_args!("  (/set <field> <value>, /save, /cancel)"));
    }
}

impl<W: Write + Send> ChatView for TerminalView<W> {
    fn append_message(&mut self, sender: Sender, text: &str) {
        let label = match sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        self.emit(format_args!("{label}> {text}"));
    }

    fn scroll_to_bottom(&mut self) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "terminal flush failed; output disabled");
            self.broken = true;
        }
    }

    fn clear_messages(&mut self) {
        self.emit(format_args!("--- conversation cleared ---"));
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
        match panel {
            ConfigPanel::Open => self.print_form(),
            ConfigPanel::Closed => self.emit(format_args!("[config closed]")),
        }
    }

    fn alert(&mut self, message: &str) {
        self.emit(format_args!("!! {message}"));
    }
}

// =============================================================================
// INPUT
// =============================================================================

/// Type `line` into the input box and press Enter.
///
/// Typing and the read inside `submit_input` happen without an await in
/// between, so on a single-threaded runtime a later line cannot overwrite the
/// input before it is sent.
pub async fn submit_line<W: Write + Send + 'static>(widget: &ChatWidget<TerminalView<W>>, line: String) {
    widget.with_view_mut(|v| v.type_input(line));
    widget.handle_event(WidgetEvent::KeyPressed(ENTER_KEY.to_owned())).await;
}

const ENTER_KEY: &str = "Enter";

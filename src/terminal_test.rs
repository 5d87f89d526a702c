use super::*;
use chat_widget::api::{ApiError, ChatBackend, ChatReply};
use chat_widget::config::RawConfig;
use chat_widget::message::ChatMessage;
use std::io;
use std::sync::{Arc, Mutex};

// =========================================================================
// EchoBackend
// =========================================================================

#[derive(Default)]
struct EchoBackend {
    sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ChatBackend for EchoBackend {
    async fn get_config(&self) -> Result<RawConfig, ApiError> {
        Ok(RawConfig::default())
    }

    async fn get_chat_history(&self) -> Result<Vec<ChatMessage>, ApiError> {
        Ok(Vec::new())
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        self.sent.lock().unwrap().push(message.to_owned());
        Ok(ChatReply { response: Some(format!("re: {message}")) })
    }

    async fn reset_chat(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn save_config(&self, _update: &EditableConfig) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Writer whose every write fails, like stdout after the reader hung up.
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

fn rendered(view: &TerminalView<Vec<u8>>) -> String {
    String::from_utf8(view.output().clone()).unwrap()
}

// =============================================================
// Command::parse
// =============================================================

#[test]
fn plain_line_is_say() {
    assert_eq!(Command::parse("hello there"), Command::Say("hello there".into()));
    assert_eq!(Command::parse(""), Command::Say(String::new()));
}

#[test]
fn slash_commands_parse() {
    assert_eq!(Command::parse("/reset"), Command::Reset);
    assert_eq!(Command::parse("/config"), Command::Config);
    assert_eq!(Command::parse("/save"), Command::Save);
    assert_eq!(Command::parse("/cancel"), Command::Cancel);
    assert_eq!(Command::parse("/help"), Command::Help);
    assert_eq!(Command::parse("/quit"), Command::Quit);
    assert_eq!(Command::parse("  /exit"), Command::Quit);
}

#[test]
fn set_keeps_value_spaces() {
    assert_eq!(
        Command::parse("/set welcome_words Hello and welcome"),
        Command::Set { field: "welcome_words".into(), value: "Hello and welcome".into() }
    );
    assert_eq!(Command::parse("/set bot_name"), Command::Set { field: "bot_name".into(), value: String::new() });
}

#[test]
fn unknown_command_is_reported() {
    assert_eq!(Command::parse("/dance now"), Command::Unknown("dance".into()));
}

// =============================================================
// TerminalView
// =============================================================

#[test]
fn messages_are_labelled_by_sender() {
    let mut view = TerminalView::new(Vec::new());
    view.append_message(Sender::User, "hi");
    view.append_message(Sender::Bot, "hello");
    assert_eq!(rendered(&view), "you> hi\nbot> hello\n");
}

#[test]
fn opening_panel_prints_form() {
    let mut view = TerminalView::new(Vec::new());
    view.fill_config_form(&EditableConfig {
        bot_name: "Ada".into(),
        bot_role: "helper".into(),
        welcome_words: String::new(),
        model_name_text_generate: "m1".into(),
    });
    view.show_config_panel(ConfigPanel::Open);
    let out = rendered(&view);
    assert!(out.contains("bot_name: Ada"));
    assert!(out.contains("model_name_text_generate: m1"));
}

#[test]
fn alert_and_clear_are_visible() {
    let mut view = TerminalView::new(Vec::new());
    view.clear_messages();
    view.alert("failed");
    let out = rendered(&view);
    assert!(out.contains("conversation cleared"));
    assert!(out.contains("!! failed"));
}

#[test]
fn type_input_fills_input_box() {
    let mut view = TerminalView::new(Vec::new());
    view.type_input("draft");
    assert_eq!(view.input_text(), "draft");
    view.clear_input();
    assert_eq!(view.input_text(), "");
}

#[test]
fn failed_write_marks_view_broken() {
    let mut view = TerminalView::new(ClosedPipe);
    assert!(!view.is_broken());
    view.append_message(Sender::User, "hi");
    assert!(view.is_broken());
    view.alert("still dropped");
    assert!(view.is_broken());
}

#[test]
fn failed_flush_marks_view_broken() {
    let mut view = TerminalView::new(ClosedPipe);
    view.scroll_to_bottom();
    assert!(view.is_broken());
}

// =============================================================
// submit_line
// =============================================================

#[tokio::test]
async fn submit_line_goes_through_input_box_and_enter() {
    let backend = Arc::new(EchoBackend::default());
    let widget = ChatWidget::create(backend.clone() as Arc<dyn ChatBackend>, TerminalView::new(Vec::new())).await;

    submit_line(&widget, "  hello  ".to_owned()).await;

    assert_eq!(*backend.sent.lock().unwrap(), vec!["hello".to_owned()]);
    assert_eq!(widget.with_view(ChatView::input_text), "");
    let out = widget.with_view(|v| String::from_utf8(v.output().clone()).unwrap());
    assert!(out.contains("you> hello\nbot> re: hello\n"));
    assert_eq!(widget.history().len(), 2);
}

#[tokio::test]
async fn submit_blank_line_sends_nothing() {
    let backend = Arc::new(EchoBackend::default());
    let widget = ChatWidget::create(backend.clone() as Arc<dyn ChatBackend>, TerminalView::new(Vec::new())).await;

    submit_line(&widget, "   ".to_owned()).await;

    assert!(backend.sent.lock().unwrap().is_empty());
    assert!(widget.history().is_empty());
}

mod terminal;

use std::sync::Arc;

use chat_widget::settings::DEFAULT_BASE_URL;
use chat_widget::{ApiError, ChatBackend, ChatWidget, HttpBackend, WidgetEvent, WidgetSettings};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use terminal::{Command, TerminalView};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("backend setup failed: {0}")]
    Backend(#[from] ApiError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chat-widget", about = "Terminal front end for the chat widget")]
struct Cli {
    #[arg(long, env = "CHAT_WIDGET_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

// Single-threaded, like the UI event loop the widget models.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    // Stdout carries the conversation; logs go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = WidgetSettings::with_base_url(&cli.base_url);
    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(&settings)?);

    let widget = ChatWidget::create(backend, TerminalView::new(std::io::stdout())).await;
    tracing::info!(base_url = %settings.base_url, widget_id = %widget.id(), "chat widget attached to terminal");
    widget.with_view_mut(TerminalView::print_help);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Say(text) => {
                // Spawned so the prompt keeps reading while a reply is pending.
                let widget = widget.clone();
                tokio::spawn(async move { terminal::submit_line(&widget, text).await });
            }
            Command::Reset => widget.handle_event(WidgetEvent::ResetClicked).await,
            Command::Config => widget.handle_event(WidgetEvent::ConfigOpenClicked).await,
            Command::Set { field, value } => {
                if !widget.panel().is_open() {
                    widget.with_view_mut(|v| v.notice("open the config panel with /config first"));
                } else if !widget.with_view_mut(|v| v.form.set_field(&field, value)) {
                    widget.with_view_mut(|v| v.notice(&format!("unknown field: {field}")));
                }
            }
            Command::Save => widget.handle_event(WidgetEvent::ConfigSaveClicked).await,
            Command::Cancel => widget.handle_event(WidgetEvent::ConfigCancelClicked).await,
            Command::Help => widget.with_view_mut(TerminalView::print_help),
            Command::Quit => break,
            Command::Unknown(name) => widget.with_view_mut(|v| v.notice(&format!("unknown command: /{name}"))),
        }
        if widget.with_view(TerminalView::is_broken) {
            tracing::error!("terminal output failed; exiting");
            break;
        }
    }

    widget.dispose();
    Ok(())
}

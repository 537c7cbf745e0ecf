//! Terminal front end for the chat widget.
//!
//! Lines typed at the prompt are sent to the backend; `/new`, `/font`,
//! `/save`, `/help` and `/quit` map to the widget's header buttons.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use tracing::warn;

use crate::backend::{ChatBackend, HttpBackend};
use crate::config::AppConfig;
use crate::widget::{
    ChatView, ChatWidget, FontSizeLevel, LoadingId, Message, SendOutcome, Sender, TranscriptFile,
    help,
};

/// [`ChatView`] printing bubbles to a terminal and saving transcripts to
/// `download_dir`.
#[derive(Debug)]
pub struct TerminalView<R, W> {
    input: R,
    out: W,
    download_dir: PathBuf,
}

impl<R: BufRead, W: Write> TerminalView<R, W> {
    pub fn new(input: R, out: W, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            input,
            out,
            download_dir: download_dir.into(),
        }
    }

    /// Show the prompt and read one line. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        write!(self.out, "{} ", ">".bold())?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn print(&mut self, text: impl std::fmt::Display) {
        self.emit(format_args!("{text}\n"));
    }

    /// Write without a trailing newline and flush.
    fn emit(&mut self, text: impl std::fmt::Display) {
        let result = write!(self.out, "{text}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            warn!(name: "terminal.write.failed", error = %e, "Failed to write to terminal");
        }
    }
}

impl<R: BufRead, W: Write> ChatView for TerminalView<R, W> {
    fn append(&mut self, message: &Message) {
        let label = match message.sender {
            Sender::User => message.sender.transcript_label().cyan().bold(),
            Sender::Bot => message.sender.transcript_label().green().bold(),
        };
        let text = message.plain_text();
        self.print(format_args!("{label}\n{text}\n"));
    }

    fn show_loading(&mut self, _id: &LoadingId) {
        self.emit("선배봇이 답변을 준비하고 있어요...".dimmed());
    }

    fn remove_loading(&mut self, _id: &LoadingId) {
        self.emit("\r\x1b[2K");
    }

    fn clear_messages(&mut self) {
        self.print("──────── 새 채팅 ────────".dimmed());
    }

    fn set_send_enabled(&mut self, _enabled: bool) {}

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}

    fn apply_font_size(&mut self, level: FontSizeLevel) {
        self.print(format_args!("글자 크기: {}", level.label()));
    }

    fn show_help(&mut self, html: &str) {
        let text = help::to_plain_text(html);
        self.print(format_args!("{text}\n"));
    }

    fn hide_help(&mut self) {}

    fn confirm(&mut self, prompt: &str) -> bool {
        self.emit(format_args!("{prompt} [y/N] "));
        let mut answer = String::new();
        if let Err(e) = self.input.read_line(&mut answer) {
            warn!(name: "terminal.read.failed", error = %e, "Failed to read confirmation");
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "예" | "네")
    }

    fn alert(&mut self, text: &str) {
        self.print(text.yellow());
    }

    fn offer_download(&mut self, file: &TranscriptFile) {
        let path = self.download_dir.join(&file.filename);
        match std::fs::write(&path, &file.contents) {
            Ok(()) => self.print(format_args!("대화 기록 저장: {}", path.display())),
            Err(e) => {
                warn!(name: "terminal.save.failed", path = %path.display(), error = %e, "Transcript write failed");
                self.print(format_args!("{} {e}", "저장 실패:".red()));
            }
        }
    }
}

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    Send(&'a str),
    NewChat,
    FontSize,
    Save,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> Input<'a> {
    #[must_use]
    pub fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        if !trimmed.starts_with('/') {
            return Self::Send(line);
        }
        match trimmed {
            "/new" => Self::NewChat,
            "/font" => Self::FontSize,
            "/save" => Self::Save,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            other => Self::Unknown(other),
        }
    }
}

/// Drive `widget` from its view's input until `/quit` or end of input.
pub async fn run_loop<B, R, W>(widget: &mut ChatWidget<B, TerminalView<R, W>>) -> io::Result<()>
where
    B: ChatBackend,
    R: BufRead,
    W: Write,
{
    while let Some(line) = widget.view_mut().read_line()? {
        match Input::parse(&line) {
            Input::Send(text) => {
                widget.send_message(text).await;
            }
            Input::NewChat => {
                widget.new_chat();
            }
            Input::FontSize => {
                widget.cycle_font_size();
            }
            Input::Save => {
                widget.save_transcript();
            }
            Input::Help => widget.open_help(),
            Input::Quit => break,
            Input::Unknown(command) => {
                widget
                    .view_mut()
                    .alert(&format!("알 수 없는 명령: {command} (/new /font /save /help /quit)"));
            }
        }
    }
    Ok(())
}

/// Chat against the configured backend from stdin/stdout.
///
/// With `message`, sends it once and exits; a failed request is an error.
pub async fn run(config: &AppConfig, message: Option<String>) -> anyhow::Result<()> {
    let base_url = config.widget.remote_base_url(&config.server);
    let backend = HttpBackend::new(&base_url, config.widget.variant)?;
    let view = TerminalView::new(io::BufReader::new(io::stdin()), io::stdout(), std::env::current_dir()?);
    let mut widget = ChatWidget::new(backend, view);

    if let Some(message) = message {
        return match widget.send_message(&message).await {
            SendOutcome::Failed => anyhow::bail!("chat request to {base_url} failed"),
            SendOutcome::Ignored | SendOutcome::Answered => Ok(()),
        };
    }

    widget.render_all();
    run_loop(&mut widget).await?;
    Ok(())
}

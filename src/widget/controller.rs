//! Chat widget controller.

use chrono::Local;
use tracing::{info, warn};

use super::help::HELP_HTML;
use super::transcript::NOTHING_TO_SAVE;
use super::{ChatView, FontSizeLevel, LoadingId, Message, TranscriptFile};
use crate::backend::{BackendError, ChatBackend, Variant};

/// Bubble text shown when a request fails.
pub const FAILURE_MESSAGE: &str = "죄송합니다. 오류가 발생했습니다. 다시 시도해주세요.";

/// Prompt shown before a new chat clears the conversation.
pub const NEW_CHAT_PROMPT: &str = "새로운 채팅을 시작하시겠습니까?";

/// Request lifecycle of the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingResponse,
}

/// Result of [`ChatWidget::send_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// Bot bubble appended from the backend's reply.
    Answered,
    /// Failure bubble appended.
    Failed,
}

/// What the widget shows, independent of where it is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    pub messages: Vec<Message>,
    pub font_size: FontSizeLevel,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            messages: vec![Message::greeting()],
            font_size: FontSizeLevel::default(),
        }
    }
}

/// Failure bubble text for `variant`.
#[must_use]
pub fn failure_text(variant: Variant, error: &BackendError) -> String {
    if variant.includes_error_detail() {
        format!("{FAILURE_MESSAGE} ({error})")
    } else {
        FAILURE_MESSAGE.to_string()
    }
}

/// Drives one chat conversation against a [`ChatBackend`], rendering into a
/// [`ChatView`].
///
/// `send_message` borrows the widget mutably for the whole round trip, so a
/// widget never has more than one request in flight.
#[derive(Debug)]
pub struct ChatWidget<B, V> {
    backend: B,
    view: V,
    state: WidgetState,
    phase: Phase,
    loading: Option<LoadingId>,
}

impl<B: ChatBackend, V: ChatView> ChatWidget<B, V> {
    /// Start a fresh conversation holding only the greeting.
    pub fn new(backend: B, view: V) -> Self {
        Self::resume(backend, view, WidgetState::default())
    }

    /// Continue a conversation from a saved state. Nothing is rendered; call
    /// [`render_all`](Self::render_all) if the view starts empty.
    pub fn resume(backend: B, view: V, state: WidgetState) -> Self {
        Self {
            backend,
            view,
            state,
            phase: Phase::Idle,
            loading: None,
        }
    }

    /// Replay every message and the font preset into the view.
    pub fn render_all(&mut self) {
        self.view.clear_messages();
        for message in &self.state.messages {
            self.view.append(message);
        }
        self.view.apply_font_size(self.state.font_size);
    }

    /// Send the trimmed `input` to the backend and render the exchange.
    pub async fn send_message(&mut self, input: &str) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }

        self.phase = Phase::AwaitingResponse;
        self.view.set_send_enabled(false);
        self.push(Message::user(text));
        self.view.clear_input();
        self.show_loading();

        let variant = self.backend.variant();
        let result = self.backend.ask(text).await;

        self.hide_loading();
        let outcome = match result {
            Ok(answer) => {
                self.push(Message::bot(answer, variant.renders_markdown()));
                SendOutcome::Answered
            }
            Err(error) => {
                warn!(
                    name: "widget.send.failed",
                    variant = %variant,
                    error = %error,
                    "Chat request failed"
                );
                self.push(Message::bot(failure_text(variant, &error), false));
                SendOutcome::Failed
            }
        };

        self.view.set_send_enabled(true);
        self.view.focus_input();
        self.phase = Phase::Idle;
        outcome
    }

    /// Reset to the greeting after the user confirms.
    ///
    /// Returns whether the conversation was reset.
    pub fn new_chat(&mut self) -> bool {
        if !self.view.confirm(NEW_CHAT_PROMPT) {
            return false;
        }
        self.state.messages.clear();
        self.view.clear_messages();
        self.push(Message::greeting());
        info!(name: "widget.new_chat", "Conversation reset");
        true
    }

    /// Move to the next font-size preset.
    pub fn cycle_font_size(&mut self) -> FontSizeLevel {
        self.state.font_size = self.state.font_size.next();
        self.view.apply_font_size(self.state.font_size);
        info!(
            name: "widget.font_size",
            level = self.state.font_size.as_str(),
            "Font size changed"
        );
        self.state.font_size
    }

    /// Export the conversation, stamped with the local time.
    pub fn save_transcript(&mut self) -> Option<TranscriptFile> {
        let saved_at = Local::now().fixed_offset();
        let Some(file) = TranscriptFile::render(&self.state.messages, &saved_at) else {
            self.view.alert(NOTHING_TO_SAVE);
            return None;
        };
        self.view.offer_download(&file);
        info!(
            name: "widget.transcript.saved",
            filename = %file.filename,
            messages = self.state.messages.len(),
            "Transcript saved"
        );
        Some(file)
    }

    pub fn open_help(&mut self) {
        self.view.show_help(HELP_HTML);
    }

    pub fn close_help(&mut self) {
        self.view.hide_help();
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    #[must_use]
    pub fn font_size(&self) -> FontSizeLevel {
        self.state.font_size
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Split into the saved state and the view.
    pub fn into_parts(self) -> (WidgetState, V) {
        (self.state, self.view)
    }

    fn push(&mut self, message: Message) {
        self.view.append(&message);
        self.state.messages.push(message);
    }

    fn show_loading(&mut self) {
        self.hide_loading();
        let id = LoadingId::generate();
        self.view.show_loading(&id);
        self.loading = Some(id);
    }

    fn hide_loading(&mut self) {
        if let Some(id) = self.loading.take() {
            self.view.remove_loading(&id);
        }
    }
}

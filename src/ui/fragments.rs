//! htmx fragment handlers driving the page's widget.
//!
//! Each request rebuilds a [`ChatWidget`] from the guest's stored state,
//! renders into a [`FragmentView`], and writes the state back.

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use super::page::{chat_page, font_size_button, font_style};
use crate::AppState;
use crate::backend::ChatBackend;
use crate::session::Guest;
use crate::widget::{
    ChatWidget, FAILURE_MESSAGE, FragmentView, SendOutcome, TranscriptFile, WidgetState,
    transcript,
};

/// Form posted by the chat input.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

type PageWidget = ChatWidget<Arc<dyn ChatBackend>, FragmentView>;

fn widget_for(state: &AppState, guest: &Guest) -> Result<PageWidget, Response> {
    let backend = state.widget_backend(guest).map_err(|e| {
        error!(
            name: "widget.backend.failed",
            guest = %guest.id(),
            error = %e,
            "Could not build widget backend"
        );
        (StatusCode::BAD_GATEWAY, FAILURE_MESSAGE).into_response()
    })?;
    Ok(ChatWidget::resume(
        backend,
        state.fragment_view(),
        guest.widget_state(),
    ))
}

/// GET / - a fresh chat page.
///
/// Loading the page starts the widget over: earlier bubbles and the font
/// preset are dropped. The backend's question history is kept.
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (guest, jar) = state.guest_session(jar);
    let widget_state = WidgetState::default();
    let page = chat_page(
        state.config.widget.variant,
        &widget_state,
        &state.config.widget.avatar_path,
    );
    guest.store_widget_state(widget_state);
    (jar, Html(page))
}

/// POST /widget/send - user and bot bubbles for one exchange.
pub async fn send(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SendForm>,
) -> Response {
    let (guest, jar) = state.guest_session(jar);
    let mut widget = match widget_for(&state, &guest) {
        Ok(widget) => widget,
        Err(response) => return (jar, response).into_response(),
    };

    let outcome = widget.send_message(&form.message).await;
    if outcome == SendOutcome::Ignored {
        return (jar, StatusCode::NO_CONTENT).into_response();
    }

    let (widget_state, view) = widget.into_parts();
    guest.store_widget_state(widget_state);
    info!(
        name: "widget.send.completed",
        guest = %guest.id(),
        outcome = ?outcome,
        "Widget exchange rendered"
    );
    (jar, Html(view.html())).into_response()
}

/// POST /widget/new - container contents after a reset.
///
/// The browser asks for confirmation before posting.
pub async fn new_chat(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (guest, jar) = state.guest_session(jar);
    let mut widget = match widget_for(&state, &guest) {
        Ok(widget) => widget,
        Err(response) => return (jar, response).into_response(),
    };
    widget.new_chat();

    let (widget_state, view) = widget.into_parts();
    guest.store_widget_state(widget_state);
    (jar, Html(view.html())).into_response()
}

/// POST /widget/font-size - next preset's button plus an out-of-band style.
pub async fn font_size(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (guest, jar) = state.guest_session(jar);
    let mut widget = match widget_for(&state, &guest) {
        Ok(widget) => widget,
        Err(response) => return (jar, response).into_response(),
    };
    let level = widget.cycle_font_size();

    let (widget_state, _view) = widget.into_parts();
    guest.store_widget_state(widget_state);
    (
        jar,
        Html(format!("{}{}", font_size_button(level), font_style(level, true))),
    )
        .into_response()
}

/// GET /widget/transcript - the conversation as a text download.
pub async fn save_transcript(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (guest, jar) = state.guest_session(jar);
    let mut widget = match widget_for(&state, &guest) {
        Ok(widget) => widget,
        Err(response) => return (jar, response).into_response(),
    };

    match widget.save_transcript() {
        Some(file) => (jar, transcript_response(&file)).into_response(),
        None => (jar, (StatusCode::NOT_FOUND, transcript::NOTHING_TO_SAVE)).into_response(),
    }
}

fn transcript_response(file: &TranscriptFile) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(file.filename.as_bytes()).collect();
    let disposition = format!("attachment; filename=\"transcript.txt\"; filename*=UTF-8''{encoded}");
    (
        [
            (header::CONTENT_TYPE, TranscriptFile::CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.contents.clone(),
    )
        .into_response()
}

/// GET /widget/help - help modal body.
pub async fn help(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (guest, jar) = state.guest_session(jar);
    let mut widget = match widget_for(&state, &guest) {
        Ok(widget) => widget,
        Err(response) => return (jar, response).into_response(),
    };
    widget.open_help();
    let body = widget.view().help().unwrap_or_default().to_string();
    (jar, Html(body)).into_response()
}

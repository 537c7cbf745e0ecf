//! HTML shell of the chat page.

use crate::backend::Variant;
use crate::widget::{FontSizeLevel, NEW_CHAT_PROMPT, WidgetState, escape_html, indicator_html};

/// Element ids shared between the page and the fragment handlers.
pub mod ids {
    pub const CHAT_CONTAINER: &str = "chat-container";
    pub const FONT_SIZE_BUTTON: &str = "btn-font-size";
    pub const FONT_SIZE_STYLE: &str = "font-size-style";
    pub const HELP_MODAL: &str = "help-modal";
    pub const HELP_CONTENT: &str = "help-content";
    pub const LOADING_INDICATOR: &str = "loading-indicator";
}

/// Render the full chat page for a guest's widget state.
#[must_use]
pub fn chat_page(variant: Variant, state: &WidgetState, avatar_path: &str) -> String {
    let messages: String = state
        .messages
        .iter()
        .map(|m| m.to_html(avatar_path))
        .collect();
    let toolbar = if variant.has_toolbar() {
        toolbar(state.font_size)
    } else {
        String::new()
    };
    let help_modal = if variant.has_toolbar() {
        help_modal()
    } else {
        String::new()
    };
    let loading = indicator_html(ids::LOADING_INDICATOR, avatar_path);

    format!(
        r##"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="청년 정책 상담 챗봇">
    <title>청년이음 - 정책 선배봇</title>

    <!-- HTMX (local) -->
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>

    <link rel="stylesheet" href="/static/main.css">
    {font_style}
</head>
<body data-variant="{variant}" hx-on:keydown="if (event.key === 'Escape') document.getElementById('{help_modal_id}')?.classList.remove('active')">
    <div class="chat-app">
        <header class="chat-header">
            <h1 class="chat-title">청년이음</h1>
            {toolbar}
        </header>

        <main class="chat-main">
            <div id="{container}" class="chat-container" aria-live="polite" aria-label="대화 내용">{messages}</div>
            {loading}
        </main>

        <form
            id="chat-form"
            class="input-area"
            hx-post="/widget/send"
            hx-target="#{container}"
            hx-swap="beforeend scroll:bottom"
            hx-indicator="#{indicator}"
            hx-disabled-elt="#send-btn"
            hx-on::after-request="this.reset(); document.getElementById('message-input').focus()"
        >
            <input id="message-input" name="message" type="text" autocomplete="off" placeholder="궁금한 정책을 물어보세요" required autofocus>
            <button id="send-btn" type="submit">전송</button>
        </form>
    </div>
    {help_modal}
</body>
</html>"##,
        font_style = font_style(state.font_size, false),
        help_modal_id = ids::HELP_MODAL,
        container = ids::CHAT_CONTAINER,
        indicator = ids::LOADING_INDICATOR,
    )
}

fn toolbar(level: FontSizeLevel) -> String {
    format!(
        r##"<div class="header-buttons">
                <button id="btn-new-chat" type="button" hx-post="/widget/new" hx-confirm="{prompt}" hx-target="#{container}" hx-swap="innerHTML">새 채팅</button>
                {font_button}
                <a id="btn-save" href="/widget/transcript" download>저장</a>
                <button id="btn-help" type="button" hx-get="/widget/help" hx-target="#{help_content}" hx-on::after-request="document.getElementById('{help_modal}').classList.add('active')">도움말</button>
            </div>"##,
        prompt = escape_html(NEW_CHAT_PROMPT),
        container = ids::CHAT_CONTAINER,
        font_button = font_size_button(level),
        help_content = ids::HELP_CONTENT,
        help_modal = ids::HELP_MODAL,
    )
}

/// Font-size button; swaps itself with the next preset's button.
#[must_use]
pub fn font_size_button(level: FontSizeLevel) -> String {
    format!(
        r#"<button id="{id}" type="button" data-level="{level}" hx-post="/widget/font-size" hx-swap="outerHTML"><span class="icon-text">{label}</span></button>"#,
        id = ids::FONT_SIZE_BUTTON,
        level = level.as_str(),
        label = level.label(),
    )
}

/// `<style>` carrying the preset's custom properties. With `oob` it replaces
/// the page's style element through an htmx out-of-band swap.
#[must_use]
pub fn font_style(level: FontSizeLevel, oob: bool) -> String {
    format!(
        r#"<style id="{id}"{oob}>{rule}</style>"#,
        id = ids::FONT_SIZE_STYLE,
        oob = if oob { r#" hx-swap-oob="true""# } else { "" },
        rule = level.root_style(),
    )
}

fn help_modal() -> String {
    format!(
        r#"<div id="{modal}" class="modal" hx-on:click="if (event.target === this) this.classList.remove('active')">
        <div class="modal-content">
            <button type="button" class="modal-close" hx-on:click="document.getElementById('{modal}').classList.remove('active')">&times;</button>
            <div id="{content}" class="markdown-content"></div>
        </div>
    </div>"#,
        modal = ids::HELP_MODAL,
        content = ids::HELP_CONTENT,
    )
}

//! Chat messages and their bubble markup.

use std::fmt::Write as _;

use pulldown_cmark::{Event, Options, Parser, TagEnd, html};

use super::LoadingId;

/// Greeting shown in a fresh conversation.
pub const GREETING: &str = "안녕하세요!\n어떤 도움이 필요하신가요?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// CSS class on the bubble's outer element.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Bot => "bot-message",
        }
    }

    /// Label used in saved transcripts.
    #[must_use]
    pub fn transcript_label(self) -> &'static str {
        match self {
            Self::User => "👤 나",
            Self::Bot => "🤖 선배봇",
        }
    }
}

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    /// Bot text is rendered as markdown instead of escaped paragraphs.
    pub markdown: bool,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            markdown: false,
        }
    }

    #[must_use]
    pub fn bot(text: impl Into<String>, markdown: bool) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            markdown,
        }
    }

    #[must_use]
    pub fn greeting() -> Self {
        Self::bot(GREETING, false)
    }

    /// Bubble markup. Bot bubbles carry the avatar at `avatar_path`.
    #[must_use]
    pub fn to_html(&self, avatar_path: &str) -> String {
        let class = self.sender.css_class();
        match self.sender {
            Sender::User => format!(
                r#"<div class="message {class}"><div class="message-bubble"><p>{}</p></div></div>"#,
                escape_html(&self.text)
            ),
            Sender::Bot if self.markdown => format!(
                r#"<div class="message {class}">{}<div class="message-bubble markdown-content">{}</div></div>"#,
                avatar_html(avatar_path),
                render_markdown(&self.text)
            ),
            Sender::Bot => format!(
                r#"<div class="message {class}">{}<div class="message-bubble">{}</div></div>"#,
                avatar_html(avatar_path),
                plain_paragraphs(&self.text)
            ),
        }
    }

    /// Visible text of the bubble, as a reader would copy it.
    #[must_use]
    pub fn plain_text(&self) -> String {
        if self.markdown {
            markdown_to_text(&self.text)
        } else {
            self.text.trim().to_string()
        }
    }
}

/// Markup for the typing indicator shown while a reply is pending.
#[must_use]
pub fn loading_html(id: &LoadingId, avatar_path: &str) -> String {
    typing_markup(id.as_str(), "", avatar_path)
}

/// Typing indicator that htmx shows only while a request is in flight.
#[must_use]
pub fn indicator_html(element_id: &str, avatar_path: &str) -> String {
    typing_markup(element_id, " htmx-indicator", avatar_path)
}

fn typing_markup(element_id: &str, extra_class: &str, avatar_path: &str) -> String {
    format!(
        r#"<div id="{}" class="message bot-message loading-message{extra_class}">{}<div class="message-bubble"><div class="typing-indicator"><span></span><span></span><span></span></div></div></div>"#,
        escape_html(element_id),
        avatar_html(avatar_path)
    )
}

fn avatar_html(avatar_path: &str) -> String {
    format!(
        r#"<div class="avatar"><img src="{}" alt="봇 아바타" onerror="this.style.display='none'; this.parentElement.classList.add('avatar-placeholder');"></div>"#,
        escape_html(avatar_path)
    )
}

fn plain_paragraphs(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let _ = write!(out, "<p>{}</p>", escape_html(line));
    }
    if out.is_empty() {
        out.push_str("<p></p>");
    }
    out
}

/// Escape text for insertion into element content or a quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML with single newlines kept as `<br>`.
///
/// Output is not sanitized: raw HTML from the backend passes through.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options()).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn markdown_to_text(text: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(text, markdown_options()) {
        match event {
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => out.push('\n'),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_is_escaped() {
        let html = Message::user("<b>월세</b> & 전세").to_html("/a.png");
        assert!(html.contains("<p>&lt;b&gt;월세&lt;/b&gt; &amp; 전세</p>"));
        assert!(html.contains("user-message"));
        assert!(!html.contains("avatar"));
    }

    #[test]
    fn test_markdown_bot_keeps_line_breaks() {
        let html = Message::bot("**월세** 지원\n둘째 줄", true).to_html("/a.png");
        assert!(html.contains("markdown-content"));
        assert!(html.contains("<strong>월세</strong> 지원<br />"));
        assert!(html.contains("둘째 줄"));
    }

    #[test]
    fn test_plain_bot_is_not_interpreted() {
        let html = Message::bot("<script>x</script>", false).to_html("/a.png");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("markdown-content"));
    }

    #[test]
    fn test_greeting_paragraphs() {
        let html = Message::greeting().to_html("/static/assets/images/avatar.png");
        assert!(html.contains("<p>안녕하세요!</p><p>어떤 도움이 필요하신가요?</p>"));
        assert!(html.contains(r#"src="/static/assets/images/avatar.png""#));
    }

    #[test]
    fn test_plain_text_strips_markdown() {
        let message = Message::bot("# 제목\n\n- **하나**\n- 둘", true);
        assert_eq!(message.plain_text(), "제목\n하나\n둘");
    }

    #[test]
    fn test_loading_html_carries_id() {
        let id = LoadingId::from_millis(42);
        let html = loading_html(&id, "/a.png");
        assert!(html.starts_with(r#"<div id="loading-42""#));
        assert!(html.contains("typing-indicator"));
    }
}

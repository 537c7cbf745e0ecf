//! The surface the controller renders into.

use super::{FontSizeLevel, LoadingId, Message, TranscriptFile, loading_html};

/// Rendering seam between [`ChatWidget`](super::ChatWidget) and a concrete
/// front end.
///
/// Calls arrive in the order the user should observe them; implementations
/// only have to reflect each call.
pub trait ChatView {
    /// Append a bubble at the end of the message container and scroll to it.
    fn append(&mut self, message: &Message);

    /// Insert the loading placeholder.
    fn show_loading(&mut self, id: &LoadingId);

    /// Remove the loading placeholder if it is still present.
    fn remove_loading(&mut self, id: &LoadingId);

    /// Remove every bubble.
    fn clear_messages(&mut self);

    fn set_send_enabled(&mut self, enabled: bool);

    fn clear_input(&mut self);

    fn focus_input(&mut self);

    fn apply_font_size(&mut self, level: FontSizeLevel);

    fn show_help(&mut self, html: &str);

    fn hide_help(&mut self);

    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    fn alert(&mut self, text: &str);

    /// Hand a finished transcript to the user.
    fn offer_download(&mut self, file: &TranscriptFile);
}

#[derive(Debug, Clone)]
struct Node {
    id: Option<String>,
    html: String,
}

/// Collects bubble markup for an htmx fragment response.
///
/// Confirmation happens in the browser before the request is sent, so
/// [`confirm`](ChatView::confirm) always accepts.
#[derive(Debug, Clone)]
pub struct FragmentView {
    avatar_path: String,
    nodes: Vec<Node>,
    cleared: bool,
    send_enabled: bool,
    font_size: Option<FontSizeLevel>,
    help: Option<String>,
    alert: Option<String>,
    download: Option<TranscriptFile>,
}

impl FragmentView {
    #[must_use]
    pub fn new(avatar_path: impl Into<String>) -> Self {
        Self {
            avatar_path: avatar_path.into(),
            nodes: Vec::new(),
            cleared: false,
            send_enabled: true,
            font_size: None,
            help: None,
            alert: None,
            download: None,
        }
    }

    /// Concatenated markup of the bubbles still present.
    #[must_use]
    pub fn html(&self) -> String {
        self.nodes.iter().map(|n| n.html.as_str()).collect()
    }

    /// Whether the container was cleared before the collected bubbles.
    #[must_use]
    pub fn was_cleared(&self) -> bool {
        self.cleared
    }

    #[must_use]
    pub fn send_enabled(&self) -> bool {
        self.send_enabled
    }

    #[must_use]
    pub fn font_size(&self) -> Option<FontSizeLevel> {
        self.font_size
    }

    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    #[must_use]
    pub fn alert_text(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn take_download(&mut self) -> Option<TranscriptFile> {
        self.download.take()
    }
}

impl ChatView for FragmentView {
    fn append(&mut self, message: &Message) {
        self.nodes.push(Node {
            id: None,
            html: message.to_html(&self.avatar_path),
        });
    }

    fn show_loading(&mut self, id: &LoadingId) {
        self.nodes.push(Node {
            id: Some(id.as_str().to_string()),
            html: loading_html(id, &self.avatar_path),
        });
    }

    fn remove_loading(&mut self, id: &LoadingId) {
        self.nodes.retain(|n| n.id.as_deref() != Some(id.as_str()));
    }

    fn clear_messages(&mut self) {
        self.nodes.clear();
        self.cleared = true;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn clear_input(&mut self) {}

    fn focus_input(&mut self) {}

    fn apply_font_size(&mut self, level: FontSizeLevel) {
        self.font_size = Some(level);
    }

    fn show_help(&mut self, html: &str) {
        self.help = Some(html.to_string());
    }

    fn hide_help(&mut self) {
        self.help = None;
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }

    fn alert(&mut self, text: &str) {
        self.alert = Some(text.to_string());
    }

    fn offer_download(&mut self, file: &TranscriptFile) {
        self.download = Some(file.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_node_removed_by_id() {
        let mut view = FragmentView::new("/a.png");
        view.append(&Message::user("월세"));
        let id = LoadingId::from_millis(7);
        view.show_loading(&id);
        assert!(view.html().contains("loading-7"));

        view.remove_loading(&id);
        assert!(!view.html().contains("loading-7"));
        assert!(view.html().contains("월세"));
    }

    #[test]
    fn test_clear_marks_fragment() {
        let mut view = FragmentView::new("/a.png");
        view.append(&Message::user("하나"));
        view.clear_messages();
        view.append(&Message::greeting());

        assert!(view.was_cleared());
        assert!(!view.html().contains("하나"));
        assert!(view.html().contains("안녕하세요!"));
    }
}

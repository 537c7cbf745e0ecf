//! Endpoint and payload shapes understood by the widget.

use serde::{Deserialize, Serialize};

/// One of the three mutually exclusive backend contracts.
///
/// Each variant fixes the route, the request field, the response field and
/// how the bot bubble is rendered. A deployment picks exactly one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `POST /chat/` with JSON `{"message"}`, answers in `response`.
    #[default]
    MessageJson,
    /// `POST /chat/ask/` with multipart field `question`, answers in `answer`.
    QuestionForm,
    /// `POST /chat/ask` with JSON `{"question"}`, answers in `answer`.
    QuestionJson,
}

/// How the question travels in the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

impl Variant {
    /// Route path, relative to the backend origin.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::MessageJson => "/chat/",
            Self::QuestionForm => "/chat/ask/",
            Self::QuestionJson => "/chat/ask",
        }
    }

    /// Name of the request field carrying the user's text.
    #[must_use]
    pub fn request_field(self) -> &'static str {
        match self {
            Self::MessageJson => "message",
            Self::QuestionForm | Self::QuestionJson => "question",
        }
    }

    /// Name of the response field carrying the bot's text.
    #[must_use]
    pub fn response_field(self) -> &'static str {
        match self {
            Self::MessageJson => "response",
            Self::QuestionForm | Self::QuestionJson => "answer",
        }
    }

    #[must_use]
    pub fn encoding(self) -> Encoding {
        match self {
            Self::QuestionForm => Encoding::Multipart,
            Self::MessageJson | Self::QuestionJson => Encoding::Json,
        }
    }

    /// Whether bot bubbles are rendered as markdown.
    #[must_use]
    pub fn renders_markdown(self) -> bool {
        matches!(self, Self::MessageJson)
    }

    /// Whether the failure bubble carries the underlying error text.
    #[must_use]
    pub fn includes_error_detail(self) -> bool {
        matches!(self, Self::QuestionJson)
    }

    /// Whether the page offers new-chat, font size, save and help controls.
    #[must_use]
    pub fn has_toolbar(self) -> bool {
        matches!(self, Self::MessageJson)
    }

    /// Stable configuration name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MessageJson => "message-json",
            Self::QuestionForm => "question-form",
            Self::QuestionJson => "question-json",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

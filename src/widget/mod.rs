//! Headless chat widget.
//!
//! [`ChatWidget`] owns the conversation and the request lifecycle; every
//! visible effect goes through a [`ChatView`], so the same controller serves
//! the browser page ([`FragmentView`]) and the terminal client.
//!
//! # Example
//!
//! ```rust,no_run
//! use policy_chat::backend::{HttpBackend, Variant};
//! use policy_chat::widget::{ChatWidget, FragmentView, SendOutcome};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = HttpBackend::new("http://localhost:3000", Variant::MessageJson)?;
//! let mut widget = ChatWidget::new(backend, FragmentView::new("/static/avatar.png"));
//!
//! if widget.send_message("월세 지원").await == SendOutcome::Answered {
//!     println!("{}", widget.view().html());
//! }
//! # Ok(())
//! # }
//! ```

mod controller;
mod font;
pub mod help;
mod loading;
mod message;
pub mod transcript;
mod view;

pub use controller::{
    ChatWidget, FAILURE_MESSAGE, NEW_CHAT_PROMPT, Phase, SendOutcome, WidgetState, failure_text,
};
pub use font::FontSizeLevel;
pub use loading::LoadingId;
pub use message::{
    GREETING, Message, Sender, escape_html, indicator_html, loading_html, render_markdown,
};
pub use transcript::TranscriptFile;
pub use view::{ChatView, FragmentView};

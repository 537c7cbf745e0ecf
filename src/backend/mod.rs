//! Backend contract for the chat widget.
//!
//! The widget talks to its backend through [`ChatBackend`]. Two
//! implementations ship with the crate:
//!
//! - [`HttpBackend`]: reqwest client for a remote server speaking one
//!   [`Variant`]
//! - [`LocalBackend`]: answers in-process through the
//!   [`AnswerService`](crate::answer::AnswerService)

mod client;
mod error;
mod local;
mod variant;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::HttpBackend;
pub use error::BackendError;
pub use local::LocalBackend;
pub use variant::{Encoding, Variant};

/// Single-shot question/answer round trip.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Contract spoken by this backend.
    fn variant(&self) -> Variant;

    /// Send `text` and return the bot's reply.
    async fn ask(&self, text: &str) -> Result<String, BackendError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    fn variant(&self) -> Variant {
        (**self).variant()
    }

    async fn ask(&self, text: &str) -> Result<String, BackendError> {
        (**self).ask(text).await
    }
}

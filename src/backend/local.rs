//! In-process backend used when the widget and the answer service share a
//! server.

use std::sync::Arc;

use async_trait::async_trait;

use super::{BackendError, ChatBackend, Variant};
use crate::answer::AnswerService;
use crate::session::Guest;

/// Answers through an [`AnswerService`] on behalf of one guest.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    variant: Variant,
    answers: Arc<AnswerService>,
    guest: Guest,
}

impl LocalBackend {
    #[must_use]
    pub fn new(variant: Variant, answers: Arc<AnswerService>, guest: Guest) -> Self {
        Self {
            variant,
            answers,
            guest,
        }
    }
}

#[async_trait]
impl ChatBackend for LocalBackend {
    fn variant(&self) -> Variant {
        self.variant
    }

    async fn ask(&self, text: &str) -> Result<String, BackendError> {
        self.answers
            .ask(&self.guest, text)
            .await
            .map_err(|e| BackendError::Local(e.to_string()))
    }
}

//! Server side of the chat contract.
//!
//! [`AnswerService`] builds a prompt from the guest's recent history, asks a
//! [`Responder`] for the reply and records the exchange afterwards.

mod responder;

use std::fmt::Write as _;
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::session::{Exchange, Guest};

pub use responder::{PlaceholderRag, Responder};

/// Number of earlier exchanges folded into each prompt.
pub const DEFAULT_HISTORY_LIMIT: usize = 3;

/// Message returned for a blank question.
pub const EMPTY_QUESTION_MESSAGE: &str = "질문이 없습니다.";

#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("{EMPTY_QUESTION_MESSAGE}")]
    EmptyQuestion,

    #[error("responder failed: {0}")]
    Responder(#[source] anyhow::Error),
}

/// Assemble the `Q:`/`A:` transcript prompt ending with the open question.
#[must_use]
pub fn build_prompt(history: &[Exchange], question: &str) -> String {
    let mut prompt = String::new();
    for exchange in history {
        let _ = write!(
            prompt,
            "Q: {}\nA: {}\n\n",
            exchange.question, exchange.answer
        );
    }
    let _ = write!(prompt, "Q: {question}\nA:");
    prompt
}

/// Answers guest questions with history-aware prompts.
#[derive(Clone)]
pub struct AnswerService {
    responder: Arc<dyn Responder>,
    history_limit: usize,
}

impl std::fmt::Debug for AnswerService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnswerService")
            .field("history_limit", &self.history_limit)
            .finish_non_exhaustive()
    }
}

impl AnswerService {
    #[must_use]
    pub fn new(responder: Arc<dyn Responder>, history_limit: usize) -> Self {
        Self {
            responder,
            history_limit,
        }
    }

    /// Answer `question` for `guest`.
    ///
    /// History is read before the current question is stored, so the prompt
    /// never contains the question twice.
    pub async fn ask(&self, guest: &Guest, question: &str) -> Result<String, AnswerError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AnswerError::EmptyQuestion);
        }

        let history = guest.recent_exchanges(self.history_limit);
        let prompt = build_prompt(&history, question);

        let answer = self
            .responder
            .respond(&prompt)
            .await
            .map_err(AnswerError::Responder)?;

        guest.record_exchange(question, answer.clone());

        info!(
            name: "answer.recorded",
            guest = %guest.id(),
            history = history.len(),
            "Question answered"
        );

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::GuestStore;

    #[test]
    fn test_prompt_without_history() {
        assert_eq!(build_prompt(&[], "월세 지원"), "Q: 월세 지원\nA:");
    }

    #[test]
    fn test_prompt_includes_recent_history() {
        let store = GuestStore::new();
        let guest = store.create();
        guest.record_exchange("q1", "a1");

        let prompt = build_prompt(&guest.recent_exchanges(3), "q2");
        assert_eq!(prompt, "Q: q1\nA: a1\n\nQ: q2\nA:");
    }

    #[tokio::test]
    async fn test_ask_records_exchange_after_answering() {
        let service = AnswerService::new(Arc::new(PlaceholderRag), DEFAULT_HISTORY_LIMIT);
        let guest = GuestStore::new().create();

        let first = service.ask(&guest, "  월세 지원 ").await.unwrap();
        assert_eq!(first, "[RAG 응답] Q: 월세 지원\nA:에 대한 답변입니다.");
        assert_eq!(guest.exchange_count(), 1);

        let second = service.ask(&guest, "청년도약계좌").await.unwrap();
        assert!(second.contains("Q: 월세 지원\nA: [RAG 응답]"));
        assert!(second.contains("Q: 청년도약계좌\nA:"));
        assert_eq!(guest.exchange_count(), 2);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let service = AnswerService::new(Arc::new(PlaceholderRag), DEFAULT_HISTORY_LIMIT);
        let guest = GuestStore::new().create();

        let err = service.ask(&guest, "   ").await.unwrap_err();
        assert!(matches!(err, AnswerError::EmptyQuestion));
        assert_eq!(err.to_string(), EMPTY_QUESTION_MESSAGE);
        assert_eq!(guest.exchange_count(), 0);
    }
}

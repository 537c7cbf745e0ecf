//! Answer generation behind the chat routes.

use async_trait::async_trait;

/// Turns an assembled prompt into the bot's reply.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Stand-in for the retrieval pipeline: echoes the prompt inside a fixed
/// Korean sentence so the whole round trip can be exercised end to end.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRag;

#[async_trait]
impl Responder for PlaceholderRag {
    async fn respond(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(format!("[RAG 응답] {prompt}에 대한 답변입니다."))
    }
}

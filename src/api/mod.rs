//! Chat API routes.
//!
//! All three widget variants are served side by side so any of them can be
//! pointed at this server.

mod chat;

use axum::{Router, routing::post};

use crate::AppState;

pub use chat::{AnswerResponse, ErrorResponse, MessageResponse};

/// Routes for `/chat/`, `/chat/ask/` and `/chat/ask`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chat/", post(chat::chat_message))
        .route("/chat/ask/", post(chat::ask_form))
        .route("/chat/ask", post(chat::ask_json))
}

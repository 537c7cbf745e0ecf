//! Question/answer handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::AppState;
use crate::answer::AnswerError;

/// Body of `POST /chat/`.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub message: String,
}

/// Body of `POST /chat/ask`.
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    #[serde(default)]
    pub question: String,
}

/// Reply of `POST /chat/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub response: String,
}

/// Reply of `POST /chat/ask` and `POST /chat/ask/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn answer_error(err: AnswerError) -> ApiError {
    match err {
        AnswerError::EmptyQuestion => api_error(StatusCode::BAD_REQUEST, err.to_string()),
        AnswerError::Responder(source) => {
            error!(name: "answer.failed", error = %source, "Responder failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "답변 생성에 실패했습니다.")
        }
    }
}

async fn answer(
    state: &AppState,
    jar: CookieJar,
    question: &str,
) -> Result<(CookieJar, String), ApiError> {
    // Reject before a guest is created for a request that gets no cookie back
    if question.trim().is_empty() {
        return Err(answer_error(AnswerError::EmptyQuestion));
    }
    let (guest, jar) = state.guest_session(jar);
    info!(
        name: "chat.question.received",
        guest = %guest.id(),
        chars = question.chars().count(),
        "Received chat question"
    );
    let answer = state
        .answers
        .ask(&guest, question)
        .await
        .map_err(answer_error)?;
    Ok((jar, answer))
}

/// POST /chat/ - JSON `{"message"}` answered in `response`.
pub async fn chat_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<MessageRequest>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let (jar, response) = answer(&state, jar, &req.message).await?;
    Ok((jar, Json(MessageResponse { response })))
}

/// POST /chat/ask/ - multipart field `question`.
pub async fn ask_form(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Json<AnswerResponse>), ApiError> {
    let mut question = String::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        if field.name() == Some("question") {
            question = field
                .text()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.body_text()))?;
        }
    }

    let (jar, answer) = answer(&state, jar, &question).await?;
    Ok((jar, Json(AnswerResponse { question, answer })))
}

/// POST /chat/ask - JSON `{"question"}`.
pub async fn ask_json(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<QuestionRequest>,
) -> Result<(CookieJar, Json<AnswerResponse>), ApiError> {
    let (jar, answer) = answer(&state, jar, &req.question).await?;
    Ok((
        jar,
        Json(AnswerResponse {
            question: req.question,
            answer,
        }),
    ))
}

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::MultipartForm;
use policy_chat::AppState;
use policy_chat::answer::Responder;
use policy_chat::api::{AnswerResponse, ErrorResponse, MessageResponse};
use policy_chat::config::AppConfig;
use policy_chat::server::build_router;
use serde_json::json;

/// Answers with the prompt it was given, so tests can see the history.
struct EchoResponder;

#[async_trait]
impl Responder for EchoResponder {
    async fn respond(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(prompt.to_string())
    }
}

struct FailingResponder;

#[async_trait]
impl Responder for FailingResponder {
    async fn respond(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("index offline")
    }
}

fn config() -> AppConfig {
    AppConfig::load_from_args(["policy-chat"]).expect("default config")
}

fn server_with(responder: Arc<dyn Responder>) -> TestServer {
    let state = AppState::with_responder(config(), responder).expect("state");
    let mut server = TestServer::new(build_router(state)).expect("test server");
    server.save_cookies();
    server
}

fn server() -> TestServer {
    let state = AppState::new(config()).expect("state");
    let mut server = TestServer::new(build_router(state)).expect("test server");
    server.save_cookies();
    server
}

#[tokio::test]
async fn test_message_json_route() {
    let server = server();

    let response = server
        .post("/chat/")
        .json(&json!({ "message": "월세 지원" }))
        .await;

    response.assert_status_ok();
    let body: MessageResponse = response.json();
    assert_eq!(body.response, "[RAG 응답] Q: 월세 지원\nA:에 대한 답변입니다.");
}

#[tokio::test]
async fn test_question_form_route() {
    let server = server();

    let form = MultipartForm::new().add_text("question", "청년 도약 계좌");
    let response = server.post("/chat/ask/").multipart(form).await;

    response.assert_status_ok();
    let body: AnswerResponse = response.json();
    assert_eq!(body.question, "청년 도약 계좌");
    assert!(body.answer.contains("Q: 청년 도약 계좌\nA:"));
}

#[tokio::test]
async fn test_question_json_route() {
    let server = server();

    let response = server
        .post("/chat/ask")
        .json(&json!({ "question": "취업 지원" }))
        .await;

    response.assert_status_ok();
    let body: AnswerResponse = response.json();
    assert_eq!(body.question, "취업 지원");
    assert!(body.answer.starts_with("[RAG 응답]"));
}

#[tokio::test]
async fn test_blank_question_is_rejected() {
    let server = server();

    for (path, body) in [
        ("/chat/", json!({ "message": "   " })),
        ("/chat/ask", json!({ "question": "" })),
        ("/chat/", json!({})),
    ] {
        let response = server.post(path).json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "질문이 없습니다.");
    }

    let response = server
        .post("/chat/ask/")
        .multipart(MultipartForm::new())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_question_creates_no_guest() {
    let state = AppState::new(config()).expect("state");
    let mut server = TestServer::new(build_router(state.clone())).expect("test server");
    server.save_cookies();

    let response = server
        .post("/chat/ask")
        .json(&json!({ "question": "  " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.maybe_cookie("guest_uuid").is_none());
    assert!(state.guests.is_empty());
}

#[tokio::test]
async fn test_history_follows_guest_cookie() {
    let server = server_with(Arc::new(EchoResponder));

    let first = server
        .post("/chat/")
        .json(&json!({ "message": "월세 지원" }))
        .await;
    first.assert_status_ok();
    assert!(first.maybe_cookie("guest_uuid").is_some());

    let second: MessageResponse = server
        .post("/chat/")
        .json(&json!({ "message": "신청 방법은?" }))
        .await
        .json();

    assert_eq!(
        second.response,
        "Q: 월세 지원\nA: Q: 월세 지원\nA:\n\nQ: 신청 방법은?\nA:"
    );
}

#[tokio::test]
async fn test_history_is_limited() {
    let server = server_with(Arc::new(EchoResponder));

    for question in ["하나", "둘", "셋", "넷"] {
        server
            .post("/chat/ask")
            .json(&json!({ "question": question }))
            .await
            .assert_status_ok();
    }

    let last: AnswerResponse = server
        .post("/chat/ask")
        .json(&json!({ "question": "다섯" }))
        .await
        .json();

    assert!(!last.answer.starts_with("Q: 하나"));
    assert!(last.answer.starts_with("Q: 둘\n"));
    assert!(last.answer.ends_with("Q: 다섯\nA:"));
}

#[tokio::test]
async fn test_responder_failure_is_500() {
    let server = server_with(Arc::new(FailingResponder));

    let response = server
        .post("/chat/")
        .json(&json!({ "message": "월세" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "답변 생성에 실패했습니다.");
}

#[tokio::test]
async fn test_page_renders_greeting() {
    let server = server();

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("청년이음"));
    assert!(html.contains("<p>안녕하세요!</p><p>어떤 도움이 필요하신가요?</p>"));
    assert!(html.contains(r#"hx-post="/widget/send""#));
}

#[tokio::test]
async fn test_widget_send_returns_bubbles() {
    let server = server();

    let response = server
        .post("/widget/send")
        .form(&[("message", "월세 지원")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("user-message"));
    assert!(html.contains("<p>월세 지원</p>"));
    assert!(html.contains("bot-message"));
    assert!(html.contains("[RAG 응답]"));
    assert!(!html.contains("loading-message"));
}

#[tokio::test]
async fn test_reload_starts_widget_over() {
    let server = server_with(Arc::new(EchoResponder));
    server
        .post("/widget/send")
        .form(&[("message", "월세 지원")])
        .await
        .assert_status_ok();
    server.post("/widget/font-size").await.assert_status_ok();

    let page = server.get("/").await.text();
    assert!(!page.contains("<p>월세 지원</p>"));
    assert!(page.contains("<p>안녕하세요!</p>"));
    assert!(page.contains(r#"data-level="level1""#));
    assert!(page.contains("--font-size-base: 16px;"));

    // The transcript after a reload holds only the greeting
    let text = server.get("/widget/transcript").await.text();
    assert!(!text.contains("월세 지원"));

    // Question history on the answering side is kept
    let html = server
        .post("/widget/send")
        .form(&[("message", "신청 방법")])
        .await
        .text();
    assert!(html.contains("Q: 월세 지원"));
}

#[tokio::test]
async fn test_widget_send_blank_is_no_content() {
    let server = server();

    let response = server.post("/widget/send").form(&[("message", "  ")]).await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_widget_failure_bubble() {
    let server = server_with(Arc::new(FailingResponder));

    let html = server
        .post("/widget/send")
        .form(&[("message", "월세")])
        .await
        .text();

    assert!(html.contains("죄송합니다. 오류가 발생했습니다. 다시 시도해주세요."));
}

#[tokio::test]
async fn test_widget_new_chat_resets() {
    let server = server();
    server
        .post("/widget/send")
        .form(&[("message", "월세 지원")])
        .await
        .assert_status_ok();

    let html = server.post("/widget/new").await.text();
    assert!(html.contains("안녕하세요!"));
    assert!(!html.contains("월세 지원"));

    let page = server.get("/").await.text();
    assert!(!page.contains("<p>월세 지원</p>"));
}

#[tokio::test]
async fn test_widget_font_size_cycles() {
    let server = server();

    let html = server.post("/widget/font-size").await.text();
    assert!(html.contains(r#"data-level="level2""#));
    assert!(html.contains(r#"hx-swap-oob="true""#));
    assert!(html.contains("--font-size-base: 18px;"));

    server.post("/widget/font-size").await.assert_status_ok();
    let html = server.post("/widget/font-size").await.text();
    assert!(html.contains(r#"data-level="level1""#));
}

#[tokio::test]
async fn test_widget_transcript_download() {
    let server = server();
    server
        .post("/widget/send")
        .form(&[("message", "월세 지원")])
        .await
        .assert_status_ok();

    let response = server.get("/widget/transcript").await;

    response.assert_status_ok();
    let disposition = response.header("content-disposition");
    let disposition = disposition.to_str().unwrap();
    assert!(disposition.starts_with("attachment;"));
    assert!(disposition.contains("filename*=UTF-8''"));
    let text = response.text();
    assert!(text.starts_with("=== 청년이음 대화 기록 ==="));
    assert!(text.contains("👤 나:\n월세 지원\n\n"));
}

#[tokio::test]
async fn test_widget_help() {
    let server = server();

    let response = server.get("/widget/help").await;

    response.assert_status_ok();
    assert!(!response.text().is_empty());
}

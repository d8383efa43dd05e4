//! LLM client and assistant-answer tests against a mock completions API.

use rusqlite::Connection;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cafemetrics::core::llm::{ChatMessage, LLMClient};
use cafemetrics::{db, AnalyticsEngine, Database, Settings};

fn client_for(api_base: &str) -> LLMClient {
    let mut settings = Settings::default();
    settings.llm.api_base = api_base.to_string();
    LLMClient::new("test-key".to_string(), settings.llm)
}

fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [
            {"message": {"role": "assistant", "content": content}}
        ]
    })
}

#[tokio::test]
async fn chat_returns_the_first_choice_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Sales look fine.")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let answer = client
        .chat(vec![ChatMessage::user("how are sales?")])
        .await
        .unwrap();

    assert_eq!(answer, "Sales look fine.");
}

#[tokio::test]
async fn chat_surfaces_api_errors_without_retrying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let error = client
        .chat(vec![ChatMessage::user("hello")])
        .await
        .unwrap_err();

    let text = error.to_string();
    assert!(text.contains("API error"));
    assert!(text.contains("quota exceeded"));
}

fn engine_for(path: &std::path::Path, api_base: &str) -> AnalyticsEngine {
    let mut settings = Settings::default();
    settings.llm.api_base = api_base.to_string();

    let database = Database::new(path);
    let llm = LLMClient::new("test-key".to_string(), settings.llm.clone());
    AnalyticsEngine::new(settings, database, llm)
}

fn empty_db(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("cafeteria.db");
    let conn = Connection::open(&path).unwrap();
    db::init_schema(&conn).unwrap();
    path
}

#[tokio::test]
async fn analyze_uses_the_model_answer_when_the_call_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion_body("  A quiet week so far.  ")),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let engine = engine_for(&empty_db(&dir), &server.uri());

    let response = engine.analyze("how are sales?", None).await;
    assert_eq!(response.assistant_message, "A quiet week so far.");
}

#[tokio::test]
async fn analyze_falls_back_with_metrics_when_the_call_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let engine = engine_for(&empty_db(&dir), &server.uri());

    let response = engine.analyze("how are sales?", None).await;

    assert!(response
        .assistant_message
        .contains("There was a problem using the AI model"));
    assert!(response
        .assistant_message
        .contains("Total sales for all non-cancelled orders (all time): 0.00 USD"));
    assert!(response.assistant_message.contains("Error from AI service:"));
    assert!(response.assistant_message.contains("upstream down"));
}

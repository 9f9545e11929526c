//! The chat controller wired to the real HTTP client against a mock backend.

use std::sync::Arc;

use fastagent_tui::state::{CONNECTION_ERROR, SEND_ERROR};
use fastagent_tui::{AgentClient, App, ChatMessage, Phase};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend_with_lists() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agents": ["default", "coder"]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": ["gpt-4"] })))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn mount_then_exchange_one_message() {
    let server = backend_with_lists().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .and(body_json(json!({ "message": "hello", "agent": "default" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "hi there" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = App::new(Arc::new(AgentClient::new(&server.uri())), "default");
    app.mount();
    app.settle().await;

    assert_eq!(app.agents, vec!["default", "coder"]);
    assert_eq!(app.model_options(), vec!["Default", "gpt-4"]);
    assert_eq!(app.selected_agent, "default");
    assert_eq!(app.selected_model, None);

    app.draft = "hello".to_string();
    assert!(app.submit());
    assert_eq!(app.phase(), Phase::Submitting);
    app.settle().await;

    assert_eq!(
        app.transcript,
        vec![ChatMessage::user("hello"), ChatMessage::assistant("hi there")]
    );
    assert!(!app.loading);
    assert!(app.draft.is_empty());
}

#[tokio::test]
async fn backend_error_on_send_becomes_system_entry() {
    let server = backend_with_lists().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut app = App::new(Arc::new(AgentClient::new(&server.uri())), "default");
    app.mount();
    app.settle().await;

    app.draft = "hello".to_string();
    app.submit();
    app.settle().await;

    assert_eq!(
        app.transcript,
        vec![ChatMessage::user("hello"), ChatMessage::system(SEND_ERROR)]
    );
    assert!(!app.loading);
}

#[tokio::test]
async fn missing_models_endpoint_reports_connection_problem_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "agents": ["default"] })))
        .mount(&server)
        .await;
    // /models falls through to wiremock's 404

    let mut app = App::new(Arc::new(AgentClient::new(&server.uri())), "default");
    app.mount();
    app.settle().await;

    assert_eq!(app.agents, vec!["default"]);
    assert!(app.models.is_empty());
    assert_eq!(app.transcript, vec![ChatMessage::system(CONNECTION_ERROR)]);
}

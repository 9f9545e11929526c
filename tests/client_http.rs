use fastagent_tui::{AgentClient, AgentRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn lists_agents_from_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agents": ["default", "coder"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentClient::new(&server.uri());
    let agents = client.list_agents().await.expect("agents");
    assert_eq!(agents, vec!["default", "coder"]);
}

#[tokio::test]
async fn lists_models_from_backend() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": ["gpt-4", "sonnet"]
        })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&format!("{}/", server.uri()));
    let models = client.list_models().await.expect("models");
    assert_eq!(models, vec!["gpt-4", "sonnet"]);
}

#[tokio::test]
async fn send_posts_json_and_returns_response_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "message": "hello", "agent": "default" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "hi there"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentClient::new(&server.uri());
    let request = AgentRequest {
        message: "hello".to_string(),
        agent: Some("default".to_string()),
        model: None,
    };

    assert_eq!(client.send_message(&request).await.expect("response"), "hi there");
}

#[tokio::test]
async fn send_includes_model_when_set() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .and(body_json(json!({ "message": "hi", "agent": "coder", "model": "gpt-4" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "response": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AgentClient::new(&server.uri());
    let request = AgentRequest {
        message: "hi".to_string(),
        agent: Some("coder".to_string()),
        model: Some("gpt-4".to_string()),
    };

    assert_eq!(client.send_message(&request).await.expect("response"), "ok");
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = AgentClient::new(&server.uri());
    let request = AgentRequest {
        message: "hello".to_string(),
        agent: None,
        model: None,
    };

    let err = client.send_message(&request).await.unwrap_err();
    assert_eq!(err.operation(), "send message");
}

#[tokio::test]
async fn malformed_body_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": [] })))
        .mount(&server)
        .await;

    let client = AgentClient::new(&server.uri());
    let err = client.list_agents().await.unwrap_err();
    assert_eq!(err.operation(), "list agents");
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind then drop to get a port nobody is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind temp port");
        listener.local_addr().expect("local addr").port()
    };

    let client = AgentClient::new(&format!("http://127.0.0.1:{port}"));
    let err = client.list_models().await.unwrap_err();
    assert_eq!(err.operation(), "list models");
}

use std::sync::{Arc, Mutex};

use ai_shop_backend::services::completion::{
    CompletionError, CompletionMessage, CompletionService, HttpCompletionClient,
};
use axum::{Json, Router, extract::State, http::HeaderMap, http::StatusCode, routing::post};
use serde_json::{Value, json};

#[derive(Clone, Debug, Default)]
struct Seen {
    authorization: Option<String>,
    customer_id: Option<String>,
    body: Value,
}

type Captured = Arc<Mutex<Vec<Seen>>>;

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/chat/completions")
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn completion_ok(
    State(captured): State<Captured>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    captured.lock().unwrap().push(Seen {
        authorization: header(&headers, "authorization"),
        customer_id: header(&headers, "customerid"),
        body,
    });
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "Hello shopper" } }]
    }))
}

fn messages() -> Vec<CompletionMessage> {
    vec![
        CompletionMessage::system("be brief"),
        CompletionMessage::user("hi"),
    ]
}

#[tokio::test]
async fn test_success_sends_model_messages_and_headers() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/chat/completions", post(completion_ok))
        .with_state(captured.clone());
    let url = spawn_server(router).await;

    let client = HttpCompletionClient::new(url, "test-model")
        .with_api_key(Some("sk-123".to_string()))
        .with_customer_id(Some("cus_42".to_string()));

    let reply = client.complete(&messages()).await.unwrap();
    assert_eq!(reply, "Hello shopper");

    let seen = captured.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer sk-123"));
    assert_eq!(seen[0].customer_id.as_deref(), Some("cus_42"));
    assert_eq!(seen[0].body["model"], "test-model");
    assert_eq!(seen[0].body["messages"][0]["role"], "system");
    assert_eq!(seen[0].body["messages"][1]["content"], "hi");
}

#[tokio::test]
async fn test_optional_headers_are_omitted() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/chat/completions", post(completion_ok))
        .with_state(captured.clone());
    let url = spawn_server(router).await;

    HttpCompletionClient::new(url, "m").complete(&messages()).await.unwrap();

    let seen = captured.lock().unwrap().clone();
    assert!(seen[0].authorization.is_none());
    assert!(seen[0].customer_id.is_none());
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let url = spawn_server(router).await;

    let err = HttpCompletionClient::new(url, "m")
        .complete(&messages())
        .await
        .unwrap_err();
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let router = Router::new().route("/chat/completions", post(|| async { "<html>oops</html>" }));
    let url = spawn_server(router).await;

    let err = HttpCompletionClient::new(url, "m")
        .complete(&messages())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Malformed(_)));
}

#[tokio::test]
async fn test_missing_choice_is_an_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let url = spawn_server(router).await;

    let err = HttpCompletionClient::new(url, "m")
        .complete(&messages())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::MissingContent));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = HttpCompletionClient::new(format!("http://{addr}/chat/completions"), "m")
        .complete(&messages())
        .await
        .unwrap_err();
    assert!(matches!(err, CompletionError::Transport(_)));
}

//! End-to-end tests for the A2A server
//!
//! Drives the axum router directly with scripted completion backends; no
//! network and no real model calls.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use a2a_qa_agent::agent::QaAgent;
use a2a_qa_agent::llm::{Completion, CompletionError};
use a2a_qa_agent::server::{agent_card, build_router, AppState};

/// Completion backend that echoes the prompt after a short pause
struct EchoCompletion;

#[async_trait]
impl Completion for EchoCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        Ok(format!("echo: {}", prompt))
    }
}

/// Completion backend that always fails with a transport-style error
struct FailingCompletion;

#[async_trait]
impl Completion for FailingCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Api {
            status: 502,
            body: "connection reset by upstream".to_string(),
        })
    }
}

fn test_router(llm: impl Completion) -> axum::Router {
    let state = AppState::new(
        QaAgent::new(llm),
        agent_card("http://127.0.0.1:9009/"),
    );
    build_router(state)
}

fn rpc_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn send_body(text: &str, id: u64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "message/send",
        "params": {
            "message": {
                "role": "user",
                "parts": [{"text": text}]
            }
        },
        "id": id
    })
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn test_agent_card_endpoint() {
    let app = test_router(EchoCompletion);

    let request = Request::builder()
        .uri("/.well-known/agent-card.json")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let card = response_json(response).await;
    assert_eq!(card["name"], "General QA Agent");
    assert_eq!(card["capabilities"]["streaming"], true);
    assert_eq!(card["skills"].as_array().expect("skills").len(), 1);
    assert_eq!(card["skills"][0]["id"], "general-qa");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router(EchoCompletion);

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_message_send_returns_response_artifact() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(send_body("What is Rust?", 1)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert!(body["error"].is_null());

    let task = &body["result"];
    assert_eq!(task["status"]["state"], "completed");

    let artifacts = task["artifacts"].as_array().expect("artifacts");
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0]["name"], "Response");
    assert_eq!(artifacts[0]["parts"][0]["text"], "echo: What is Rust?");

    // The inbound message is recorded in history
    assert_eq!(task["history"][0]["role"], "user");
}

#[tokio::test]
async fn test_message_send_failure_returns_error_artifact() {
    let app = test_router(FailingCompletion);

    let response = app
        .oneshot(rpc_request(send_body("hello", 2)))
        .await
        .expect("response");

    let body = response_json(response).await;
    assert!(body["error"].is_null());

    // The turn still completes; the failure is an ordinary-looking artifact
    let task = &body["result"];
    assert_eq!(task["status"]["state"], "completed");

    let artifacts = task["artifacts"].as_array().expect("artifacts");
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0]["name"], "Error");

    let text = artifacts[0]["parts"][0]["text"].as_str().expect("text");
    assert!(text.contains("Error calling completion API"));
    assert!(text.contains("connection reset by upstream"));
}

#[tokio::test]
async fn test_concurrent_turns_are_isolated() {
    let app = test_router(EchoCompletion);

    let (left, right) = tokio::join!(
        app.clone().oneshot(rpc_request(send_body("first question", 10))),
        app.clone().oneshot(rpc_request(send_body("second question", 11))),
    );

    let left = response_json(left.expect("response")).await;
    let right = response_json(right.expect("response")).await;

    assert_eq!(
        left["result"]["artifacts"][0]["parts"][0]["text"],
        "echo: first question"
    );
    assert_eq!(
        right["result"]["artifacts"][0]["parts"][0]["text"],
        "echo: second question"
    );
    assert_ne!(left["result"]["id"], right["result"]["id"]);
}

#[tokio::test]
async fn test_tasks_get_roundtrip() {
    let app = test_router(EchoCompletion);

    let send_response = app
        .clone()
        .oneshot(rpc_request(send_body("remember me", 3)))
        .await
        .expect("response");
    let send_json = response_json(send_response).await;
    let task_id = send_json["result"]["id"].as_str().expect("task id");

    let get_response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "tasks/get",
            "params": {"taskId": task_id},
            "id": 4
        })))
        .await
        .expect("response");

    let body = response_json(get_response).await;
    assert_eq!(body["result"]["id"], task_id);
    assert_eq!(body["result"]["status"]["state"], "completed");
}

#[tokio::test]
async fn test_tasks_get_unknown_task() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "tasks/get",
            "params": {"taskId": "nonexistent"},
            "id": 5
        })))
        .await
        .expect("response");

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], -32001);
}

#[tokio::test]
async fn test_tasks_cancel_completed_task_rejected() {
    let app = test_router(EchoCompletion);

    let send_response = app
        .clone()
        .oneshot(rpc_request(send_body("done already", 6)))
        .await
        .expect("response");
    let send_json = response_json(send_response).await;
    let task_id = send_json["result"]["id"].as_str().expect("task id");

    let cancel_response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "tasks/cancel",
            "params": {"taskId": task_id},
            "id": 7
        })))
        .await
        .expect("response");

    let body = response_json(cancel_response).await;
    assert_eq!(body["error"]["code"], -32004);
}

#[tokio::test]
async fn test_unknown_method() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "unknown/method",
            "params": {},
            "id": 8
        })))
        .await
        .expect("response");

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], -32601);
}

#[tokio::test]
async fn test_invalid_jsonrpc_version() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "1.0",
            "method": "message/send",
            "params": {},
            "id": 9
        })))
        .await
        .expect("response");

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], -32600);
}

#[tokio::test]
async fn test_invalid_params() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "message/send",
            "params": {"not_a_message": true},
            "id": 12
        })))
        .await
        .expect("response");

    let body = response_json(response).await;
    assert_eq!(body["error"]["code"], -32602);
}

#[tokio::test]
async fn test_message_stream_event_order() {
    let app = test_router(EchoCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "message/stream",
            "params": {
                "message": {
                    "role": "user",
                    "parts": [{"text": "stream me"}]
                }
            },
            "id": 13
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8 body");

    // One event per SSE data frame, each wrapped in a JSON-RPC envelope
    let events: Vec<Value> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|data| serde_json::from_str::<Value>(data).expect("frame json"))
        .map(|frame| frame["result"].clone())
        .collect();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["kind"], "status-update");
    assert_eq!(events[0]["status"]["state"], "working");
    assert_eq!(events[0]["final"], false);

    assert_eq!(events[1]["kind"], "artifact-update");
    assert_eq!(events[1]["artifact"]["name"], "Response");
    assert_eq!(events[1]["artifact"]["parts"][0]["text"], "echo: stream me");

    assert_eq!(events[2]["kind"], "status-update");
    assert_eq!(events[2]["status"]["state"], "completed");
    assert_eq!(events[2]["final"], true);
}

#[tokio::test]
async fn test_exactly_one_working_update_per_turn() {
    let app = test_router(FailingCompletion);

    let response = app
        .oneshot(rpc_request(json!({
            "jsonrpc": "2.0",
            "method": "message/stream",
            "params": {
                "message": {
                    "role": "user",
                    "parts": [{"text": "will fail"}]
                }
            },
            "id": 14
        })))
        .await
        .expect("response");

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8 body");

    let events: Vec<Value> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data: "))
        .map(|data| serde_json::from_str::<Value>(data).expect("frame json"))
        .map(|frame| frame["result"].clone())
        .collect();

    let working_count = events
        .iter()
        .filter(|event| event["status"]["state"] == "working")
        .count();
    let artifact_count = events
        .iter()
        .filter(|event| event["kind"] == "artifact-update")
        .count();

    assert_eq!(working_count, 1);
    assert_eq!(artifact_count, 1);
    assert_eq!(events.last().expect("final event")["final"], true);

    // The working update comes before the artifact
    let working_index = events
        .iter()
        .position(|event| event["status"]["state"] == "working")
        .expect("working event");
    let artifact_index = events
        .iter()
        .position(|event| event["kind"] == "artifact-update")
        .expect("artifact event");
    assert!(working_index < artifact_index);
}

//! Integration tests for n8n-client HTTP operations.
//!
//! These tests use wiremock to simulate server responses and verify
//! that the client correctly handles various API scenarios.

use n8n_client::{
    ClientConfig, ClientError, ClientMode, HttpErrorKind, ParsedBody, TransportError,
    WorkflowClient,
};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> WorkflowClient {
    let config = ClientConfig::new(format!("{}/", server.uri()), "test-key").unwrap();
    WorkflowClient::new(config).unwrap()
}

#[tokio::test]
async fn test_run_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/wf1/run"))
        .and(header("X-N8N-API-KEY", "test-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({ "payload": { "a": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.run("wf1", &json!({ "a": 1 })).await.unwrap();

    assert_eq!(result.data, ParsedBody::Json(json!({ "ok": true })));
    assert_eq!(result.raw.status, 200);
    assert_eq!(result.raw.body, ParsedBody::Json(json!({ "ok": true })));
}

#[tokio::test]
async fn test_run_encodes_workflow_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/my%20flow%2F2/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.run("my flow/2", &json!({})).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_run_auth_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/wf1/run"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "bad key" })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run("wf1", &json!({})).await {
        Err(ClientError::Http(err)) => {
            assert_eq!(err.kind, HttpErrorKind::Auth);
            assert_eq!(err.message, "bad key");
            assert_eq!(err.status, 401);
            assert_eq!(err.detail, ParsedBody::Json(json!({ "message": "bad key" })));
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_forbidden_is_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.run("wf1", &json!({})).await.unwrap_err();
    assert_eq!(err.http_kind(), Some(HttpErrorKind::Auth));
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_run_not_found_text_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/missing/run"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run("missing", &json!({})).await {
        Err(ClientError::Http(err)) => {
            assert_eq!(err.kind, HttpErrorKind::NotFound);
            assert_eq!(err.message, "not found");
            assert_eq!(err.detail, ParsedBody::Text("not found".to_string()));
        }
        other => panic!("Expected NotFound error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_server_error_unparseable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_bytes(vec![0xff, 0xfe, 0x00, 0x9f]))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run("wf1", &json!({})).await {
        Err(ClientError::Http(err)) => {
            assert_eq!(err.kind, HttpErrorKind::Http);
            assert_eq!(err.message, "n8n error 500");
            assert_eq!(err.status, 500);
            assert!(err.detail.is_empty());
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({ "retryAfter": 5 })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.run("wf1", &json!({})).await.unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(err.status(), Some(429));
    assert_eq!(err.to_string(), "n8n error 429");
}

#[tokio::test]
async fn test_run_truncates_long_text_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("x".repeat(2000)))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run("wf1", &json!({})).await {
        Err(ClientError::Http(err)) => {
            assert_eq!(err.message.len(), 500);
            assert_eq!(err.detail.as_text().map(str::len), Some(2000));
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_twice_sends_identical_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/wf1/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let payload = json!({ "items": [1, 2, 3], "nested": { "k": "v" } });
    let first = client.run("wf1", &payload).await.unwrap();
    let second = client.run("wf1", &payload).await.unwrap();
    assert_eq!(first, second);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);
    assert_eq!(requests[0].body, requests[1].body);
    assert_eq!(
        requests[0].headers.get("x-n8n-api-key"),
        requests[1].headers.get("x-n8n-api-key")
    );

    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({ "payload": payload }));
}

#[tokio::test]
async fn test_trigger_webhook_success() {
    let mock_server = MockServer::start().await;
    let payload = json!({ "email": "a@b.c", "tags": ["x"] });

    Mock::given(method("POST"))
        .and(path("/webhook/signup"))
        .and(header("X-N8N-API-KEY", "test-key"))
        .and(body_json(payload.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Workflow was started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result = client.trigger("signup", &payload).await.unwrap();
    assert_eq!(result.status(), 200);
    assert_eq!(
        result.data,
        ParsedBody::Json(json!({ "message": "Workflow was started" }))
    );
}

#[tokio::test]
async fn test_trigger_webhook_error_is_generic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/signup"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "webhook not registered"
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.trigger("signup", &json!({})).await {
        Err(ClientError::Webhook { status, detail }) => {
            assert_eq!(status, 404);
            assert_eq!(
                detail,
                ParsedBody::Json(json!({ "message": "webhook not registered" }))
            );
        }
        other => panic!("Expected Webhook error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_dispatch_uses_configured_mode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/webhook/wf1"))
        .and(body_json(json!({ "a": 1 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(mock_server.uri(), "test-key")
        .unwrap()
        .with_mode(ClientMode::Webhook);
    let client = WorkflowClient::new(config).unwrap();

    let result = client.dispatch("wf1", &json!({ "a": 1 })).await.unwrap();
    assert!(result.data.is_empty());
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = ClientConfig::new(mock_server.uri(), "test-key")
        .unwrap()
        .with_timeout_ms(50)
        .unwrap();
    let client = WorkflowClient::new(config).unwrap();

    match client.run("wf1", &json!({})).await {
        Err(ClientError::Transport(TransportError::Timeout(after))) => {
            assert_eq!(after, Duration::from_millis(50));
        }
        other => panic!("Expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1.
    let config = ClientConfig::new("http://127.0.0.1:1", "test-key").unwrap();
    let client = WorkflowClient::new(config).unwrap();

    let err = client.run("wf1", &json!({})).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_run_json_string_error_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/workflows/wf1/run"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!("workflow is inactive")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    match client.run("wf1", &json!({})).await {
        Err(ClientError::Http(err)) => {
            assert_eq!(err.kind, HttpErrorKind::Http);
            assert_eq!(err.status, 400);
            assert_eq!(err.message, "workflow is inactive");
            assert_eq!(err.detail, ParsedBody::Json(json!("workflow is inactive")));
        }
        other => panic!("Expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_run_numeric_message_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": 42 })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client.run("wf1", &json!({})).await.unwrap_err();
    assert_eq!(err.to_string(), "42");
}

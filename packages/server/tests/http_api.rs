//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, session summary, stroke history).

mod fixtures;

use fixtures::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

/// GET `path` and return the status with the JSON body (`Null` when not JSON).
async fn get(server: &TestServer, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("{}{path}", server.base_url()))
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health が {"status":"ok"} を返す
    // given (前提条件):
    let server = TestServer::start(19080);

    // when (操作):
    let (status, body) = get(&server, "/api/health").await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_session_summary_of_fresh_server() {
    // テスト項目: 起動直後の /api/session は参加者・履歴・redo がすべて空
    // given (前提条件):
    let server = TestServer::start(19081);

    // when (操作):
    let (status, body) = get(&server, "/api/session").await;

    // then (期待する結果):
    assert_eq!(status, StatusCode::OK);
    assert!(body["created_at"].as_str().unwrap().ends_with("+09:00"));
    assert_eq!(body["participants"], json!([]));
    assert_eq!(body["stroke_count"], 0);
    assert_eq!(body["redo_depth"], 0);
}

#[tokio::test]
async fn test_strokes_endpoint_starts_empty() {
    // テスト項目: /api/session/strokes は空の履歴を返す
    let server = TestServer::start(19082);

    let (status, body) = get(&server, "/api/session/strokes").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_debug_session_exposes_raw_state() {
    // テスト項目: /debug/session はセッション構造体をそのまま返す
    let server = TestServer::start(19083);

    let (status, body) = get(&server, "/debug/session").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["registry"]["participants"].is_array());
    assert!(body["history"]["strokes"].is_array());
    assert!(body["created_at"].is_i64());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    // テスト項目: 存在しないパスは 404
    let server = TestServer::start(19084);

    let (status, _) = get(&server, "/api/rooms").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

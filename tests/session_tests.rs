// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use parley::error::{ApiError, ParleyError};
use parley::log::{LogStore, REDACTED_TOKEN};
use parley::query::HttpTransport;
use parley::session::{Session, SessionConfig, Turn};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn read_json(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_logged_session_end_to_end() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/demo"))
        .and(header("Authorization", "Bearer hf_T"))
        .and(body_json(serde_json::json!({
            "past_user_inputs": ["hi"],
            "generated_responses": [],
            "text": "hi"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generated_text": "hello"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let endpoint = format!("{}/models/demo", mock_server.uri());
    let config = SessionConfig::with_log("hf_T", endpoint.clone(), "demo")
        .in_store(LogStore::new(temp_dir.path()));
    let mut session = Session::new(config).unwrap();

    let log_path = temp_dir.path().join("demo.chat.json");
    let created = read_json(&log_path);
    assert_eq!(created["safe"], true);
    assert_eq!(created["model"], endpoint.as_str());
    assert_eq!(created["token"], REDACTED_TOKEN);
    assert_eq!(created["instances"], serde_json::json!([]));

    let transport = HttpTransport::new().unwrap();
    let reply = session.exchange(&transport, Some("hi")).await.unwrap();
    assert_eq!(reply, "hello");
    assert_eq!(session.user_turns(), vec!["hi"]);
    assert_eq!(session.bot_turns(), vec!["hello"]);

    session.save_log().unwrap();
    let saved = read_json(&log_path);
    assert_eq!(
        saved["instances"],
        serde_json::json!([{"user": "hi", "bot": "hello"}])
    );
    assert_eq!(saved["token"], REDACTED_TOKEN);
}

#[tokio::test]
async fn test_second_exchange_sends_history() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_json(serde_json::json!({
            "past_user_inputs": ["hi", "how are you?"],
            "generated_responses": ["hello"],
            "text": "how are you?"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"generated_text": "great", "warnings": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generated_text": "hello"})),
        )
        .mount(&mock_server)
        .await;

    let mut session = Session::new(SessionConfig::basic("t", mock_server.uri())).unwrap();
    let transport = HttpTransport::new().unwrap();

    session.exchange(&transport, Some("hi")).await.unwrap();
    session.set_user_turn("how");
    session.set_user_turn("how are you?");
    let reply = session.exchange(&transport, None).await.unwrap();

    assert_eq!(reply, "great");
    assert_eq!(
        session.turns(),
        &[Turn::new("hi", "hello"), Turn::new("how are you?", "great")]
    );
}

#[tokio::test]
async fn test_transport_failure_leaves_history_untouched() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let store = LogStore::new(temp_dir.path());
    let mut session = Session::new(SessionConfig::basic("t", mock_server.uri())).unwrap();
    session.create_unsafe_log(&store, "fail").unwrap();
    let transport = HttpTransport::new().unwrap();

    let users_before = session.user_turns();
    let bots_before = session.bot_turns();
    let err = session.exchange(&transport, Some("hi")).await.unwrap_err();
    assert!(matches!(
        err,
        ParleyError::Api(ApiError::ServerError { status: 500, .. })
    ));
    assert!(!err.is_local());
    assert_eq!(session.user_turns(), users_before);
    assert_eq!(session.bot_turns(), bots_before);

    session.set_user_turn("draft");
    let users_before = session.user_turns();
    let bots_before = session.bot_turns();
    assert!(session.exchange(&transport, None).await.is_err());
    assert_eq!(session.user_turns(), users_before);
    assert_eq!(session.bot_turns(), bots_before);
    assert_eq!(session.bot_turns(), vec!["None"]);
}

#[tokio::test]
async fn test_unsafe_log_roundtrip_restores_turns() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generated_text": "ok"})),
        )
        .mount(&mock_server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let store = LogStore::new(temp_dir.path());
    let transport = HttpTransport::new().unwrap();

    let mut session = Session::new(SessionConfig::basic("hf_keep", mock_server.uri())).unwrap();
    let path = session.create_unsafe_log(&store, "round").unwrap().to_path_buf();
    for text in ["one", "two", "three"] {
        session.exchange(&transport, Some(text)).await.unwrap();
    }
    session.save_log().unwrap();

    let restored = Session::new(SessionConfig::load(&path, None)).unwrap();
    assert_eq!(restored.user_turns(), session.user_turns());
    assert_eq!(restored.bot_turns(), session.bot_turns());
    assert_eq!(restored.endpoint(), session.endpoint());
    assert_eq!(restored.log_path(), Some(path.as_path()));
}

#[test]
fn test_loading_safe_log_without_token_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = SessionConfig::with_log("hf_T", "https://example.test", "safe")
        .in_store(LogStore::new(temp_dir.path()));
    Session::new(config).unwrap();

    let err = Session::new(SessionConfig::load(
        temp_dir.path().join("safe.chat.json"),
        None,
    ))
    .unwrap_err();
    assert!(matches!(err, ParleyError::Config(_)));
}

#[test]
fn test_loading_malformed_log_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.chat.json");
    std::fs::write(&path, r#"{"safe": false, "model": 3}"#).unwrap();

    let err = Session::new(SessionConfig::load(&path, Some("t".to_string()))).unwrap_err();
    assert!(matches!(err, ParleyError::LogFormat { .. }));
    assert!(err.to_string().contains("broken.chat.json"));
}

#[test]
fn test_creating_existing_log_fails() {
    let temp_dir = TempDir::new().unwrap();
    let store = LogStore::new(temp_dir.path());
    let config = || SessionConfig::with_log("t", "https://example.test", "dup").in_store(store.clone());

    Session::new(config()).unwrap();
    let err = Session::new(config()).unwrap_err();
    assert!(matches!(err, ParleyError::LogExists(_)));
}

#[test]
fn test_save_while_pending_omits_draft() {
    let temp_dir = TempDir::new().unwrap();
    let store = LogStore::new(temp_dir.path());
    let mut session = Session::new(
        SessionConfig::with_log("t", "https://example.test", "draft").in_store(store.clone()),
    )
    .unwrap();

    session.set_user_turn("not yet answered");
    session.save_log().unwrap();

    let record = LogStore::load(&store.path_for("draft")).unwrap();
    assert!(record.instances.is_empty());
    assert!(session.is_pending());
}

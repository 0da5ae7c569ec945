//! Backend client tests against a mocked management API

mod helpers;

use assert_matches::assert_matches;
use helpers::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ChatFleet::models::chat::{ChatKind, ChatUpdateFields};
use ChatFleet::services::BackendService;
use ChatFleet::utils::errors::{BackendError, ChatFleetError};

fn backend_against(server: &MockServer) -> BackendService {
    let settings = test_settings(&server.uri());
    BackendService::new(&settings.backend).unwrap()
}

#[tokio::test]
async fn test_list_chats_converts_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7,
                "title": null,
                "is_forum": true,
                "welcome_message": "welcome",
                "welcome_delete_time": 120,
                "is_welcome_enabled": false,
                "is_captcha_enabled": false,
                "created_at": null,
                "modified_at": null
            },
            chat_record(8, "Main hall")
        ])))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let chats = backend.list_chats().await.unwrap();

    assert_eq!(chats.len(), 2);

    // Untitled forum chat: fallback title, supergroup kind, inactive
    assert_eq!(chats[0].title, "Chat 7");
    assert_eq!(chats[0].kind, ChatKind::Supergroup);
    assert!(!chats[0].is_active);
    assert_eq!(chats[0].auto_delete_welcome_delay, Some(120));

    // Welcome enabled implies active
    assert_eq!(chats[1].title, "Main hall");
    assert_eq!(chats[1].kind, ChatKind::Group);
    assert!(chats[1].is_active);
}

#[tokio::test]
async fn test_get_chat() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_record(8, "Main hall")))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let chat = backend.get_chat(8).await.unwrap();

    assert_eq!(chat.id, 8);
    assert_eq!(chat.title, "Main hall");
}

#[tokio::test]
async fn test_chat_stats_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats/5/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "chat_id": 5,
            "member_count": 250,
            "message_count_24h": 1200,
            "active_users_24h": 80,
            "moderation_actions_24h": 3,
            "last_activity": "2024-05-01T12:00:00Z"
        })))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let stats = backend.chat_stats(5).await.unwrap();

    assert_eq!(stats.chat_id, 5);
    assert_eq!(stats.member_count, 250);
    assert_eq!(stats.active_users_24h, 80);
    assert!(stats.last_activity.is_some());
}

#[tokio::test]
async fn test_update_chat_returns_authoritative_record() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/chats/9"))
        .and(body_partial_json(json!({"is_captcha_enabled": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 9,
            "title": "Lobby",
            "is_forum": false,
            "welcome_message": null,
            "welcome_delete_time": 60,
            "is_welcome_enabled": false,
            "is_captcha_enabled": true,
            "created_at": "2024-05-01T10:00:00Z",
            "modified_at": "2024-05-02T10:00:00Z"
        })))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let fields = ChatUpdateFields {
        is_captcha_enabled: Some(true),
        ..Default::default()
    };
    let chat = backend.update_chat(9, fields).await.unwrap();

    assert_eq!(chat.id, 9);
    assert_eq!(chat.title, "Lobby");
    assert!(chat.is_active);
}

#[tokio::test]
async fn test_server_error_maps_to_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database exploded"))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let result = backend.list_chats().await;

    assert_matches!(
        result,
        Err(ChatFleetError::Backend(BackendError::RequestFailed(_)))
    );
}

#[tokio::test]
async fn test_malformed_body_maps_to_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    let result = backend.list_chats().await;

    assert_matches!(
        result,
        Err(ChatFleetError::Backend(BackendError::InvalidResponse(_)))
    );
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let backend = backend_against(&server);
    assert!(backend.health_check().await);

    let dead = BackendService::new(&test_settings("http://127.0.0.1:1").backend).unwrap();
    assert!(!dead.health_check().await);
}

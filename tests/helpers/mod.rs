//! Shared test infrastructure
//!
//! Helpers for building settings pointed at a mock backend and for
//! composing backend response fixtures.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ChatFleet::config::{
    AgentConfig, BackendConfig, CacheConfig, FeaturesConfig, LoggingConfig, Settings,
};

/// Settings pointed at a mock server
pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        backend: BackendConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        },
        agent: AgentConfig {
            base_url: base_url.to_string(),
            default_provider: "openai".to_string(),
            timeout_seconds: 5,
        },
        cache: CacheConfig { ttl_seconds: 300 },
        logging: LoggingConfig {
            level: "debug".to_string(),
            file_path: "./logs".to_string(),
        },
        features: FeaturesConfig {
            agent_chat: true,
            chat_stats: true,
        },
    }
}

/// A backend chat record fixture
pub fn chat_record(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "is_forum": false,
        "welcome_message": null,
        "welcome_delete_time": 60,
        "is_welcome_enabled": true,
        "is_captcha_enabled": false,
        "created_at": "2024-05-01T10:00:00Z",
        "modified_at": "2024-05-01T10:00:00Z"
    })
}

/// Start a mock server answering `GET /chats` with the given records
pub async fn server_with_chats(records: Vec<Value>) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(&server)
        .await;
    server
}

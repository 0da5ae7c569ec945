//! Management backend service implementation
//!
//! This service wraps the chat management REST API: listing chats, per-chat
//! statistics, single and bulk field updates, and the health probe. It owns
//! HTTP client setup, response parsing and error mapping.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::BackendConfig;
use crate::models::chat::{
    BulkUpdateRequest, Chat, ChatRecord, ChatStatsRecord, ChatUpdateFields,
};
use crate::utils::errors::{BackendError, ChatFleetError, Result};

/// REST client for the chat management backend
#[derive(Debug, Clone)]
pub struct BackendService {
    client: Client,
    base_url: String,
}

impl BackendService {
    /// Create a new BackendService instance
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("ChatFleet-Console/1.0")
            .build()
            .map_err(ChatFleetError::Http)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch all chats, converted for the operator
    pub async fn list_chats(&self) -> Result<Vec<Chat>> {
        let url = format!("{}/chats", self.base_url);
        debug!(url = %url, "Fetching chat list");

        let records: Vec<ChatRecord> = self.get_json(&url).await?;
        info!(count = records.len(), "Fetched chat list");

        Ok(records.into_iter().map(ChatRecord::into_chat).collect())
    }

    /// Fetch a single chat by id
    pub async fn get_chat(&self, chat_id: i64) -> Result<Chat> {
        let url = format!("{}/chats/{}", self.base_url, chat_id);
        debug!(chat_id = chat_id, "Fetching chat");

        let record: ChatRecord = self.get_json(&url).await?;
        Ok(record.into_chat())
    }

    /// Fetch usage statistics for a chat
    pub async fn chat_stats(&self, chat_id: i64) -> Result<ChatStatsRecord> {
        let url = format!("{}/chats/{}/stats", self.base_url, chat_id);
        debug!(chat_id = chat_id, "Fetching chat statistics");

        self.get_json(&url).await
    }

    /// Apply a partial field update to one chat.
    ///
    /// The backend returns the authoritative post-update record.
    pub async fn update_chat(&self, chat_id: i64, fields: ChatUpdateFields) -> Result<Chat> {
        let url = format!("{}/chats/{}", self.base_url, chat_id);
        debug!(chat_id = chat_id, "Updating chat");

        let response = self
            .client
            .put(&url)
            .json(&fields)
            .send()
            .await
            .map_err(map_send_error)?;

        let record: ChatRecord = Self::parse_response(response).await?;
        info!(chat_id = chat_id, "Chat updated");
        Ok(record.into_chat())
    }

    /// Apply one field update to many chats in a single request.
    ///
    /// Only the records the backend managed to update appear in the
    /// response; missing ids must be treated as failures by the caller.
    pub async fn bulk_update(
        &self,
        chat_ids: Vec<i64>,
        update_data: ChatUpdateFields,
    ) -> Result<Vec<ChatRecord>> {
        let url = format!("{}/chats/bulk-update", self.base_url);
        let request = BulkUpdateRequest {
            chat_ids,
            update_data,
        };

        debug!(count = request.chat_ids.len(), url = %url, "Issuing bulk update");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let records: Vec<ChatRecord> = Self::parse_response(response).await?;
        info!(
            requested = request.chat_ids.len(),
            updated = records.len(),
            "Bulk update completed"
        );

        Ok(records)
    }

    /// Check backend availability
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).send().await.map_err(map_send_error)?;
        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatFleetError::Backend(BackendError::RequestFailed(
                format!("HTTP {}: {}", status, error_text),
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ChatFleetError::Backend(BackendError::InvalidResponse(e.to_string())))
    }
}

fn map_send_error(e: reqwest::Error) -> ChatFleetError {
    if e.is_timeout() {
        ChatFleetError::Backend(BackendError::Timeout)
    } else if e.is_connect() {
        ChatFleetError::Backend(BackendError::ServiceUnavailable)
    } else {
        ChatFleetError::Backend(BackendError::RequestFailed(e.to_string()))
    }
}

//! Agent chat service implementation
//!
//! This service wraps the backend's LLM agent sub-API: model discovery,
//! chat session lifecycle and message exchange. A plain CRUD-over-HTTP
//! client with the same error mapping as the backend service.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, info};

use crate::config::AgentConfig;
use crate::models::agent::{
    AgentMessage, AgentReply, AgentSession, AvailableModel, ChatMessageRequest,
    CreateSessionRequest, ModelProvider, SessionList,
};
use crate::utils::errors::{AgentError, ChatFleetError, Result};

/// REST client for the agent sub-API
#[derive(Debug, Clone)]
pub struct AgentService {
    client: Client,
    base_url: String,
}

impl AgentService {
    /// Create a new AgentService instance
    pub fn new(config: &AgentConfig) -> Result<Self> {
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

    /// List models available from a provider
    pub async fn list_models(&self, provider: ModelProvider) -> Result<Vec<AvailableModel>> {
        let url = format!("{}/agent/models/{}", self.base_url, provider);
        debug!(provider = %provider, "Fetching available models");

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        Self::parse_response(response, None).await
    }

    /// Create a new agent session
    pub async fn create_session(&self, request: CreateSessionRequest) -> Result<AgentSession> {
        let url = format!("{}/agent/sessions", self.base_url);
        debug!(model_id = %request.agent_config.model_id, "Creating agent session");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let session: AgentSession = Self::parse_response(response, None).await?;
        info!(session_id = %session.id, "Agent session created");
        Ok(session)
    }

    /// List the operator's sessions, newest first
    pub async fn list_sessions(&self, limit: u32) -> Result<SessionList> {
        let url = format!("{}/agent/sessions", self.base_url);
        debug!(limit = limit, "Fetching agent sessions");

        let response = self
            .client
            .get(&url)
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(map_send_error)?;

        Self::parse_response(response, None).await
    }

    /// Fetch one session
    pub async fn get_session(&self, session_id: &str) -> Result<AgentSession> {
        let url = format!("{}/agent/sessions/{}", self.base_url, session_id);
        debug!(session_id = session_id, "Fetching agent session");

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        Self::parse_response(response, Some(session_id)).await
    }

    /// Fetch the message history of a session
    pub async fn session_messages(&self, session_id: &str) -> Result<Vec<AgentMessage>> {
        let url = format!("{}/agent/sessions/{}/messages", self.base_url, session_id);
        debug!(session_id = session_id, "Fetching session messages");

        let response = self.client.get(&url).send().await.map_err(map_send_error)?;
        Self::parse_response(response, Some(session_id)).await
    }

    /// Send a message to the agent and wait for its reply
    pub async fn send_message(
        &self,
        session_id: &str,
        request: ChatMessageRequest,
    ) -> Result<AgentReply> {
        let url = format!("{}/agent/sessions/{}/chat", self.base_url, session_id);
        debug!(session_id = session_id, "Sending agent message");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let reply: AgentReply = Self::parse_response(response, Some(session_id)).await?;
        info!(
            session_id = session_id,
            model_used = %reply.model_used,
            tokens_used = reply.tokens_used,
            "Agent reply received"
        );
        Ok(reply)
    }

    /// Delete a session
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        let url = format!("{}/agent/sessions/{}", self.base_url, session_id);
        debug!(session_id = session_id, "Deleting agent session");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_send_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ChatFleetError::Agent(AgentError::SessionNotFound(
                session_id.to_string(),
            )));
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatFleetError::Agent(AgentError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            ))));
        }

        info!(session_id = session_id, "Agent session deleted");
        Ok(())
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        session_id: Option<&str>,
    ) -> Result<T> {
        if response.status() == StatusCode::NOT_FOUND {
            if let Some(id) = session_id {
                return Err(ChatFleetError::Agent(AgentError::SessionNotFound(
                    id.to_string(),
                )));
            }
        }
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ChatFleetError::Agent(AgentError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            ))));
        }

        response
            .json()
            .await
            .map_err(|e| ChatFleetError::Agent(AgentError::InvalidResponse(e.to_string())))
    }
}

fn map_send_error(e: reqwest::Error) -> ChatFleetError {
    if e.is_timeout() {
        ChatFleetError::Agent(AgentError::Timeout)
    } else if e.is_connect() {
        ChatFleetError::Agent(AgentError::ServiceUnavailable)
    } else {
        ChatFleetError::Agent(AgentError::RequestFailed(e.to_string()))
    }
}

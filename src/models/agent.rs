//! Agent sub-API wire model
//!
//! Schemas for the backend's LLM agent service: model listing, chat
//! sessions and message exchange.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::errors::ChatFleetError;

/// LLM provider backing an agent session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    OpenAi,
    OpenRouter,
}

impl ModelProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelProvider::OpenAi => "openai",
            ModelProvider::OpenRouter => "openrouter",
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ModelProvider {
    type Err = ChatFleetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(ModelProvider::OpenAi),
            "openrouter" => Ok(ModelProvider::OpenRouter),
            other => Err(ChatFleetError::InvalidInput(format!(
                "Unknown model provider: {}",
                other
            ))),
        }
    }
}

/// Model configuration attached to a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f64 {
    0.7
}

impl ModelConfig {
    pub fn new(provider: ModelProvider, model_id: impl Into<String>) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            model_name: None,
            temperature: default_temperature(),
            max_tokens: None,
        }
    }
}

/// A model offered by a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableModel {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub context_length: Option<u32>,
    pub provider: ModelProvider,
}

/// Request body for session creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub agent_config: ModelConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// An agent chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSession {
    pub id: String,
    pub title: Option<String>,
    pub agent_config: ModelConfig,
    pub system_prompt: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
    #[serde(default)]
    pub message_count: u32,
}

/// Paged session listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionList {
    pub sessions: Vec<AgentSession>,
    pub total: u64,
}

/// One message within a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub id: String,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Request body for sending a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
}

/// The agent's reply to a sent message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentReply {
    pub session_id: String,
    pub message: String,
    pub model_used: String,
    pub tokens_used: Option<u64>,
    pub execution_time: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

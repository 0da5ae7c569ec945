//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod action;
pub mod agent;
pub mod chat;
pub mod result;

// Re-export commonly used models
pub use action::{
    ActionCategory, ActionConfig, ActionDefinition, ActionField, ApplyTo, FieldKind,
    FieldValidation, SelectOption,
};
pub use agent::{
    AgentMessage, AgentReply, AgentSession, AvailableModel, ChatMessageRequest,
    CreateSessionRequest, ModelConfig, ModelProvider, SessionList,
};
pub use chat::{
    BulkUpdateRequest, Chat, ChatFilters, ChatKind, ChatRecord, ChatStatsRecord, ChatUpdateFields,
};
pub use result::{ChatOutcome, ExecutionResult};

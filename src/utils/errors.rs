//! Error handling for ChatFleet
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the ChatFleet application
#[derive(Error, Debug)]
pub enum ChatFleetError {
    #[error("Backend API error: {0}")]
    Backend(#[from] BackendError),

    #[error("Agent API error: {0}")]
    Agent(#[from] AgentError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Chat not found: {chat_id}")]
    ChatNotFound { chat_id: i64 },

    #[error("Unknown action: {action_id}")]
    UnknownAction { action_id: String },

    #[error("Unmapped field: {key}")]
    UnmappedField { key: String },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("An execution is already in flight")]
    ExecutionInFlight,

    #[error("Operator confirmation required for this action")]
    ConfirmationRequired,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Management backend specific errors
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    RequestFailed(String),

    #[error("Backend request timeout")]
    Timeout,

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Backend service unavailable")]
    ServiceUnavailable,
}

/// Agent sub-API specific errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Agent request failed: {0}")]
    RequestFailed(String),

    #[error("Agent request timeout")]
    Timeout,

    #[error("Invalid agent response: {0}")]
    InvalidResponse(String),

    #[error("Agent session not found: {0}")]
    SessionNotFound(String),

    #[error("Agent service unavailable")]
    ServiceUnavailable,
}

/// Result type alias for ChatFleet operations
pub type Result<T> = std::result::Result<T, ChatFleetError>;

/// Result type alias for backend operations
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Result type alias for agent operations
pub type AgentResult<T> = std::result::Result<T, AgentError>;

impl ChatFleetError {
    /// Check if the error is recoverable by the operator (reset and retry)
    pub fn is_recoverable(&self) -> bool {
        match self {
            ChatFleetError::Backend(_) => true,
            ChatFleetError::Agent(_) => true,
            ChatFleetError::Config(_) => false,
            ChatFleetError::ChatNotFound { .. } => true,
            ChatFleetError::UnknownAction { .. } => false,
            ChatFleetError::UnmappedField { .. } => false,
            ChatFleetError::InvalidStateTransition { .. } => true,
            ChatFleetError::ExecutionInFlight => true,
            ChatFleetError::ConfirmationRequired => true,
            ChatFleetError::Http(_) => true,
            ChatFleetError::Serialization(_) => false,
            ChatFleetError::Io(_) => true,
            ChatFleetError::UrlParse(_) => false,
            ChatFleetError::InvalidInput(_) => true,
            ChatFleetError::ServiceUnavailable(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ChatFleetError::Config(_) => ErrorSeverity::Critical,
            ChatFleetError::UnmappedField { .. } => ErrorSeverity::Critical,
            ChatFleetError::InvalidInput(_) => ErrorSeverity::Info,
            ChatFleetError::ConfirmationRequired => ErrorSeverity::Info,
            ChatFleetError::ExecutionInFlight => ErrorSeverity::Warning,
            ChatFleetError::InvalidStateTransition { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

//! Services module
//!
//! This module contains the REST clients for the management backend and
//! the agent sub-API.

pub mod agent;
pub mod backend;

// Re-export commonly used services
pub use agent::AgentService;
pub use backend::BackendService;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub backend: BackendService,
    pub agent: AgentService,
    settings: Settings,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let backend = BackendService::new(&settings.backend)?;
        let agent = AgentService::new(&settings.agent)?;

        Ok(Self {
            backend,
            agent,
            settings,
        })
    }

    /// Whether the agent chat surface is enabled
    pub fn agent_chat_enabled(&self) -> bool {
        self.settings.features.agent_chat
    }

    /// Whether per-chat statistics are enabled
    pub fn chat_stats_enabled(&self) -> bool {
        self.settings.features.chat_stats
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        ServiceHealthStatus {
            backend_healthy: self.backend.health_check().await,
            agent_enabled: self.agent_chat_enabled(),
            stats_enabled: self.chat_stats_enabled(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub backend_healthy: bool,
    pub agent_enabled: bool,
    pub stats_enabled: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.backend_healthy
    }

    /// Get list of detected issues
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.backend_healthy {
            issues.push("Backend connection failed".to_string());
        }

        issues
    }
}

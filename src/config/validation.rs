//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use url::Url;

use super::Settings;
use crate::utils::errors::{ChatFleetError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_backend_config(&settings.backend)?;
    validate_agent_config(&settings.agent)?;
    validate_cache_config(&settings.cache)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate backend API configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ChatFleetError::Config(
            "Backend base URL is required".to_string(),
        ));
    }

    Url::parse(&config.base_url)
        .map_err(|e| ChatFleetError::Config(format!("Invalid backend base URL: {}", e)))?;

    if config.timeout_seconds == 0 {
        return Err(ChatFleetError::Config(
            "Backend timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate agent sub-API configuration
fn validate_agent_config(config: &super::AgentConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(ChatFleetError::Config(
            "Agent base URL is required".to_string(),
        ));
    }

    Url::parse(&config.base_url)
        .map_err(|e| ChatFleetError::Config(format!("Invalid agent base URL: {}", e)))?;

    if config.default_provider.is_empty() {
        return Err(ChatFleetError::Config(
            "Agent default provider is required".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ChatFleetError::Config(
            "Agent timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate cache configuration
fn validate_cache_config(config: &super::CacheConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(ChatFleetError::Config(
            "Cache TTL must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ChatFleetError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ChatFleetError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

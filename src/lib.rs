//! ChatFleet operator console
//!
//! A console for bulk administration of a Telegram chat fleet through its
//! management backend. This library provides the chat directory, selection
//! handling, the bulk-action catalog and configuration pipeline, the
//! execution coordinator, and a client for the backend's agent chat
//! sessions.

#![allow(non_snake_case)]

pub mod catalog;
pub mod config;
pub mod console;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ChatFleetError, Result};

// Re-export main components for easy access
pub use catalog::ActionCatalog;
pub use services::ServiceFactory;
pub use workflow::{Workflow, WorkflowPhase};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}

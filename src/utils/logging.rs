//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the ChatFleet console. Initialization is an explicit call made once by
//! the hosting shell; the returned guard flushes the file appender on drop.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The caller must keep the returned guard alive for the lifetime of the
/// process, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.file_path, "chatfleet.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log operator actions with structured data
pub fn log_operator_action(action: &str, details: Option<&str>) {
    info!(action = action, details = details, "Operator action performed");
}

/// Log a bulk execution outcome
pub fn log_execution_outcome(action_id: &str, total: usize, succeeded: usize, failed: usize) {
    if failed > 0 {
        warn!(
            action_id = action_id,
            total = total,
            succeeded = succeeded,
            failed = failed,
            "Bulk execution completed with failures"
        );
    } else {
        info!(
            action_id = action_id,
            total = total,
            succeeded = succeeded,
            "Bulk execution completed"
        );
    }
}

/// Log API errors with context
pub fn log_api_error(api: &str, error: &str, context: Option<&str>) {
    tracing::error!(api = api, error = error, context = context, "API error occurred");
}

/// Log directory refreshes
pub fn log_directory_refresh(count: usize, pruned: usize) {
    debug!(
        chat_count = count,
        pruned_selection = pruned,
        "Chat directory refreshed"
    );
}

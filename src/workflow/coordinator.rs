//! Execution coordinator
//!
//! Sends a configured bulk action to the backend in one request and
//! aggregates the per-chat outcomes. No retries are attempted; the
//! coordinator is confirmation-agnostic.

use tracing::{error, info};

use crate::models::action::ActionConfig;
use crate::models::result::{ChatOutcome, ExecutionResult};
use crate::services::BackendService;
use crate::utils::errors::Result;
use crate::utils::logging::log_execution_outcome;

use super::translate::translate_values;

/// Generic per-chat failure message; the backend returns no per-id detail.
const OUTCOME_FAILURE: &str = "Chat not found or could not be updated";

/// Top-level message for a failed transport or server error.
const TRANSPORT_FAILURE: &str = "Server error during bulk update";

/// Coordinates bulk execution against the backend
#[derive(Debug, Clone)]
pub struct ExecutionCoordinator {
    backend: BackendService,
}

impl ExecutionCoordinator {
    pub fn new(backend: BackendService) -> Self {
        Self { backend }
    }

    /// Execute a configuration against the selected chat ids.
    ///
    /// Preconditions (non-empty ids, present configuration, operator
    /// confirmation where required) are enforced by the caller. Translation
    /// failures are local errors; a failed request produces the aggregate
    /// failure result instead.
    pub async fn execute(&self, chat_ids: &[i64], config: &ActionConfig) -> Result<ExecutionResult> {
        let update = translate_values(&config.values)?;

        info!(
            action_id = %config.action_id,
            count = chat_ids.len(),
            "Executing bulk action"
        );

        match self.backend.bulk_update(chat_ids.to_vec(), update).await {
            Ok(records) => {
                let outcomes: Vec<ChatOutcome> = chat_ids
                    .iter()
                    .map(|id| match records.iter().find(|r| r.id == *id) {
                        Some(record) => ChatOutcome {
                            chat_id: *id,
                            chat_title: record.display_title(),
                            success: true,
                            error: None,
                            changes: Some(config.values.clone()),
                        },
                        None => ChatOutcome {
                            chat_id: *id,
                            chat_title: format!("Chat {}", id),
                            success: false,
                            error: Some(OUTCOME_FAILURE.to_string()),
                            changes: None,
                        },
                    })
                    .collect();

                let result = ExecutionResult::from_outcomes(outcomes);
                log_execution_outcome(
                    &config.action_id,
                    result.total_chats,
                    result.success_count,
                    result.failure_count,
                );
                Ok(result)
            }
            Err(e) => {
                error!(
                    action_id = %config.action_id,
                    count = chat_ids.len(),
                    error = %e,
                    "Bulk update request failed"
                );
                Ok(ExecutionResult::transport_failure(
                    chat_ids.len(),
                    TRANSPORT_FAILURE,
                ))
            }
        }
    }
}

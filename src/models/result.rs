//! Bulk execution results
//!
//! Result records produced by the execution coordinator. A result is built
//! once per execution and never mutated; reset replaces it wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a bulk update for one chat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub chat_id: i64,
    pub chat_title: String,
    pub success: bool,
    pub error: Option<String>,
    pub changes: Option<BTreeMap<String, serde_json::Value>>,
}

/// Aggregated outcome of one bulk execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub total_chats: usize,
    pub success_count: usize,
    pub failure_count: usize,
    pub outcomes: Vec<ChatOutcome>,
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Build a result from per-chat outcomes, tallying the counts
    pub fn from_outcomes(outcomes: Vec<ChatOutcome>) -> Self {
        let total_chats = outcomes.len();
        let success_count = outcomes.iter().filter(|o| o.success).count();
        let failure_count = total_chats - success_count;

        Self {
            success: success_count == total_chats,
            total_chats,
            success_count,
            failure_count,
            outcomes,
            error: None,
        }
    }

    /// Build the aggregate failure used when the whole request failed.
    ///
    /// The backend is all-or-nothing at the transport layer, so no per-chat
    /// detail is available; every requested chat counts as failed.
    pub fn transport_failure(total_chats: usize, message: impl Into<String>) -> Self {
        Self {
            success: false,
            total_chats,
            success_count: 0,
            failure_count: total_chats,
            outcomes: Vec::new(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(chat_id: i64, success: bool) -> ChatOutcome {
        ChatOutcome {
            chat_id,
            chat_title: format!("Chat {}", chat_id),
            success,
            error: if success {
                None
            } else {
                Some("Chat not found or could not be updated".to_string())
            },
            changes: None,
        }
    }

    #[test]
    fn test_tally_counts() {
        let result =
            ExecutionResult::from_outcomes(vec![outcome(1, true), outcome(2, false), outcome(3, true)]);

        assert!(!result.success);
        assert_eq!(result.total_chats, 3);
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_all_successful_is_overall_success() {
        let result = ExecutionResult::from_outcomes(vec![outcome(1, true), outcome(2, true)]);
        assert!(result.success);
        assert_eq!(result.failure_count, 0);
    }

    #[test]
    fn test_transport_failure_has_no_detail() {
        let result = ExecutionResult::transport_failure(4, "Server error during bulk update");

        assert!(!result.success);
        assert_eq!(result.total_chats, 4);
        assert_eq!(result.success_count, 0);
        assert_eq!(result.failure_count, 4);
        assert!(result.outcomes.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some("Server error during bulk update")
        );
    }
}

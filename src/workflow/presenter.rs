//! Result presenter
//!
//! Renders a bulk action summary and the aggregated execution result as
//! display text for the operator console.

use crate::models::action::ActionConfig;
use crate::models::result::ExecutionResult;

/// Icon shown next to an action summary
pub fn action_icon(action_id: &str) -> &'static str {
    match action_id {
        "update_description" => "📝",
        "update_welcome" => "👋",
        "broadcast_message" => "📢",
        "chat_settings" => "⚙️",
        "user_management" => "👥",
        _ => "🛠️",
    }
}

/// One-line description of what is about to run
pub fn action_summary(config: &ActionConfig, chat_count: usize) -> String {
    match config.action_id.as_str() {
        "update_description" => format!("Update the description of {} chats", chat_count),
        "update_welcome" => format!("Configure the welcome message in {} chats", chat_count),
        "broadcast_message" => format!("Send a message to {} chats", chat_count),
        "chat_settings" => format!("Change the settings of {} chats", chat_count),
        "user_management" => format!("Run member operations in {} chats", chat_count),
        _ => format!("Run the action in {} chats", chat_count),
    }
}

/// Render the configured values for a confirmation preview
pub fn render_config_preview(config: &ActionConfig) -> String {
    let mut lines = vec!["Action parameters:".to_string()];
    for (key, value) in &config.values {
        let display = match value {
            serde_json::Value::Bool(true) => "yes".to_string(),
            serde_json::Value::Bool(false) => "no".to_string(),
            serde_json::Value::String(s) => crate::utils::helpers::truncate_text(s, 50),
            other => other.to_string(),
        };
        lines.push(format!("  {}: {}", key, display));
    }
    lines.join("\n")
}

/// Render aggregate counts and the per-chat outcome list
pub fn render_result(result: &ExecutionResult) -> String {
    let mut lines = Vec::new();

    if result.success {
        lines.push("✅ Operation completed".to_string());
    } else {
        lines.push("❌ Operation finished with failures".to_string());
    }

    if let Some(error) = &result.error {
        lines.push(format!("Error: {}", error));
        lines.push(format!(
            "Total chats: {}  Succeeded: {}  Failed: {}",
            result.total_chats, result.success_count, result.failure_count
        ));
        return lines.join("\n");
    }

    lines.push(format!(
        "Total chats: {}  Succeeded: {}  Failed: {}",
        result.total_chats, result.success_count, result.failure_count
    ));

    if !result.outcomes.is_empty() {
        lines.push("Detailed results:".to_string());
        for outcome in &result.outcomes {
            let icon = if outcome.success { "✅" } else { "❌" };
            let mut line = format!("  {} {}", icon, outcome.chat_title);
            if let Some(error) = &outcome.error {
                line.push_str(&format!(" — {}", error));
            }
            if let Some(changes) = &outcome.changes {
                let keys: Vec<&str> = changes.keys().map(String::as_str).collect();
                line.push_str(&format!(" (changed: {})", keys.join(", ")));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::action::ApplyTo;
    use crate::models::result::{ChatOutcome, ExecutionResult};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn config(action_id: &str) -> ActionConfig {
        let mut values = BTreeMap::new();
        values.insert("welcome_message".to_string(), json!("Hello"));
        ActionConfig {
            action_id: action_id.to_string(),
            values,
            apply_to: ApplyTo::Selected,
            confirmation_required: false,
        }
    }

    #[test]
    fn test_action_summary_wording() {
        assert_eq!(
            action_summary(&config("update_welcome"), 3),
            "Configure the welcome message in 3 chats"
        );
        assert_eq!(
            action_summary(&config("unknown_action"), 2),
            "Run the action in 2 chats"
        );
    }

    #[test]
    fn test_render_result_with_details() {
        let result = ExecutionResult::from_outcomes(vec![
            ChatOutcome {
                chat_id: 1,
                chat_title: "General".to_string(),
                success: true,
                error: None,
                changes: Some(
                    [("welcome_message".to_string(), json!("Hello"))]
                        .into_iter()
                        .collect(),
                ),
            },
            ChatOutcome {
                chat_id: 2,
                chat_title: "Chat 2".to_string(),
                success: false,
                error: Some("Chat not found or could not be updated".to_string()),
                changes: None,
            },
        ]);

        let rendered = render_result(&result);
        assert!(rendered.contains("Total chats: 2  Succeeded: 1  Failed: 1"));
        assert!(rendered.contains("✅ General"));
        assert!(rendered.contains("changed: welcome_message"));
        assert!(rendered.contains("❌ Chat 2 — Chat not found or could not be updated"));
    }

    #[test]
    fn test_render_transport_failure_has_no_detail_list() {
        let result = ExecutionResult::transport_failure(3, "Server error during bulk update");
        let rendered = render_result(&result);

        assert!(rendered.contains("Error: Server error during bulk update"));
        assert!(rendered.contains("Total chats: 3  Succeeded: 0  Failed: 3"));
        assert!(!rendered.contains("Detailed results"));
    }

    #[test]
    fn test_config_preview_formats_values() {
        let mut cfg = config("chat_settings");
        cfg.values.insert("is_active".to_string(), json!(true));

        let preview = render_config_preview(&cfg);
        assert!(preview.contains("is_active: yes"));
        assert!(preview.contains("welcome_message: Hello"));
    }
}

//! Operator console commands
//!
//! This module defines the command grammar of the interactive shell and the
//! parser turning operator input lines into commands. Dispatch lives in the
//! binary.

use serde_json::Value;

use crate::models::action::ApplyTo;
use crate::utils::errors::{ChatFleetError, Result};

/// Selection sub-commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectTarget {
    Ids(Vec<i64>),
    All,
    None,
    Invert,
}

/// Commands accepted by the operator console
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Help,
    Chats,
    Refresh,
    Filter(String),
    ClearFilter,
    Stats(i64),
    Select(SelectTarget),
    Actions,
    Action(String),
    Set { key: String, value: Value },
    Scope(ApplyTo),
    Preview,
    Execute { confirmed: bool },
    ShowResult,
    Reset,
    Models(Option<String>),
    Sessions,
    NewSession { provider: String, model_id: String, title: Option<String> },
    Say { session_id: String, message: String },
    History(String),
    DeleteSession(String),
    Quit,
}

impl ConsoleCommand {
    /// Parse one input line into a command
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let keyword = parts
            .next()
            .ok_or_else(|| ChatFleetError::InvalidInput("Empty command".to_string()))?;
        let rest: Vec<&str> = parts.collect();

        match keyword.to_ascii_lowercase().as_str() {
            "help" | "?" => Ok(ConsoleCommand::Help),
            "chats" | "list" => Ok(ConsoleCommand::Chats),
            "refresh" => Ok(ConsoleCommand::Refresh),
            "filter" => match rest.as_slice() {
                [] | ["clear"] => Ok(ConsoleCommand::ClearFilter),
                terms => Ok(ConsoleCommand::Filter(terms.join(" "))),
            },
            "stats" => {
                let id = single_id(&rest, "stats <chat_id>")?;
                Ok(ConsoleCommand::Stats(id))
            }
            "select" => parse_select(&rest),
            "actions" => Ok(ConsoleCommand::Actions),
            "action" => match rest.as_slice() {
                [id] => Ok(ConsoleCommand::Action(id.to_string())),
                _ => Err(usage("action <action_id>")),
            },
            "set" => match rest.split_first() {
                Some((key, value)) if !value.is_empty() => Ok(ConsoleCommand::Set {
                    key: key.to_string(),
                    value: parse_field_value(&value.join(" ")),
                }),
                _ => Err(usage("set <field> <value>")),
            },
            "scope" => match rest.as_slice() {
                ["selected"] => Ok(ConsoleCommand::Scope(ApplyTo::Selected)),
                ["all"] => Ok(ConsoleCommand::Scope(ApplyTo::All)),
                ["filtered"] => Ok(ConsoleCommand::Scope(ApplyTo::Filtered)),
                _ => Err(usage("scope selected|all|filtered")),
            },
            "preview" => Ok(ConsoleCommand::Preview),
            "execute" | "run" => {
                let confirmed = rest.iter().any(|a| *a == "--yes" || *a == "-y");
                Ok(ConsoleCommand::Execute { confirmed })
            }
            "result" => Ok(ConsoleCommand::ShowResult),
            "reset" => Ok(ConsoleCommand::Reset),
            "models" => Ok(ConsoleCommand::Models(rest.first().map(|s| s.to_string()))),
            "sessions" => Ok(ConsoleCommand::Sessions),
            "session" => match rest.split_first() {
                Some((&"new", args)) if args.len() >= 2 => Ok(ConsoleCommand::NewSession {
                    provider: args[0].to_string(),
                    model_id: args[1].to_string(),
                    title: if args.len() > 2 {
                        Some(args[2..].join(" "))
                    } else {
                        None
                    },
                }),
                _ => Err(usage("session new <provider> <model_id> [title]")),
            },
            "say" => match rest.split_first() {
                Some((session_id, words)) if !words.is_empty() => Ok(ConsoleCommand::Say {
                    session_id: session_id.to_string(),
                    message: words.join(" "),
                }),
                _ => Err(usage("say <session_id> <message>")),
            },
            "history" => match rest.as_slice() {
                [session_id] => Ok(ConsoleCommand::History(session_id.to_string())),
                _ => Err(usage("history <session_id>")),
            },
            "delete-session" => match rest.as_slice() {
                [session_id] => Ok(ConsoleCommand::DeleteSession(session_id.to_string())),
                _ => Err(usage("delete-session <session_id>")),
            },
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(ChatFleetError::InvalidInput(format!(
                "Unknown command: {}. Type 'help' for the command list.",
                other
            ))),
        }
    }
}

fn parse_select(rest: &[&str]) -> Result<ConsoleCommand> {
    match rest {
        ["all"] => Ok(ConsoleCommand::Select(SelectTarget::All)),
        ["none"] | ["clear"] => Ok(ConsoleCommand::Select(SelectTarget::None)),
        ["invert"] => Ok(ConsoleCommand::Select(SelectTarget::Invert)),
        [] => Err(usage("select <id...>|all|none|invert")),
        ids => {
            let parsed: std::result::Result<Vec<i64>, _> =
                ids.iter().map(|s| s.parse::<i64>()).collect();
            match parsed {
                Ok(ids) => Ok(ConsoleCommand::Select(SelectTarget::Ids(ids))),
                Err(_) => Err(usage("select <id...>|all|none|invert")),
            }
        }
    }
}

fn single_id(rest: &[&str], usage_text: &str) -> Result<i64> {
    match rest {
        [id] => id
            .parse::<i64>()
            .map_err(|_| usage(usage_text)),
        _ => Err(usage(usage_text)),
    }
}

fn usage(text: &str) -> ChatFleetError {
    ChatFleetError::InvalidInput(format!("Usage: {}", text))
}

/// Interpret an entered value: booleans and integers are recognized,
/// everything else stays text.
fn parse_field_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(raw),
        },
    }
}

/// The help text shown by the shell
pub const HELP_TEXT: &str = "\
Fleet commands:
  chats                         list chats (filtered view)
  refresh                       re-fetch the chat directory
  filter <term> | filter clear  search by title, description or id
  stats <chat_id>               show per-chat statistics
  select <id...>|all|none|invert  manage the selection
Bulk actions:
  actions                       list available actions
  action <action_id>            pick an action to configure
  set <field> <value>           enter a field value
  scope selected|all|filtered   choose the target scope
  preview                       show the configured values
  execute [--yes]               run the action (--yes confirms)
  result                        show the last execution result
  reset                         return the workflow to the start
Agent:
  models [provider]             list available models
  sessions                      list agent sessions
  session new <provider> <model_id> [title]
  say <session_id> <message>    send a message
  history <session_id>          show session messages
  delete-session <session_id>
Other:
  help, quit";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(ConsoleCommand::parse("chats").unwrap(), ConsoleCommand::Chats);
        assert_eq!(ConsoleCommand::parse("reset").unwrap(), ConsoleCommand::Reset);
        assert_eq!(ConsoleCommand::parse("QUIT").unwrap(), ConsoleCommand::Quit);
    }

    #[test]
    fn test_parse_select_variants() {
        assert_eq!(
            ConsoleCommand::parse("select 1 2 3").unwrap(),
            ConsoleCommand::Select(SelectTarget::Ids(vec![1, 2, 3]))
        );
        assert_eq!(
            ConsoleCommand::parse("select all").unwrap(),
            ConsoleCommand::Select(SelectTarget::All)
        );
        assert_eq!(
            ConsoleCommand::parse("select invert").unwrap(),
            ConsoleCommand::Select(SelectTarget::Invert)
        );
        assert!(ConsoleCommand::parse("select abc").is_err());
    }

    #[test]
    fn test_parse_set_coerces_values() {
        assert_eq!(
            ConsoleCommand::parse("set is_active true").unwrap(),
            ConsoleCommand::Set {
                key: "is_active".to_string(),
                value: json!(true)
            }
        );
        assert_eq!(
            ConsoleCommand::parse("set auto_delete_delay 300").unwrap(),
            ConsoleCommand::Set {
                key: "auto_delete_delay".to_string(),
                value: json!(300)
            }
        );
        assert_eq!(
            ConsoleCommand::parse("set welcome_message Hello new members").unwrap(),
            ConsoleCommand::Set {
                key: "welcome_message".to_string(),
                value: json!("Hello new members")
            }
        );
    }

    #[test]
    fn test_parse_execute_confirmation_flag() {
        assert_eq!(
            ConsoleCommand::parse("execute").unwrap(),
            ConsoleCommand::Execute { confirmed: false }
        );
        assert_eq!(
            ConsoleCommand::parse("execute --yes").unwrap(),
            ConsoleCommand::Execute { confirmed: true }
        );
    }

    #[test]
    fn test_parse_agent_commands() {
        assert_eq!(
            ConsoleCommand::parse("session new openai gpt-4o-mini Fleet helper").unwrap(),
            ConsoleCommand::NewSession {
                provider: "openai".to_string(),
                model_id: "gpt-4o-mini".to_string(),
                title: Some("Fleet helper".to_string()),
            }
        );
        assert_eq!(
            ConsoleCommand::parse("say abc-123 how do I enable captcha?").unwrap(),
            ConsoleCommand::Say {
                session_id: "abc-123".to_string(),
                message: "how do I enable captcha?".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_and_empty_commands_rejected() {
        assert!(ConsoleCommand::parse("dance").is_err());
        assert!(ConsoleCommand::parse("   ").is_err());
    }
}

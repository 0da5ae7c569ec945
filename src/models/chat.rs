//! Chat models and backend wire schemas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of managed chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        }
    }
}

impl std::fmt::Display for ChatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat as presented to the operator.
///
/// Created server-side and fetched read-only; mutations go through the
/// update endpoints, which return the authoritative post-update record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub title: String,
    pub kind: ChatKind,
    pub member_count: Option<i64>,
    pub description: Option<String>,
    pub welcome_message: Option<String>,
    pub auto_delete_welcome_delay: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chat record as returned by the management backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: i64,
    pub title: Option<String>,
    #[serde(default)]
    pub is_forum: bool,
    pub welcome_message: Option<String>,
    #[serde(default = "default_welcome_delete_time")]
    pub welcome_delete_time: i64,
    #[serde(default)]
    pub is_welcome_enabled: bool,
    #[serde(default)]
    pub is_captcha_enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
}

fn default_welcome_delete_time() -> i64 {
    60
}

impl ChatRecord {
    /// Title with the backend's fallback for untitled chats
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Chat {}", self.id))
    }

    /// Convert the wire record into the operator-facing chat
    pub fn into_chat(self) -> Chat {
        let title = self.display_title();
        let kind = if self.is_forum {
            ChatKind::Supergroup
        } else {
            ChatKind::Group
        };
        let is_active = self.is_welcome_enabled || self.is_captcha_enabled;
        let now = Utc::now();

        Chat {
            id: self.id,
            title,
            kind,
            member_count: None,
            description: None,
            welcome_message: self.welcome_message,
            auto_delete_welcome_delay: Some(self.welcome_delete_time),
            is_active,
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.modified_at.unwrap_or(now),
        }
    }
}

/// Partial field update accepted by the backend's update endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatUpdateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub welcome_delete_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_welcome_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_captcha_enabled: Option<bool>,
}

impl ChatUpdateFields {
    pub fn is_empty(&self) -> bool {
        self.welcome_message.is_none()
            && self.welcome_delete_time.is_none()
            && self.is_welcome_enabled.is_none()
            && self.is_captcha_enabled.is_none()
    }
}

/// Bulk update request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUpdateRequest {
    pub chat_ids: Vec<i64>,
    pub update_data: ChatUpdateFields,
}

/// Per-chat usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatStatsRecord {
    pub chat_id: i64,
    pub member_count: i64,
    pub message_count_24h: i64,
    pub active_users_24h: i64,
    pub moderation_actions_24h: i64,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Operator filters over the chat directory
#[derive(Debug, Clone, Default)]
pub struct ChatFilters {
    pub search: String,
    pub kinds: Vec<ChatKind>,
    pub is_active: Option<bool>,
    pub member_count_min: Option<i64>,
    pub member_count_max: Option<i64>,
}

impl ChatFilters {
    /// Check whether a chat passes every active filter
    pub fn matches(&self, chat: &Chat) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let matches_title = chat.title.to_lowercase().contains(&needle);
            let matches_description = chat
                .description
                .as_ref()
                .map(|d| d.to_lowercase().contains(&needle))
                .unwrap_or(false);
            let matches_id = chat.id.to_string().contains(&needle);
            if !matches_title && !matches_description && !matches_id {
                return false;
            }
        }

        if !self.kinds.is_empty() && !self.kinds.contains(&chat.kind) {
            return false;
        }

        if let Some(active) = self.is_active {
            if chat.is_active != active {
                return false;
            }
        }

        if let Some(min) = self.member_count_min {
            if chat.member_count.unwrap_or(0) < min {
                return false;
            }
        }
        if let Some(max) = self.member_count_max {
            if chat.member_count.unwrap_or(0) > max {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_chat(id: i64, title: &str) -> Chat {
        Chat {
            id,
            title: title.to_string(),
            kind: ChatKind::Group,
            member_count: Some(42),
            description: Some("Community hub".to_string()),
            welcome_message: None,
            auto_delete_welcome_delay: Some(60),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_conversion_defaults() {
        let record = ChatRecord {
            id: 7,
            title: None,
            is_forum: true,
            welcome_message: Some("hello".to_string()),
            welcome_delete_time: 120,
            is_welcome_enabled: false,
            is_captcha_enabled: true,
            created_at: None,
            modified_at: None,
        };

        let chat = record.into_chat();
        assert_eq!(chat.title, "Chat 7");
        assert_eq!(chat.kind, ChatKind::Supergroup);
        assert!(chat.is_active);
        assert_eq!(chat.auto_delete_welcome_delay, Some(120));
    }

    #[test]
    fn test_record_deserialization_with_missing_flags() {
        let json = r#"{"id": 1, "title": "Main", "welcome_delete_time": 60}"#;
        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert!(!record.is_forum);
        assert!(!record.is_welcome_enabled);
        assert!(!record.is_captcha_enabled);
    }

    #[test]
    fn test_update_fields_serialization_skips_unset() {
        let fields = ChatUpdateFields {
            welcome_message: Some("hi".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"welcome_message":"hi"}"#);
    }

    #[test]
    fn test_search_filter_matches_title_description_and_id() {
        let chat = sample_chat(12345, "Design Guild");

        let mut filters = ChatFilters::default();
        filters.search = "guild".to_string();
        assert!(filters.matches(&chat));

        filters.search = "community".to_string();
        assert!(filters.matches(&chat));

        filters.search = "12345".to_string();
        assert!(filters.matches(&chat));

        filters.search = "nothing here".to_string();
        assert!(!filters.matches(&chat));
    }

    #[test]
    fn test_kind_and_activity_filters() {
        let chat = sample_chat(1, "General");

        let mut filters = ChatFilters::default();
        filters.kinds = vec![ChatKind::Channel];
        assert!(!filters.matches(&chat));

        filters.kinds = vec![ChatKind::Group, ChatKind::Channel];
        assert!(filters.matches(&chat));

        filters.is_active = Some(false);
        assert!(!filters.matches(&chat));
    }

    #[test]
    fn test_member_count_bounds() {
        let chat = sample_chat(1, "General");

        let mut filters = ChatFilters::default();
        filters.member_count_min = Some(100);
        assert!(!filters.matches(&chat));

        filters.member_count_min = Some(10);
        filters.member_count_max = Some(50);
        assert!(filters.matches(&chat));
    }
}

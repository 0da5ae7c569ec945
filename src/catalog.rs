//! Bulk action catalog
//!
//! This module defines the static registry of available bulk actions and
//! evaluates field values against the validation rules each action declares.
//! The catalog is pure constant data; lookups have no failure modes.

use serde_json::Value;

use crate::models::action::{
    ActionCategory, ActionDefinition, ActionField, FieldKind, FieldValidation, SelectOption,
};
use crate::utils::errors::{ChatFleetError, Result};

/// Registry of all bulk action definitions
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    actions: Vec<ActionDefinition>,
}

impl ActionCatalog {
    /// Create a catalog with the default action set
    pub fn new() -> Self {
        Self {
            actions: default_actions(),
        }
    }

    /// Get an action definition by identifier
    pub fn get(&self, id: &str) -> Option<&ActionDefinition> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// All definitions in registry order
    pub fn all(&self) -> &[ActionDefinition] {
        &self.actions
    }

    /// Definitions grouped by category, categories in declaration order
    pub fn by_category(&self) -> Vec<(ActionCategory, Vec<&ActionDefinition>)> {
        let mut groups: Vec<(ActionCategory, Vec<&ActionDefinition>)> = Vec::new();
        for action in &self.actions {
            match groups.iter_mut().find(|(c, _)| *c == action.category) {
                Some((_, list)) => list.push(action),
                None => groups.push((action.category, vec![action])),
            }
        }
        groups
    }

    /// Validate a single entered value against a field's rules
    pub fn validate_value(&self, field: &ActionField, value: &Value) -> Result<()> {
        match field.kind {
            FieldKind::Text | FieldKind::Textarea => {
                let text = value.as_str().ok_or_else(|| {
                    ChatFleetError::InvalidInput(format!("Field '{}' expects text", field.key))
                })?;
                if let Some(rules) = &field.validation {
                    validate_text_rules(&field.key, text, rules)?;
                }
            }
            FieldKind::Number => {
                let number = value.as_i64().ok_or_else(|| {
                    ChatFleetError::InvalidInput(format!("Field '{}' expects a number", field.key))
                })?;
                if let Some(rules) = &field.validation {
                    validate_number_rules(&field.key, number, rules)?;
                }
            }
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    return Err(ChatFleetError::InvalidInput(format!(
                        "Field '{}' expects true or false",
                        field.key
                    )));
                }
            }
            FieldKind::Select => {
                let choice = value.as_str().ok_or_else(|| {
                    ChatFleetError::InvalidInput(format!("Field '{}' expects a choice", field.key))
                })?;
                if !field.options.iter().any(|o| o.value == choice) {
                    let available: Vec<&str> =
                        field.options.iter().map(|o| o.value.as_str()).collect();
                    return Err(ChatFleetError::InvalidInput(format!(
                        "Invalid choice for '{}'. Available options: {}",
                        field.key,
                        available.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }

    /// Validate a full value map against an action definition.
    ///
    /// Required fields must be present and non-blank; every entered value
    /// must satisfy its field's rules. Bounds are checked here, before any
    /// network submission.
    pub fn validate_config(
        &self,
        definition: &ActionDefinition,
        values: &std::collections::BTreeMap<String, Value>,
    ) -> Result<()> {
        for field in &definition.fields {
            match values.get(&field.key) {
                Some(value) => {
                    if field.required && value.as_str().map(|s| s.trim().is_empty()).unwrap_or(false)
                    {
                        return Err(ChatFleetError::InvalidInput(format!(
                            "Field '{}' is required",
                            field.key
                        )));
                    }
                    self.validate_value(field, value)?;
                }
                None if field.required => {
                    return Err(ChatFleetError::InvalidInput(format!(
                        "Field '{}' is required",
                        field.key
                    )));
                }
                None => {}
            }
        }

        for key in values.keys() {
            if definition.field(key).is_none() {
                return Err(ChatFleetError::InvalidInput(format!(
                    "Unknown field '{}' for action '{}'",
                    key, definition.id
                )));
            }
        }

        Ok(())
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_text_rules(key: &str, text: &str, rules: &FieldValidation) -> Result<()> {
    let length = text.chars().count();

    if let Some(min) = rules.min_length {
        if length < min {
            return Err(ChatFleetError::InvalidInput(format!(
                "Field '{}' too short (minimum {} characters)",
                key, min
            )));
        }
    }

    if let Some(max) = rules.max_length {
        if length > max {
            return Err(ChatFleetError::InvalidInput(format!(
                "Field '{}' too long (maximum {} characters)",
                key, max
            )));
        }
    }

    if let Some(pattern) = &rules.pattern {
        let regex = regex::Regex::new(pattern)
            .map_err(|_| ChatFleetError::Config("Invalid regex pattern".to_string()))?;
        if !regex.is_match(text) {
            return Err(ChatFleetError::InvalidInput(format!(
                "Field '{}' has an invalid format",
                key
            )));
        }
    }

    Ok(())
}

fn validate_number_rules(key: &str, number: i64, rules: &FieldValidation) -> Result<()> {
    if let Some(min) = rules.min {
        if number < min {
            return Err(ChatFleetError::InvalidInput(format!(
                "Field '{}' below minimum ({})",
                key, min
            )));
        }
    }

    if let Some(max) = rules.max {
        if number > max {
            return Err(ChatFleetError::InvalidInput(format!(
                "Field '{}' above maximum ({})",
                key, max
            )));
        }
    }

    Ok(())
}

fn text_field(
    key: &str,
    label: &str,
    required: bool,
    placeholder: &str,
    max_length: usize,
) -> ActionField {
    ActionField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Textarea,
        required,
        placeholder: Some(placeholder.to_string()),
        options: Vec::new(),
        validation: Some(FieldValidation {
            max_length: Some(max_length),
            ..Default::default()
        }),
    }
}

fn number_field(key: &str, label: &str, placeholder: &str, min: i64, max: i64) -> ActionField {
    ActionField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Number,
        required: false,
        placeholder: Some(placeholder.to_string()),
        options: Vec::new(),
        validation: Some(FieldValidation {
            min: Some(min),
            max: Some(max),
            ..Default::default()
        }),
    }
}

fn boolean_field(key: &str, label: &str) -> ActionField {
    ActionField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Boolean,
        required: false,
        placeholder: None,
        options: Vec::new(),
        validation: None,
    }
}

fn select_field(key: &str, label: &str, required: bool, options: &[(&str, &str)]) -> ActionField {
    ActionField {
        key: key.to_string(),
        label: label.to_string(),
        kind: FieldKind::Select,
        required,
        placeholder: None,
        options: options
            .iter()
            .map(|(value, label)| SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            })
            .collect(),
        validation: None,
    }
}

/// The default action set
fn default_actions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition {
            id: "update_description".to_string(),
            name: "Update description".to_string(),
            icon: "📝".to_string(),
            description: "Bulk update of chat descriptions".to_string(),
            category: ActionCategory::Content,
            fields: vec![text_field(
                "description",
                "New description",
                true,
                "Enter the new description for the selected chats...",
                500,
            )],
        },
        ActionDefinition {
            id: "update_welcome".to_string(),
            name: "Configure welcome".to_string(),
            icon: "👋".to_string(),
            description: "Change the welcome message".to_string(),
            category: ActionCategory::Content,
            fields: vec![
                text_field(
                    "welcome_message",
                    "Welcome text",
                    true,
                    "Welcome to our chat!",
                    1000,
                ),
                number_field(
                    "auto_delete_delay",
                    "Auto-delete after (seconds)",
                    "300",
                    10,
                    3600,
                ),
            ],
        },
        ActionDefinition {
            id: "broadcast_message".to_string(),
            name: "Broadcast message".to_string(),
            icon: "📢".to_string(),
            description: "Send a message to many chats at once".to_string(),
            category: ActionCategory::Communication,
            fields: vec![
                text_field(
                    "message",
                    "Message text",
                    true,
                    "An important announcement for all members...",
                    2000,
                ),
                boolean_field("pin_message", "Pin the message"),
            ],
        },
        ActionDefinition {
            id: "chat_settings".to_string(),
            name: "Chat settings".to_string(),
            icon: "⚙️".to_string(),
            description: "Change basic chat settings".to_string(),
            category: ActionCategory::Settings,
            fields: vec![
                boolean_field("is_active", "Activate chat"),
                select_field(
                    "moderation_level",
                    "Moderation level",
                    false,
                    &[("low", "Low"), ("medium", "Medium"), ("high", "High")],
                ),
            ],
        },
        ActionDefinition {
            id: "user_management".to_string(),
            name: "User management".to_string(),
            icon: "👥".to_string(),
            description: "Bulk operations on chat members".to_string(),
            category: ActionCategory::Moderation,
            fields: vec![
                select_field(
                    "action_type",
                    "Action kind",
                    true,
                    &[
                        ("kick_inactive", "Kick inactive members"),
                        ("mute_all", "Mute everyone"),
                        ("promote_admins", "Promote admins"),
                    ],
                ),
                number_field("duration", "Duration (minutes)", "60", 1, 10080),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_catalog_lookup() {
        let catalog = ActionCatalog::new();

        assert!(catalog.get("update_welcome").is_some());
        assert!(catalog.get("broadcast_message").is_some());
        assert!(catalog.get("user_management").is_some());
        assert!(catalog.get("nonexistent").is_none());
        assert_eq!(catalog.all().len(), 5);
    }

    #[test]
    fn test_category_grouping_keeps_registry_order() {
        let catalog = ActionCatalog::new();
        let groups = catalog.by_category();

        let categories: Vec<ActionCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(
            categories,
            vec![
                ActionCategory::Content,
                ActionCategory::Communication,
                ActionCategory::Settings,
                ActionCategory::Moderation,
            ]
        );

        let content = &groups[0].1;
        assert_eq!(content.len(), 2);
        assert_eq!(content[0].id, "update_description");
    }

    #[test]
    fn test_only_moderation_actions_exist_in_moderation_category() {
        let catalog = ActionCatalog::new();
        for action in catalog.all() {
            let is_moderation = action.category == ActionCategory::Moderation;
            assert_eq!(is_moderation, action.id == "user_management");
        }
    }

    #[test]
    fn test_numeric_bounds_enforced() {
        let catalog = ActionCatalog::new();
        let definition = catalog.get("update_welcome").unwrap();
        let field = definition.field("auto_delete_delay").unwrap();

        assert!(catalog.validate_value(field, &json!(300)).is_ok());
        assert!(catalog.validate_value(field, &json!(5)).is_err());
        assert!(catalog.validate_value(field, &json!(7200)).is_err());
        assert!(catalog.validate_value(field, &json!("300")).is_err());
    }

    #[test]
    fn test_text_length_enforced() {
        let catalog = ActionCatalog::new();
        let definition = catalog.get("update_description").unwrap();
        let field = definition.field("description").unwrap();

        assert!(catalog.validate_value(field, &json!("A new purpose")).is_ok());
        let too_long = "x".repeat(501);
        assert!(catalog.validate_value(field, &json!(too_long)).is_err());
    }

    #[test]
    fn test_select_membership_enforced() {
        let catalog = ActionCatalog::new();
        let definition = catalog.get("chat_settings").unwrap();
        let field = definition.field("moderation_level").unwrap();

        assert!(catalog.validate_value(field, &json!("medium")).is_ok());
        assert!(catalog.validate_value(field, &json!("extreme")).is_err());
    }

    #[test]
    fn test_required_fields_enforced() {
        let catalog = ActionCatalog::new();
        let definition = catalog.get("update_welcome").unwrap();

        let empty = BTreeMap::new();
        assert!(catalog.validate_config(definition, &empty).is_err());

        let mut blank = BTreeMap::new();
        blank.insert("welcome_message".to_string(), json!("   "));
        assert!(catalog.validate_config(definition, &blank).is_err());

        let mut valid = BTreeMap::new();
        valid.insert("welcome_message".to_string(), json!("Hello!"));
        assert!(catalog.validate_config(definition, &valid).is_ok());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let catalog = ActionCatalog::new();
        let definition = catalog.get("update_welcome").unwrap();

        let mut values = BTreeMap::new();
        values.insert("welcome_message".to_string(), json!("Hello!"));
        values.insert("surprise".to_string(), json!(1));
        assert!(catalog.validate_config(definition, &values).is_err());
    }
}

//! Bulk action model
//!
//! Data structures describing catalog-defined bulk actions, their input
//! fields and validation rules, and the operator-built configuration that
//! binds an action to entered values and a target scope.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Category of a bulk action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionCategory {
    Content,
    Settings,
    Moderation,
    Communication,
}

impl ActionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCategory::Content => "content",
            ActionCategory::Settings => "settings",
            ActionCategory::Moderation => "moderation",
            ActionCategory::Communication => "communication",
        }
    }

    /// Human-readable category title
    pub fn title(&self) -> &'static str {
        match self {
            ActionCategory::Content => "Content",
            ActionCategory::Settings => "Settings",
            ActionCategory::Moderation => "Moderation",
            ActionCategory::Communication => "Communication",
        }
    }
}

impl std::fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of input a field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Select,
}

/// One choice of a select field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Validation bounds for a field value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldValidation {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub pattern: Option<String>,
}

/// One input field of an action definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionField {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
    pub validation: Option<FieldValidation>,
}

/// A catalog entry describing one kind of bulk action.
///
/// Definitions are static and immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub category: ActionCategory,
    pub fields: Vec<ActionField>,
}

impl ActionDefinition {
    pub fn field(&self, key: &str) -> Option<&ActionField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Scope a configured action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyTo {
    Selected,
    All,
    Filtered,
}

impl Default for ApplyTo {
    fn default() -> Self {
        ApplyTo::Selected
    }
}

/// An executable bulk-action configuration.
///
/// Created fresh each time the operator picks an action, discarded on reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionConfig {
    pub action_id: String,
    pub values: BTreeMap<String, serde_json::Value>,
    pub apply_to: ApplyTo,
    pub confirmation_required: bool,
}

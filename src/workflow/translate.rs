//! Field translation table
//!
//! Central mapping from operator-facing configuration keys to the backend's
//! update fields. Keys the backend cannot express are declared here and
//! dropped with a warning; a key absent from the table is a hard error.
//! `verify_catalog_coverage` keeps the table and the action catalog from
//! drifting apart.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::catalog::ActionCatalog;
use crate::models::chat::ChatUpdateFields;
use crate::utils::errors::{ChatFleetError, Result};

/// How one operator-facing key maps onto the backend update payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldMapping {
    /// Copied into `welcome_message`
    WelcomeMessage,
    /// Copied into `welcome_delete_time`
    WelcomeDeleteTime,
    /// Copied into `is_welcome_enabled`
    WelcomeEnabled,
    /// Copied into `is_captcha_enabled`
    CaptchaEnabled,
    /// `medium`/`high` enable the captcha, anything else disables it
    CaptchaFromModerationLevel,
    /// Known key the backend cannot express; dropped with a warning
    Unsupported,
}

const FIELD_MAPPINGS: &[(&str, FieldMapping)] = &[
    ("welcome_message", FieldMapping::WelcomeMessage),
    ("auto_delete_delay", FieldMapping::WelcomeDeleteTime),
    ("is_active", FieldMapping::WelcomeEnabled),
    ("moderation_level", FieldMapping::CaptchaFromModerationLevel),
    ("is_welcome_enabled", FieldMapping::WelcomeEnabled),
    ("is_captcha_enabled", FieldMapping::CaptchaEnabled),
    ("description", FieldMapping::Unsupported),
    ("message", FieldMapping::Unsupported),
    ("pin_message", FieldMapping::Unsupported),
    ("action_type", FieldMapping::Unsupported),
    ("duration", FieldMapping::Unsupported),
];

fn lookup(key: &str) -> Option<FieldMapping> {
    FIELD_MAPPINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, m)| *m)
}

/// Translate an operator value map into the backend update payload
pub fn translate_values(values: &BTreeMap<String, Value>) -> Result<ChatUpdateFields> {
    let mut fields = ChatUpdateFields::default();

    for (key, value) in values {
        match lookup(key) {
            Some(FieldMapping::WelcomeMessage) => {
                fields.welcome_message = Some(expect_string(key, value)?);
            }
            Some(FieldMapping::WelcomeDeleteTime) => {
                fields.welcome_delete_time = Some(expect_integer(key, value)?);
            }
            Some(FieldMapping::WelcomeEnabled) => {
                fields.is_welcome_enabled = Some(expect_boolean(key, value)?);
            }
            Some(FieldMapping::CaptchaEnabled) => {
                fields.is_captcha_enabled = Some(expect_boolean(key, value)?);
            }
            Some(FieldMapping::CaptchaFromModerationLevel) => {
                let level = expect_string(key, value)?;
                fields.is_captcha_enabled = Some(level == "medium" || level == "high");
            }
            Some(FieldMapping::Unsupported) => {
                warn!(key = %key, "Field is not supported by the backend and was dropped");
            }
            None => {
                return Err(ChatFleetError::UnmappedField { key: key.clone() });
            }
        }
    }

    Ok(fields)
}

/// Ensure every field key in the catalog is declared in the table.
///
/// Run once at startup so an undeclared key fails loudly before any
/// configuration can be built around it.
pub fn verify_catalog_coverage(catalog: &ActionCatalog) -> Result<()> {
    for action in catalog.all() {
        for field in &action.fields {
            if lookup(&field.key).is_none() {
                return Err(ChatFleetError::Config(format!(
                    "Catalog field '{}' of action '{}' has no translation entry",
                    field.key, action.id
                )));
            }
        }
    }

    Ok(())
}

fn expect_string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ChatFleetError::InvalidInput(format!("Field '{}' expects text", key)))
}

fn expect_integer(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| ChatFleetError::InvalidInput(format!("Field '{}' expects a number", key)))
}

fn expect_boolean(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ChatFleetError::InvalidInput(format!("Field '{}' expects true or false", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn values(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_welcome_fields_mapped() {
        let fields = translate_values(&values(&[
            ("welcome_message", json!("Hello!")),
            ("auto_delete_delay", json!(300)),
        ]))
        .unwrap();

        assert_eq!(fields.welcome_message.as_deref(), Some("Hello!"));
        assert_eq!(fields.welcome_delete_time, Some(300));
        assert!(fields.is_welcome_enabled.is_none());
    }

    #[test]
    fn test_is_active_maps_to_welcome_enabled() {
        let fields = translate_values(&values(&[("is_active", json!(true))])).unwrap();
        assert_eq!(fields.is_welcome_enabled, Some(true));
    }

    #[test]
    fn test_moderation_level_maps_to_captcha() {
        for (level, expected) in [("low", false), ("medium", true), ("high", true)] {
            let fields =
                translate_values(&values(&[("moderation_level", json!(level))])).unwrap();
            assert_eq!(fields.is_captcha_enabled, Some(expected), "level {}", level);
        }
    }

    #[test]
    fn test_direct_passthrough_fields() {
        let fields = translate_values(&values(&[
            ("is_welcome_enabled", json!(false)),
            ("is_captcha_enabled", json!(true)),
        ]))
        .unwrap();

        assert_eq!(fields.is_welcome_enabled, Some(false));
        assert_eq!(fields.is_captcha_enabled, Some(true));
    }

    #[test]
    fn test_declared_unsupported_fields_dropped() {
        let fields = translate_values(&values(&[
            ("description", json!("A new purpose")),
            ("welcome_message", json!("Hi")),
        ]))
        .unwrap();

        assert_eq!(fields.welcome_message.as_deref(), Some("Hi"));
        assert!(fields.welcome_delete_time.is_none());
        assert!(fields.is_welcome_enabled.is_none());
        assert!(fields.is_captcha_enabled.is_none());
    }

    #[test]
    fn test_undeclared_key_is_an_error() {
        let result = translate_values(&values(&[("mystery_field", json!(1))]));
        assert_matches!(result, Err(ChatFleetError::UnmappedField { .. }));
    }

    #[test]
    fn test_wrong_value_type_rejected() {
        let result = translate_values(&values(&[("auto_delete_delay", json!("soon"))]));
        assert_matches!(result, Err(ChatFleetError::InvalidInput(_)));
    }

    #[test]
    fn test_default_catalog_is_fully_covered() {
        let catalog = ActionCatalog::new();
        assert!(verify_catalog_coverage(&catalog).is_ok());
    }
}

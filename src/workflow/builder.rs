//! Action configuration builder
//!
//! Binds a chosen action definition to operator-entered field values and a
//! target scope, producing an executable configuration. Values are stored
//! as entered; rule evaluation happens against the catalog when the
//! workflow validates before execution.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::ActionCatalog;
use crate::models::action::{ActionCategory, ActionConfig, ActionDefinition, ApplyTo};
use crate::utils::errors::{ChatFleetError, Result};

type ChangeListener = Box<dyn Fn() + Send>;

/// Builder for the operator's current action configuration
#[derive(Default)]
pub struct ActionConfigBuilder {
    active: Option<ActionDefinition>,
    values: BTreeMap<String, Value>,
    apply_to: ApplyTo,
    listener: Option<ChangeListener>,
}

impl std::fmt::Debug for ActionConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionConfigBuilder")
            .field("active", &self.active.as_ref().map(|a| a.id.as_str()))
            .field("values", &self.values)
            .field("apply_to", &self.apply_to)
            .finish()
    }
}

impl ActionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked after every mutation, so the enclosing
    /// shell can re-evaluate whether the execute control is enabled.
    pub fn on_change(&mut self, listener: impl Fn() + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Set the active action, discarding all previously entered values
    pub fn select_action(&mut self, definition: ActionDefinition) {
        self.values.clear();
        self.active = Some(definition);
        self.notify();
    }

    /// Clear the active action and its values
    pub fn clear_action(&mut self) {
        self.active = None;
        self.values.clear();
        self.notify();
    }

    /// Store a field value.
    ///
    /// The key must belong to the active definition; the value itself is
    /// stored as entered.
    pub fn set_field_value(&mut self, key: &str, value: Value) -> Result<()> {
        let definition = self.active.as_ref().ok_or_else(|| {
            ChatFleetError::InvalidInput("No action selected".to_string())
        })?;

        if definition.field(key).is_none() {
            return Err(ChatFleetError::InvalidInput(format!(
                "Unknown field '{}' for action '{}'",
                key, definition.id
            )));
        }

        self.values.insert(key.to_string(), value);
        self.notify();
        Ok(())
    }

    /// Remove a previously entered value
    pub fn clear_field_value(&mut self, key: &str) {
        self.values.remove(key);
        self.notify();
    }

    pub fn set_apply_to(&mut self, apply_to: ApplyTo) {
        self.apply_to = apply_to;
        self.notify();
    }

    pub fn active(&self) -> Option<&ActionDefinition> {
        self.active.as_ref()
    }

    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// The executable configuration, if an action is active.
    ///
    /// Confirmation is required exactly when the action's category is
    /// moderation.
    pub fn current_configuration(&self) -> Option<ActionConfig> {
        self.active.as_ref().map(|definition| ActionConfig {
            action_id: definition.id.clone(),
            values: self.values.clone(),
            apply_to: self.apply_to,
            confirmation_required: definition.category == ActionCategory::Moderation,
        })
    }

    /// Validate entered values against the catalog's rules
    pub fn validate(&self, catalog: &ActionCatalog) -> Result<()> {
        let definition = self.active.as_ref().ok_or_else(|| {
            ChatFleetError::InvalidInput("No action selected".to_string())
        })?;

        catalog.validate_config(definition, &self.values)
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.active = None;
        self.values.clear();
        self.apply_to = ApplyTo::default();
        self.notify();
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }
}

//! Bulk-action workflow
//!
//! This module wires the chat directory, selection set, configuration
//! builder, execution coordinator and result presenter into the single
//! operator-driven workflow:
//!
//! `Idle -> Configuring -> Executing -> Completed -> Idle (reset)`
//!
//! Transitions happen only on operator actions and the resolution of the
//! one in-flight execute request; there is no retry or cancel state.

pub mod builder;
pub mod coordinator;
pub mod directory;
pub mod presenter;
pub mod selection;
pub mod translate;

pub use builder::ActionConfigBuilder;
pub use coordinator::ExecutionCoordinator;
pub use directory::ChatDirectory;
pub use selection::SelectionSet;

use chrono::Duration;
use serde_json::Value;
use tracing::warn;

use crate::catalog::ActionCatalog;
use crate::models::action::{ActionConfig, ApplyTo};
use crate::models::chat::{Chat, ChatFilters};
use crate::models::result::ExecutionResult;
use crate::services::BackendService;
use crate::utils::errors::{ChatFleetError, Result};
use crate::utils::logging::log_directory_refresh;

/// Phase of the bulk-action workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Configuring,
    Executing,
    Completed,
}

impl WorkflowPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowPhase::Idle => "idle",
            WorkflowPhase::Configuring => "configuring",
            WorkflowPhase::Executing => "executing",
            WorkflowPhase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operator's bulk-action workflow state
#[derive(Debug)]
pub struct Workflow {
    catalog: ActionCatalog,
    backend: BackendService,
    coordinator: ExecutionCoordinator,
    directory: ChatDirectory,
    selection: SelectionSet,
    builder: ActionConfigBuilder,
    filters: ChatFilters,
    result: Option<ExecutionResult>,
    phase: WorkflowPhase,
    cache_ttl: Duration,
}

impl Workflow {
    pub fn new(backend: BackendService, catalog: ActionCatalog, cache_ttl_seconds: u64) -> Self {
        let coordinator = ExecutionCoordinator::new(backend.clone());
        Self {
            catalog,
            backend,
            coordinator,
            directory: ChatDirectory::new(),
            selection: SelectionSet::new(),
            builder: ActionConfigBuilder::new(),
            filters: ChatFilters::default(),
            result: None,
            phase: WorkflowPhase::Idle,
            cache_ttl: Duration::seconds(cache_ttl_seconds as i64),
        }
    }

    /// Refresh the chat directory, pruning selected ids that disappeared.
    pub async fn refresh_directory(&mut self) -> Result<()> {
        self.directory.refresh(&self.backend).await?;

        let directory = &self.directory;
        let dropped = self
            .selection
            .retain_with_report(|id| directory.contains(id));
        for id in &dropped {
            warn!(chat_id = id, "Selected chat disappeared from the directory; dropped");
        }
        log_directory_refresh(self.directory.len(), dropped.len());

        Ok(())
    }

    /// Refresh only when the snapshot is older than the cache TTL
    pub async fn refresh_directory_if_stale(&mut self) -> Result<bool> {
        if self.directory.is_stale(self.cache_ttl) {
            self.refresh_directory().await?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn directory(&self) -> &ChatDirectory {
        &self.directory
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn builder_mut(&mut self) -> &mut ActionConfigBuilder {
        &mut self.builder
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub fn filters(&self) -> &ChatFilters {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: ChatFilters) {
        self.filters = filters;
    }

    /// Chats passing the current filters
    pub fn filtered_chats(&self) -> Vec<&Chat> {
        self.directory.filter(&self.filters)
    }

    /// Toggle a chat in the selection; the chat must exist in the directory.
    pub fn toggle_chat(&mut self, chat_id: i64) -> Result<bool> {
        if !self.directory.contains(chat_id) {
            return Err(ChatFleetError::ChatNotFound { chat_id });
        }
        Ok(self.selection.toggle(chat_id))
    }

    /// Select every chat passing the current filters
    pub fn select_filtered(&mut self) {
        let ids = self.directory.filtered_ids(&self.filters);
        self.selection.select_all(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Invert the selection over the currently filtered chats
    pub fn invert_selection(&mut self) {
        let ids = self.directory.filtered_ids(&self.filters);
        self.selection.invert(&ids);
    }

    /// Pick an action from the catalog and enter the configuring phase
    pub fn choose_action(&mut self, action_id: &str) -> Result<()> {
        match self.phase {
            WorkflowPhase::Idle | WorkflowPhase::Configuring => {}
            other => {
                return Err(ChatFleetError::InvalidStateTransition {
                    from: other.to_string(),
                    to: WorkflowPhase::Configuring.to_string(),
                });
            }
        }

        let definition = self
            .catalog
            .get(action_id)
            .cloned()
            .ok_or_else(|| ChatFleetError::UnknownAction {
                action_id: action_id.to_string(),
            })?;

        self.builder.select_action(definition);
        self.phase = WorkflowPhase::Configuring;
        Ok(())
    }

    /// Store a field value on the active configuration
    pub fn set_field(&mut self, key: &str, value: Value) -> Result<()> {
        self.builder.set_field_value(key, value)
    }

    /// Choose the scope the action applies to
    pub fn set_scope(&mut self, apply_to: ApplyTo) {
        self.builder.set_apply_to(apply_to);
    }

    /// The current configuration, if an action is active
    pub fn configuration(&self) -> Option<ActionConfig> {
        self.builder.current_configuration()
    }

    /// Whether the execute control should be enabled
    pub fn can_execute(&self) -> bool {
        self.configuration().is_some() && !self.selection.is_empty()
    }

    /// Whether executing the current configuration needs confirmation
    pub fn requires_confirmation(&self) -> bool {
        self.configuration()
            .map(|c| c.confirmation_required)
            .unwrap_or(false)
    }

    /// Resolve the target ids for a configuration's scope
    fn resolve_targets(&self, config: &ActionConfig) -> Vec<i64> {
        match config.apply_to {
            ApplyTo::Selected => self.selection.ids(),
            ApplyTo::All => self.directory.all_ids(),
            ApplyTo::Filtered => self.directory.filtered_ids(&self.filters),
        }
    }

    /// Execute the configured action.
    ///
    /// The shell must pass `confirmed = true` for actions that require
    /// operator confirmation. Only one execution can be in flight; the
    /// workflow moves to `Completed` once the request resolves.
    pub async fn execute(&mut self, confirmed: bool) -> Result<ExecutionResult> {
        match self.phase {
            WorkflowPhase::Configuring => {}
            WorkflowPhase::Executing => return Err(ChatFleetError::ExecutionInFlight),
            other => {
                return Err(ChatFleetError::InvalidStateTransition {
                    from: other.to_string(),
                    to: WorkflowPhase::Executing.to_string(),
                });
            }
        }

        let config = self.configuration().ok_or_else(|| {
            ChatFleetError::InvalidInput("No action configured".to_string())
        })?;

        if self.selection.is_empty() {
            return Err(ChatFleetError::InvalidInput(
                "No chats selected".to_string(),
            ));
        }

        self.builder.validate(&self.catalog)?;

        if config.confirmation_required && !confirmed {
            return Err(ChatFleetError::ConfirmationRequired);
        }

        let targets = self.resolve_targets(&config);
        if targets.is_empty() {
            return Err(ChatFleetError::InvalidInput(
                "The chosen scope contains no chats".to_string(),
            ));
        }

        self.phase = WorkflowPhase::Executing;
        match self.coordinator.execute(&targets, &config).await {
            Ok(result) => {
                self.result = Some(result.clone());
                self.phase = WorkflowPhase::Completed;
                Ok(result)
            }
            Err(e) => {
                self.phase = WorkflowPhase::Configuring;
                Err(e)
            }
        }
    }

    /// The last execution result, if any
    pub fn last_result(&self) -> Option<&ExecutionResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> WorkflowPhase {
        self.phase
    }

    /// Clear selection, configuration and result, returning to `Idle`.
    ///
    /// Local state only; already-applied server-side changes are not
    /// undone.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.builder.reset();
        self.result = None;
        self.phase = WorkflowPhase::Idle;
    }
}

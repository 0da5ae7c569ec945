//! ChatFleet operator console
//!
//! Main application entry point

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use ChatFleet::{
    catalog::ActionCatalog,
    config::Settings,
    console::{ConsoleCommand, SelectTarget, HELP_TEXT},
    models::agent::{ChatMessageRequest, CreateSessionRequest, ModelConfig, ModelProvider},
    models::chat::ChatFilters,
    services::ServiceFactory,
    utils::helpers::{format_member_count, format_timestamp, truncate_text},
    utils::logging,
    workflow::{presenter, Workflow},
    ChatFleetError,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        eprintln!("Falling back to default settings: {}", e);
        Settings::default()
    });
    settings.validate()?;

    // Initialize logging; the guard must outlive the console loop
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting ChatFleet console...");

    // Initialize services
    let services = ServiceFactory::new(settings.clone())?;

    // The catalog and the translation table must agree before any
    // configuration can be built
    let catalog = ActionCatalog::new();
    ChatFleet::workflow::translate::verify_catalog_coverage(&catalog)?;

    let health = services.health_check().await;
    if health.is_healthy() {
        info!("Backend is reachable");
    } else {
        for issue in health.get_issues() {
            warn!(issue = %issue, "Service issue detected");
        }
        println!("Warning: the backend is not reachable; commands may fail.");
    }

    let mut workflow = Workflow::new(services.backend.clone(), catalog, settings.cache.ttl_seconds);

    println!("{} — type 'help' for commands", ChatFleet::info());

    if let Err(e) = workflow.refresh_directory().await {
        error!(error = %e, "Initial chat directory fetch failed");
        println!("Could not load the chat directory: {}", e);
    } else {
        println!("Loaded {} chats.", workflow.directory().len());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("fleet> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match ConsoleCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == ConsoleCommand::Quit {
            break;
        }

        if let Err(e) = dispatch(command, &mut workflow, &services, &settings).await {
            error!(error = %e, "Command failed");
            println!("Error: {}", e);
        }
    }

    info!("ChatFleet console has been shut down.");
    Ok(())
}

/// Dispatch one parsed command against the workflow and services
async fn dispatch(
    command: ConsoleCommand,
    workflow: &mut Workflow,
    services: &ServiceFactory,
    settings: &Settings,
) -> ChatFleet::Result<()> {
    match command {
        ConsoleCommand::Help => println!("{}", HELP_TEXT),

        ConsoleCommand::Chats => {
            workflow.refresh_directory_if_stale().await?;
            print_chats(workflow);
        }

        ConsoleCommand::Refresh => {
            workflow.refresh_directory().await?;
            println!("Loaded {} chats.", workflow.directory().len());
        }

        ConsoleCommand::Filter(term) => {
            let filters = ChatFilters {
                search: term,
                ..Default::default()
            };
            workflow.set_filters(filters);
            print_chats(workflow);
        }

        ConsoleCommand::ClearFilter => {
            workflow.set_filters(ChatFilters::default());
            print_chats(workflow);
        }

        ConsoleCommand::Stats(chat_id) => {
            if !services.chat_stats_enabled() {
                println!("Chat statistics are disabled.");
                return Ok(());
            }
            let stats = services.backend.chat_stats(chat_id).await?;
            println!(
                "Chat {}: {} members, {} messages / 24h, {} active users / 24h, {} moderation actions / 24h",
                stats.chat_id,
                stats.member_count,
                stats.message_count_24h,
                stats.active_users_24h,
                stats.moderation_actions_24h
            );
            if let Some(last_activity) = stats.last_activity {
                println!("Last activity: {}", format_timestamp(last_activity));
            }
        }

        ConsoleCommand::Select(target) => {
            match target {
                SelectTarget::Ids(ids) => {
                    for id in ids {
                        match workflow.toggle_chat(id) {
                            Ok(true) => println!("Selected {}", id),
                            Ok(false) => println!("Deselected {}", id),
                            Err(e) => println!("{}", e),
                        }
                    }
                }
                SelectTarget::All => workflow.select_filtered(),
                SelectTarget::None => workflow.clear_selection(),
                SelectTarget::Invert => workflow.invert_selection(),
            }
            println!("Selected: {}", workflow.selection().len());
        }

        ConsoleCommand::Actions => {
            for (category, actions) in workflow.catalog().by_category() {
                println!("{}:", category.title());
                for action in actions {
                    println!("  {} {} — {}", action.icon, action.id, action.description);
                }
            }
        }

        ConsoleCommand::Action(action_id) => {
            workflow.choose_action(&action_id)?;
            if let Some(definition) = workflow.catalog().get(&action_id) {
                println!("{} {}", definition.icon, definition.name);
                for field in &definition.fields {
                    let required = if field.required { " (required)" } else { "" };
                    println!("  set {} <value>{} — {}", field.key, required, field.label);
                }
            }
        }

        ConsoleCommand::Set { key, value } => {
            workflow.set_field(&key, value)?;
            println!("Set {}.", key);
        }

        ConsoleCommand::Scope(apply_to) => {
            workflow.set_scope(apply_to);
            println!("Scope updated.");
        }

        ConsoleCommand::Preview => match workflow.configuration() {
            Some(config) => {
                println!(
                    "{} {}",
                    presenter::action_icon(&config.action_id),
                    presenter::action_summary(&config, workflow.selection().len())
                );
                println!("{}", presenter::render_config_preview(&config));
                if config.confirmation_required {
                    println!("This action requires confirmation (execute --yes).");
                }
            }
            None => println!("No action configured."),
        },

        ConsoleCommand::Execute { confirmed } => {
            if !workflow.can_execute() {
                println!("Select chats and configure an action first.");
                return Ok(());
            }
            match workflow.execute(confirmed).await {
                Ok(result) => println!("{}", presenter::render_result(&result)),
                Err(ChatFleetError::ConfirmationRequired) => {
                    if let Some(config) = workflow.configuration() {
                        println!(
                            "⚠️  {}",
                            presenter::action_summary(&config, workflow.selection().len())
                        );
                        println!("{}", presenter::render_config_preview(&config));
                    }
                    println!("This moderation action may be irreversible. Re-run with 'execute --yes' to confirm.");
                }
                Err(e) => return Err(e),
            }
        }

        ConsoleCommand::ShowResult => match workflow.last_result() {
            Some(result) => println!("{}", presenter::render_result(result)),
            None => println!("No execution result yet."),
        },

        ConsoleCommand::Reset => {
            workflow.reset();
            println!("Workflow reset.");
        }

        ConsoleCommand::Models(provider) => {
            require_agent(services)?;
            let provider: ModelProvider = provider
                .as_deref()
                .unwrap_or(&settings.agent.default_provider)
                .parse()?;
            let models = services.agent.list_models(provider).await?;
            for model in models {
                let context = model
                    .context_length
                    .map(|c| format!(" ({}k context)", c / 1000))
                    .unwrap_or_default();
                println!("  {} — {}{}", model.id, model.name, context);
            }
        }

        ConsoleCommand::Sessions => {
            require_agent(services)?;
            let list = services.agent.list_sessions(20).await?;
            println!("{} sessions:", list.total);
            for session in list.sessions {
                println!(
                    "  {} — {} ({} messages, {})",
                    session.id,
                    session.title.as_deref().unwrap_or("untitled"),
                    session.message_count,
                    session.agent_config.model_id
                );
            }
        }

        ConsoleCommand::NewSession {
            provider,
            model_id,
            title,
        } => {
            require_agent(services)?;
            let request = CreateSessionRequest {
                agent_config: ModelConfig::new(provider.parse()?, model_id),
                title,
            };
            let session = services.agent.create_session(request).await?;
            println!("Created session {}.", session.id);
        }

        ConsoleCommand::Say {
            session_id,
            message,
        } => {
            require_agent(services)?;
            let reply = services
                .agent
                .send_message(&session_id, ChatMessageRequest { message })
                .await?;
            println!("[{}] {}", reply.model_used, reply.message);
        }

        ConsoleCommand::History(session_id) => {
            require_agent(services)?;
            let messages = services.agent.session_messages(&session_id).await?;
            for message in messages {
                println!(
                    "{} {}: {}",
                    format_timestamp(message.timestamp),
                    message.role,
                    message.content
                );
            }
        }

        ConsoleCommand::DeleteSession(session_id) => {
            require_agent(services)?;
            services.agent.delete_session(&session_id).await?;
            println!("Deleted session {}.", session_id);
        }

        ConsoleCommand::Quit => {}
    }

    Ok(())
}

fn require_agent(services: &ServiceFactory) -> ChatFleet::Result<()> {
    if services.agent_chat_enabled() {
        Ok(())
    } else {
        Err(ChatFleetError::ServiceUnavailable(
            "Agent chat is disabled in the configuration".to_string(),
        ))
    }
}

/// Print the filtered chat list with selection markers
fn print_chats(workflow: &Workflow) {
    let filtered = workflow.filtered_chats();
    if filtered.is_empty() {
        println!("No chats found. Try changing the filter.");
    }
    for chat in &filtered {
        let marker = if workflow.selection().contains(chat.id) {
            "[x]"
        } else {
            "[ ]"
        };
        let status = if chat.is_active { "🟢" } else { "🔴" };
        let mut line = format!(
            "{} {} {} {} ({}, {} members, id {})",
            marker,
            status,
            chat.title,
            chat.kind,
            if chat.is_active { "active" } else { "inactive" },
            format_member_count(chat.member_count),
            chat.id
        );
        if let Some(welcome) = &chat.welcome_message {
            line.push_str(&format!(" — 👋 {}", truncate_text(welcome, 50)));
        }
        println!("{}", line);
    }
    println!(
        "Shown: {} of {}  Selected: {}",
        filtered.len(),
        workflow.directory().len(),
        workflow.selection().len()
    );
}

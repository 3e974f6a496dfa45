//! Bot layer - Discord-specific interface and command handlers
//!
//! This module wires the framework-agnostic core into poise: a global command check
//! runs the classifier and access policy before every slash command, and the event
//! handler feeds guild messages to the moderation filter.

/// Discord command implementations (vouches, shop, moderation, control)
pub mod commands;
/// Discord event and check handlers (permission gate, message moderation)
pub mod handlers;

use crate::{
    commerce::SellAuthClient,
    config::settings::BotSettings,
    core::{moderation::InviteFilter, policy::AccessPolicy, privilege::RoleConfig},
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::{Arc, atomic::AtomicBool};
use tracing::{error, info, instrument, warn};

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Default channels and commerce credentials
    pub settings: BotSettings,
    /// Owner id and tier roles
    pub roles: RoleConfig,
    /// Command access table
    pub policy: AccessPolicy,
    /// Commerce API client
    pub sellauth: SellAuthClient,
    /// Compiled invite matcher
    pub invite_filter: InviteFilter,
    /// Set by `/restart` before the gateway is shut down
    pub restart_requested: Arc<AtomicBool>,
}

impl BotData {
    /// Creates a new `BotData` instance, building the commerce client and invite filter.
    pub fn new(
        database: DatabaseConnection,
        settings: BotSettings,
        roles: RoleConfig,
        policy: AccessPolicy,
        restart_requested: Arc<AtomicBool>,
    ) -> Result<Self> {
        let sellauth = SellAuthClient::new(&settings.sellauth)?;
        Ok(Self {
            database,
            settings,
            roles,
            policy,
            sellauth,
            invite_filter: InviteFilter::new()?,
            restart_requested,
        })
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        // The permission gate already answered the user.
        poise::FrameworkError::CommandCheckFailed { error: None, .. } => {}
        poise::FrameworkError::Command { error, ctx, .. } => {
            let command = ctx.command().qualified_name.clone();
            error!(%command, "Command failed: {error}");
            let reply = poise::CreateReply::default()
                .content(format!("❌ Error in /{command}: `{error}`"))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(event = event.snake_case_name(), "Event handler failed: {error}");
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to the gateway and runs until the shards are shut down.
///
/// Returns normally after `/shutdown` or `/restart`; the caller inspects the restart
/// flag it passed in through [`BotData`].
#[instrument(skip_all)]
pub async fn run_bot(token: &str, data: BotData) -> Result<()> {
    let commands = commands::all();

    for name in data
        .policy
        .unregistered(commands.iter().map(|c| c.name.as_str()))
    {
        warn!(
            command = name,
            posture = ?data.policy.unknown_command_policy(),
            "Command has no access policy entry"
        );
    }

    let options = poise::FrameworkOptions {
        commands,
        command_check: Some(|ctx| Box::pin(handlers::permission::global_permission_check(ctx))),
        event_handler: |ctx, event, _framework, data| {
            Box::pin(handlers::event_handler(ctx, event, data))
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    };

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    "Registered {} commands globally",
                    framework.options().commands.len()
                );
                ctx.set_activity(Some(serenity::ActivityData::playing("NuvixMarket | /vouch")));
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged()
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    client.start().await?;
    info!("Bot client stopped");
    Ok(())
}

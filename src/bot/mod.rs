//! Bot layer - Discord-specific interface and command handlers.
//!
//! This module provides the Discord interface for `CraftWatch`: the command
//! set, the join-event handler, and the shared context every command
//! receives. The probe and configuration are plain injected values, not
//! process-wide state.

/// Discord command implementations (general, server, team, admin)
pub mod commands;
/// Discord gateway event handlers (member join)
pub mod handlers;

use crate::config::AppConfig;
use crate::core::probe::ServerProbe;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::info;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Resolved application configuration
    pub config: Arc<AppConfig>,
    /// Stateless probe over the watched server
    pub probe: ServerProbe,
}

impl BotData {
    /// Creates the shared context handed to every command invocation.
    #[must_use]
    pub const fn new(config: Arc<AppConfig>, probe: ServerProbe) -> Self {
        Self { config, probe }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say("An error occurred while running that command.").await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Connects to the gateway and serves commands until shutdown.
///
/// Commands are registered in the configured guild when `guild_id` is set
/// (instant updates, guild-scoped), globally otherwise.
pub async fn run_bot(token: String, config: Arc<AppConfig>, probe: ServerProbe) -> Result<()> {
    let guild_id = config.guild_id.map(serenity::GuildId::new);
    let prefix = config.prefix.clone();
    let setup_config = Arc::clone(&config);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::roll(),
                commands::status(),
                commands::players(),
                commands::geo(),
                commands::serverinfo(),
                commands::jointeam(),
                commands::shutdown(),
            ],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                if let Some(guild_id) = guild_id {
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, guild_id)
                        .await?;
                    info!("Registered commands in guild {guild_id}");
                } else {
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!("Registered commands globally");
                }
                Ok(BotData::new(setup_config, probe))
            })
        })
        .build();

    // GUILD_MEMBERS is required for the join-event handler; MESSAGE_CONTENT
    // for prefix commands.
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await
        .map_err(Error::from)?;

    info!("Starting bot client...");
    client.start().await.map_err(Error::from)
}

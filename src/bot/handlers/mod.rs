//! Discord gateway event handlers.
//!
//! Only one event matters to this bot: a member joining a guild, which gets
//! the configured default role. Per-member failures are logged and swallowed
//! so a single bad grant can never take down the event loop.

use crate::bot::BotData;
use crate::config::AppConfig;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use tracing::{info, warn};

/// Dispatches gateway events the bot cares about.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::GuildMemberAddition { new_member } = event {
        grant_default_role(ctx, new_member, &data.config).await;
    }
    Ok(())
}

/// Grants the configured default role to a freshly joined member.
/// Never propagates: success and failure are both just log lines.
async fn grant_default_role(
    ctx: &serenity::Context,
    member: &serenity::Member,
    config: &AppConfig,
) {
    let Some(role_name) = config.default_role.as_deref() else {
        return;
    };

    let result: std::result::Result<(), serenity::Error> = async {
        let roles = member.guild_id.roles(&ctx.http).await?;
        let Some(role) = roles.values().find(|role| role.name == role_name) else {
            return Err(serenity::Error::Other("configured default role not found"));
        };
        ctx.http
            .add_member_role(member.guild_id, member.user.id, role.id, Some("default join role"))
            .await
    }
    .await;

    match result {
        Ok(()) => info!("Granted '{role_name}' to new member {}", member.user.name),
        Err(err) => warn!(
            "Failed to grant '{role_name}' to new member {}: {err}",
            member.user.name
        ),
    }
}

//! Server probe commands - `status`, `players`, and `geo`.
//!
//! Each command defers the interaction first (the probe may legitimately take
//! several seconds), then formats the probe outcome. Users only ever see a
//! short message; the full failure cause goes to the operator log.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };
    use tracing::warn;

    /// Shows whether the server is online and its player count.
    #[poise::command(slash_command, prefix_command)]
    pub async fn status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let config = &data.config;

        match data.probe.status(&config.host, config.game_port).await {
            Ok(snapshot) => {
                ctx.say(format!(
                    "✅ Server is online with {} players!",
                    snapshot.players_online
                ))
                .await?;
            }
            Err(err) => {
                warn!("/status probe failed: {err}");
                ctx.say("⚠️ Server appears to be offline or unreachable.")
                    .await?;
            }
        }
        Ok(())
    }

    /// Lists player names, preferring the query protocol and falling back to
    /// the status name sample.
    #[poise::command(slash_command, prefix_command)]
    pub async fn players(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let config = &data.config;

        match data
            .probe
            .player_list(&config.host, config.game_port, config.query_port)
            .await
        {
            Ok(roster) if !roster.players.is_empty() => {
                ctx.say(format!(
                    "👥 Players online ({}, via {}): {}",
                    roster.players.len(),
                    roster.source,
                    roster.players.join(", ")
                ))
                .await?;
            }
            Ok(_) => {
                ctx.say("👥 No player names available right now.").await?;
            }
            Err(err) => {
                warn!("/players error: {err}");
                ctx.say("⚠️ Could not fetch player names. Query may be disabled or UDP blocked.")
                    .await?;
            }
        }
        Ok(())
    }

    /// Looks up geolocation info for an IP address (default = the watched
    /// server's address).
    #[poise::command(slash_command, prefix_command)]
    pub async fn geo(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "IP address to look up (defaults to the watched server)"] ip: Option<
            String,
        >,
    ) -> Result<()> {
        ctx.defer().await?;
        let data = ctx.data();
        let ip = ip.unwrap_or_else(|| data.config.host.clone());

        match data.probe.geo_lookup(&ip).await {
            Ok(info) => {
                ctx.say(format!(
                    "🌍 GeoIP for `{ip}`:\n📍 {}, {}, {}\n🏢 {}",
                    info.city, info.region, info.country, info.organization
                ))
                .await?;
            }
            Err(err) => {
                warn!("/geo error for {ip}: {err}");
                ctx.say(format!("⚠️ Could not fetch GeoIP info for {ip}"))
                    .await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

//! Application configuration.
//!
//! One `AppConfig` value is built at startup from the optional
//! `craftwatch.toml` file plus environment-variable overrides, then
//! dependency-injected into the bot and the probe. Nothing here is a
//! process-wide singleton, and the Discord token is deliberately not part of
//! `AppConfig` - it is read from the environment directly before use.

/// Optional craftwatch.toml loading
pub mod file;

use crate::core::probe::ProbeTimeouts;
use crate::errors::{Error, Result};
use std::time::Duration;

/// Environment variable holding the Discord bot token.
pub const TOKEN_ENV_VAR: &str = "DISCORD_BOT_TOKEN";

/// Environment variable overriding the config file path.
const CONFIG_PATH_ENV_VAR: &str = "CRAFTWATCH_CONFIG";

/// Default config file path next to the binary.
const DEFAULT_CONFIG_PATH: &str = "craftwatch.toml";

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Watched server host name or IP
    pub host: String,
    /// Game (TCP) port
    pub game_port: u16,
    /// Query (UDP) port; `None` means reuse the game port
    pub query_port: Option<u16>,
    /// Hard timeout bounds for the probe
    pub timeouts: ProbeTimeouts,
    /// Privileged identity for `shutdown`; `None` disables the command
    pub owner_id: Option<u64>,
    /// Guild for command registration; `None` registers globally
    pub guild_id: Option<u64>,
    /// Prefix for message commands
    pub prefix: String,
    /// Role granted to newly joined members, when configured
    pub default_role: Option<String>,
    /// Highest accepted `jointeam` number
    pub team_role_max: u32,
}

/// Loads the application configuration: config file first, environment
/// overrides second, built-in defaults for everything else.
///
/// Recognized overrides: `SERVER_HOST`, `SERVER_GAME_PORT`,
/// `SERVER_QUERY_PORT`, `BOT_OWNER_ID`, `BOT_GUILD_ID`, `BOT_PREFIX`,
/// `BOT_DEFAULT_ROLE`, and `CRAFTWATCH_CONFIG` for the file path itself.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var(CONFIG_PATH_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let file = file::load_optional(path)?;

    let host = env_or("SERVER_HOST", file.server.host);
    let game_port = env_parsed("SERVER_GAME_PORT")?.unwrap_or(file.server.game_port);
    let query_port = env_parsed("SERVER_QUERY_PORT")?.or(file.server.query_port);
    let owner_id = env_parsed("BOT_OWNER_ID")?.or(file.discord.owner_id);
    let guild_id = env_parsed("BOT_GUILD_ID")?.or(file.discord.guild_id);
    let prefix = std::env::var("BOT_PREFIX").ok().or(file.discord.prefix);
    let default_role = std::env::var("BOT_DEFAULT_ROLE").ok().or(file.discord.default_role);

    Ok(AppConfig {
        host,
        game_port,
        query_port,
        timeouts: ProbeTimeouts {
            status: Duration::from_secs(file.timeouts.status_secs),
            query: Duration::from_secs(file.timeouts.query_secs),
            geo: Duration::from_secs(file.timeouts.geo_secs),
        },
        owner_id,
        guild_id,
        prefix: prefix.unwrap_or_else(|| file::DEFAULT_PREFIX.to_string()),
        default_role,
        team_role_max: file.discord.team_role_max.unwrap_or(file::DEFAULT_TEAM_ROLE_MAX),
    })
}

/// Reads the Discord token from the environment, treating an empty or
/// whitespace-only value as absent.
#[must_use]
pub fn discord_token() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Sanity-checks the shape of a Discord token before handing it to the
/// gateway: real tokens are dot-separated and well over 20 characters.
pub fn validate_token(token: &str) -> Result<()> {
    if !token.contains('.') || token.len() < 20 {
        return Err(Error::Config(format!(
            "{TOKEN_ENV_VAR} does not look like a valid Discord token"
        )));
    }
    Ok(())
}

fn env_or(var: &str, fallback: String) -> String {
    std::env::var(var).unwrap_or(fallback)
}

fn env_parsed<T: std::str::FromStr>(var: &str) -> Result<Option<T>> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{var} has an unparsable value: {raw:?}"))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_validate_token_accepts_plausible_token() {
        assert!(validate_token("MTA4NjE1.GhYzkx.sOmE-lOnG-sEcReT-vAlUe").is_ok());
    }

    #[test]
    fn test_validate_token_rejects_short_or_dotless() {
        assert!(validate_token("short.t").is_err());
        assert!(validate_token("no-dots-but-otherwise-long-enough").is_err());
        assert!(validate_token("").is_err());
    }
}

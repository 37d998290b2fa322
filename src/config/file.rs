//! Optional `craftwatch.toml` loading.
//!
//! Every section and field has a default, so a missing file or an empty file
//! is a fully valid configuration pointing at the stock server address.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Fallback server host when nothing is configured.
pub const DEFAULT_HOST: &str = "147.185.221.31";

/// Fallback game (TCP) port when nothing is configured.
pub const DEFAULT_GAME_PORT: u16 = 36571;

/// Fallback per-operation timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Fallback prefix for message commands.
pub const DEFAULT_PREFIX: &str = "!";

/// Fallback upper bound for `jointeam` numbers.
pub const DEFAULT_TEAM_ROLE_MAX: u32 = 10;

/// Configuration structure representing the entire craftwatch.toml file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// The watched game server
    pub server: ServerSection,
    /// Per-operation timeout bounds
    pub timeouts: TimeoutSection,
    /// Discord-side behavior
    pub discord: DiscordSection,
}

/// `[server]` section: where the watched server lives.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host name or IP address
    pub host: String,
    /// Game (TCP) port
    pub game_port: u16,
    /// Query (UDP) port; absent means reuse the game port
    pub query_port: Option<u16>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            game_port: DEFAULT_GAME_PORT,
            query_port: None,
        }
    }
}

/// `[timeouts]` section: hard bounds per probe operation, in seconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimeoutSection {
    /// Status query bound
    pub status_secs: u64,
    /// UDP query bound
    pub query_secs: u64,
    /// Geolocation HTTP bound
    pub geo_secs: u64,
}

impl Default for TimeoutSection {
    fn default() -> Self {
        Self {
            status_secs: DEFAULT_TIMEOUT_SECS,
            query_secs: DEFAULT_TIMEOUT_SECS,
            geo_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[discord]` section: command surface behavior.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DiscordSection {
    /// Privileged identity allowed to invoke `shutdown`
    pub owner_id: Option<u64>,
    /// Guild to register commands in; absent means global registration
    pub guild_id: Option<u64>,
    /// Prefix for message commands (slash commands always work)
    pub prefix: Option<String>,
    /// Role granted automatically to newly joined members
    pub default_role: Option<String>,
    /// Highest accepted `jointeam` number
    pub team_role_max: Option<u32>,
}

/// Loads configuration from a TOML file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)
        .map_err(|e| Error::Config(format!("Failed to read config file {path_ref:?}: {e}")))?;

    toml::from_str(&contents)
        .map_err(|e| Error::Config(format!("Failed to parse TOML from {path_ref:?}: {e}")))
}

/// Loads configuration from a TOML file, treating a missing file as empty.
pub fn load_optional<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::debug!("No config file at {:?}, using defaults", path.as_ref());
        Ok(FileConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            host = "play.example.net"
            game_port = 25565
            query_port = 25566

            [timeouts]
            status_secs = 3
            query_secs = 4
            geo_secs = 6

            [discord]
            owner_id = 123456789
            guild_id = 987654321
            prefix = "?"
            default_role = "Member"
            team_role_max = 6
        "#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "play.example.net");
        assert_eq!(config.server.game_port, 25565);
        assert_eq!(config.server.query_port, Some(25566));
        assert_eq!(config.timeouts.status_secs, 3);
        assert_eq!(config.timeouts.query_secs, 4);
        assert_eq!(config.timeouts.geo_secs, 6);
        assert_eq!(config.discord.owner_id, Some(123_456_789));
        assert_eq!(config.discord.guild_id, Some(987_654_321));
        assert_eq!(config.discord.prefix.as_deref(), Some("?"));
        assert_eq!(config.discord.default_role.as_deref(), Some("Member"));
        assert_eq!(config.discord.team_role_max, Some(6));
    }

    #[test]
    fn test_empty_config_falls_back_to_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.game_port, DEFAULT_GAME_PORT);
        assert_eq!(config.server.query_port, None);
        assert_eq!(config.timeouts.status_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.discord.owner_id, None);
        assert_eq!(config.discord.default_role, None);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = r#"
            [server]
            host = "mc.example.org"
        "#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "mc.example.org");
        assert_eq!(config.server.game_port, DEFAULT_GAME_PORT);
    }
}

//! Offline self-check pass.
//!
//! When no Discord token is configured the process does not fail; it
//! exercises the probe against the configured server, prints each outcome to
//! stdout, and lets `main` exit cleanly. Useful for verifying server
//! reachability and configuration without touching Discord at all.

use crate::config::AppConfig;
use crate::core::probe::ServerProbe;

/// Runs the status, player-list, and geolocation probes once each,
/// printing every outcome.
pub async fn run(config: &AppConfig, probe: &ServerProbe) {
    println!(
        "⚙️ Running offline self-check against {}:{}…",
        config.host, config.game_port
    );
    println!("Ping check (simulated): Pong!");

    match probe.status(&config.host, config.game_port).await {
        Ok(snapshot) => println!("Status check: ONLINE, players={}", snapshot.players_online),
        Err(err) => println!("Status check: OFFLINE/ERROR → {err}"),
    }

    match probe
        .player_list(&config.host, config.game_port, config.query_port)
        .await
    {
        Ok(roster) if roster.players.is_empty() => println!("Players check: no names available"),
        Ok(roster) => println!("Players check ({}): {:?}", roster.source, roster.players),
        Err(err) => println!("Players check: error → {err}"),
    }

    match probe.geo_lookup(&config.host).await {
        Ok(info) => println!(
            "Geo check: {}, {}, {} | {}",
            info.city, info.region, info.country, info.organization
        ),
        Err(err) => println!("Geo check: error → {err}"),
    }

    println!("✅ Self-check complete.");
}

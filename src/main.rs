use craftwatch::core::probe::ServerProbe;
use craftwatch::core::upstream::McQueryBackend;
use craftwatch::errors::Result;
use craftwatch::{bot, config, selfcheck};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()?;
    info!(
        "Watching {}:{} (query port: {})",
        app_config.host,
        app_config.game_port,
        app_config
            .query_port
            .map_or_else(|| "game port".to_string(), |port| port.to_string())
    );

    // 4. Wire up the probe over the production backends
    let probe = ServerProbe::new(
        Arc::new(McQueryBackend),
        reqwest::Client::new(),
        app_config.timeouts,
    );
    let app_config = Arc::new(app_config);

    // 5. Run the bot, or the self-check pass when no token is configured.
    // The token is read here, directly before use, never stored in AppConfig.
    let Some(token) = config::discord_token() else {
        println!("⚠️ No {} found. Skipping gateway start and running the self-check instead.", config::TOKEN_ENV_VAR);
        selfcheck::run(&app_config, &probe).await;
        return Ok(());
    };
    config::validate_token(&token)?;

    bot::run_bot(token, Arc::clone(&app_config), probe).await
}

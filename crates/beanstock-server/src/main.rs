//! Game server binary for Grow A Beanstock.
//!
//! Loads configuration, builds a fresh game session, and serves the HTTP
//! API until the process is terminated.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `beanstock-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Build the species catalog and game session
//! 4. Serve the HTTP API

use std::path::Path;
use std::sync::Arc;

use beanstock_engine::config::{ConfigError, GameConfig};
use beanstock_engine::{GameSession, SpeciesCatalog};
use beanstock_server::AppState;
use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the game server.
///
/// # Errors
///
/// Returns an error if configuration is malformed or the server cannot
/// bind its port.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so the missing-file
    //    fallback is reported after initialization.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG overrides the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("beanstock-server starting");
    if !config_found {
        info!("Config file not found, using defaults");
    }
    info!(
        starting_coins = config.game.starting_coins,
        seed = ?config.game.seed,
        host = config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    // 3. Build the game session.
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    let session = GameSession::new(
        SpeciesCatalog::standard(),
        config.game.starting_coins,
        config.game.seed,
        now,
    );
    let state = Arc::new(AppState::new(session));
    info!("Game session initialized");

    // 4. Serve until terminated.
    beanstock_server::start_server(&config.server, state).await?;

    info!("beanstock-server shutdown complete");
    Ok(())
}

/// Load configuration from `beanstock-config.yaml` in the working
/// directory.
///
/// Returns the config plus whether the file was actually found; absent
/// files fall back to defaults rather than failing startup.
fn load_config() -> Result<(GameConfig, bool), ConfigError> {
    let config_path = Path::new("beanstock-config.yaml");
    if config_path.exists() {
        Ok((GameConfig::from_file(config_path)?, true))
    } else {
        Ok((GameConfig::default(), false))
    }
}

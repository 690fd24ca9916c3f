//! Demo engine for the Homestead agent layer.
//!
//! This is the main entry point that stands in for the game host. It loads
//! configuration, assembles the agent world and the household
//! collaborators, and runs a frame-paced loop with a scripted player until
//! the frame budget is spent or Ctrl-C is pressed.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `homestead-config.yaml` (or `HOMESTEAD_CONFIG`)
//! 3. Assemble the agent world, household, and scripted player
//! 4. Run the frame loop
//! 5. Log the result

mod error;
mod player;
mod runner;
mod spawner;

use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use homestead_core::SimulationConfig;

use crate::error::EngineError;
use crate::runner::Session;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "homestead-config.yaml";

/// Application entry point for the demo engine.
///
/// # Errors
///
/// Returns an error if configuration, world assembly, or a frame fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("homestead-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = config.world.seed,
        frame_interval_ms = config.world.frame_interval_ms,
        max_frames = config.world.max_frames,
        villagers = config.village.npcs.len(),
        "Configuration loaded"
    );

    // 3. Assemble the session.
    let mut session = Session::new(&config)?;
    info!(
        villagers = session.world.npcs().len(),
        weather = ?session.world.weather(),
        "Session assembled, entering frame loop"
    );

    // 4. Run until the frame budget is spent or Ctrl-C.
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(%err, "Ctrl-C handler unavailable, running to the frame limit");
            std::future::pending::<()>().await;
        }
    };
    let result = runner::run(
        &mut session,
        config.world.max_frames,
        config.world.frame_interval_ms,
        shutdown,
    )
    .await?;

    // 5. Log results.
    runner::log_run_end(&result, &session);
    info!("homestead-engine shutdown complete");

    Ok(())
}

/// Load configuration from `HOMESTEAD_CONFIG` or the default path.
///
/// A missing file falls back to defaults (with environment overrides).
fn load_config() -> Result<SimulationConfig, EngineError> {
    let path = std::env::var_os("HOMESTEAD_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        info!(path = %path.display(), "Config file loaded");
        Ok(config)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = SimulationConfig::default();
        config.world.apply_env_overrides();
        Ok(config)
    }
}

//! Engine binary for the Urban Sprout garden simulation.
//!
//! Wires the game service, the advisor, and the garden API together and
//! runs until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `sprout-config.yaml` (or `SPROUT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Pick the advisor: live LLM backend if configured, offline otherwise
//! 4. Spawn the game service
//! 5. Start the garden API server
//! 6. Wait for Ctrl-C, then stop the server and drain the service

mod error;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use sprout_advisor::GardenAdvisor;
use sprout_core::config::{DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig};
use sprout_core::{GameController, GameService, SimulationConfig};
use sprout_observer::AppState;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// How long shutdown waits for the game service to drain its queue.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the API server cannot
/// bind, or the shutdown signal cannot be awaited.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::var("SPROUT_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = SimulationConfig::load_or_default(&config_path).map_err(EngineError::from)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(
        config = %config_path.display(),
        grid_size = config.garden.grid_size,
        initial_money = config.economy.initial_money,
        initial_water = config.economy.initial_water,
        seed = ?config.simulation.seed,
        "sprout-engine starting"
    );

    // 3. Pick the advisor.
    let advisor = Arc::new(GardenAdvisor::from_env());
    if !advisor.is_live() {
        info!("Daily events, tips, and chat will use their offline fallbacks");
    }

    // 4. Spawn the game service.
    let controller = GameController::new(&config, advisor);
    let (handle, service_task) = GameService::spawn(controller);
    info!("Game service started");

    // 5. Start the garden API server.
    let app_state = Arc::new(AppState::new(handle));
    let observer_task = sprout_observer::spawn_observer(&config.infrastructure, app_state)
        .await
        .map_err(EngineError::from)?;

    // 6. Run until interrupted.
    tokio::signal::ctrl_c().await.map_err(|e| EngineError::Signal {
        message: format!("failed to listen for Ctrl-C: {e}"),
    })?;
    info!("Shutdown requested");

    // The service stops once the last game handle is dropped. Open
    // WebSocket connections may still hold one, so the wait is bounded.
    observer_task.abort();
    match tokio::time::timeout(SHUTDOWN_GRACE, service_task).await {
        Ok(Ok(())) => info!("Game service drained"),
        Ok(Err(e)) => warn!(error = %e, "Game service task ended abnormally"),
        Err(_elapsed) => warn!("Game service still busy, exiting anyway"),
    }
    info!("sprout-engine stopped");

    Ok(())
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

//! Engine binary for The Beyond.
//!
//! Wires configuration, reference data, the store, and the tick runner
//! together, then ticks the world on a fixed interval until Ctrl-C.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `beyond-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Build and validate the starting reference data
//! 4. Open the store, restoring the snapshot if one exists
//! 5. Seed explorers into an empty world
//! 6. Run the scheduled tick loop
//! 7. Save a final snapshot on shutdown

mod error;
mod snapshot_callback;
mod spawner;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use beyond_core::config::LoggingConfig;
use beyond_core::{LogFormat, SimulationConfig, TickEngine, TickRunner};
use beyond_db::MemoryStore;
use beyond_world::{ReferenceData, RngDice};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::snapshot_callback::SnapshotCallback;

/// Config file used when no path is given on the command line.
const DEFAULT_CONFIG_PATH: &str = "beyond-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if any startup step fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("beyond-engine starting");
    if !from_file {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        world_name = config.world.name,
        tick_interval_secs = config.world.tick_interval_secs,
        snapshot_path = ?config.persistence.snapshot_path,
        "Configuration loaded"
    );

    // 3. Reference data.
    let reference = Arc::new(ReferenceData::starting().map_err(EngineError::from)?);
    info!(
        regions = reference.regions.len(),
        items = reference.catalog.items.len(),
        specialties = reference.catalog.specialties.len(),
        "Reference data loaded"
    );

    // 4. Store.
    let snapshot_path = config.persistence.snapshot_path.clone();
    let store = Arc::new(match &snapshot_path {
        Some(path) => MemoryStore::open(path).await.map_err(EngineError::from)?,
        None => {
            warn!("No snapshot path configured, world state will not persist");
            MemoryStore::new()
        }
    });

    // 5. Seed explorers.
    let mut rng = RngDice::from_os();
    spawner::seed_explorers(
        &*store,
        &reference,
        &config.explorers,
        &config.seeding,
        &mut rng,
    )
    .await?;

    // 6. Run the tick loop.
    let engine = TickEngine::new(
        Arc::clone(&store),
        Arc::clone(&reference),
        config.explorers.clone(),
        rng,
    );
    let runner = TickRunner::new(
        engine,
        SnapshotCallback::new(Arc::clone(&store), snapshot_path.clone()),
    );
    let interval = Duration::from_secs(config.world.tick_interval_secs.max(1));
    runner.run_scheduled(interval, shutdown_signal()).await;

    // 7. Final save.
    SnapshotCallback::new(store, snapshot_path).save().await;
    info!("beyond-engine shutdown complete");
    Ok(())
}

/// Load configuration from `path`, or defaults when the file is absent.
///
/// The second value reports whether the file was read.
fn load_config(path: &Path) -> Result<(SimulationConfig, bool), EngineError> {
    if path.exists() {
        Ok((SimulationConfig::from_file(path)?, true))
    } else {
        let mut config = SimulationConfig::default();
        config.persistence.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    match logging.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the engine runs
/// until killed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
}

//! Tick callback that logs the outcome tally and persists the store.

use std::path::PathBuf;
use std::sync::Arc;

use beyond_core::{TickCallback, TickSummary};
use beyond_db::MemoryStore;
use tracing::{error, info};

/// Saves a snapshot after every tick when a path is configured.
pub struct SnapshotCallback {
    store: Arc<MemoryStore>,
    path: Option<PathBuf>,
}

impl SnapshotCallback {
    /// Create a callback for `store`, saving to `path` if set.
    pub const fn new(store: Arc<MemoryStore>, path: Option<PathBuf>) -> Self {
        Self { store, path }
    }

    /// Write the snapshot now. A failed save is logged; the simulation
    /// keeps running and the next save retries.
    pub async fn save(&self) {
        if let Some(path) = &self.path {
            if let Err(err) = self.store.save(path).await {
                error!(path = %path.display(), error = %err, "Snapshot save failed");
            }
        }
    }
}

impl TickCallback for SnapshotCallback {
    async fn on_tick(&mut self, summary: &TickSummary) {
        info!(
            tick = summary.tick,
            died = summary.count("died"),
            returned = summary.count("returned"),
            returning = summary.count("returning"),
            errors = summary.count("error"),
            "Tick outcomes"
        );
        self.save().await;
    }
}

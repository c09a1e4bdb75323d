//! Tick orchestration and player commands for The Beyond.
//!
//! This crate drives the world forward. Each tick loads every live
//! explorer, resolves its turn through the explorer pipeline (or one step
//! of its journey home), and persists the results through the store
//! traits in `beyond-db`.
//!
//! # Modules
//!
//! - [`commands`] -- Enlisting new explorers and recalling active ones.
//! - [`config`] -- Configuration loading from `beyond-config.yaml` into
//!   strongly-typed structs.
//! - [`legacy`] -- Settling a finished journey into the player's legacy.
//! - [`runner`] -- [`TickRunner`]: the scheduled loop and its re-entrancy
//!   guard.
//! - [`status`] -- Read-only world status.
//! - [`tick`] -- [`TickEngine`]: one tick over every live explorer.

pub mod commands;
pub mod config;
pub mod legacy;
pub mod runner;
pub mod status;
pub mod tick;

pub use commands::{CommandError, enlist_explorer, recall_explorer};
pub use config::{ConfigError, LogFormat, SimulationConfig};
pub use legacy::{JourneyEnd, settle_journey};
pub use runner::{NoOpCallback, TickCallback, TickRunner};
pub use status::{WorldStatus, world_status};
pub use tick::{ExplorerOutcome, ExplorerTickError, Outcome, TickEngine, TickError, TickSummary};

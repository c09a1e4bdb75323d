//! Persistence for The Beyond.
//!
//! The engine depends only on the collaborator traits in [`store`]; any
//! backend that implements them can drive a tick. This crate ships one
//! backend, [`MemoryStore`], which keeps everything in process and
//! persists to a JSON snapshot between runs.
//!
//! # Architecture
//!
//! ```text
//! TickEngine / commands
//!     |
//!     +-- Stores (ExplorerStore + WorldStore + JournalStore
//!     |           + LegacyStore + InventoryStore)
//!     |
//!     +-- MemoryStore --> snapshot.json (save / load)
//! ```
//!
//! # Modules
//!
//! - [`store`] -- Collaborator traits and the [`Stores`] bound
//! - [`memory`] -- The in-memory backend and its snapshot format
//! - [`error`] -- Shared error types

pub mod error;
pub mod memory;
pub mod store;

// Re-export primary types for convenience.
pub use error::DbError;
pub use memory::MemoryStore;
pub use store::{ExplorerStore, InventoryStore, JournalStore, LegacyStore, Stores, WorldStore};

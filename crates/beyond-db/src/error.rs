//! Error types for the store layer.
//!
//! All store operations fail with [`DbError`]. The tick orchestrator treats
//! any of these as a per-explorer failure and carries on with the batch.

use beyond_types::{ExplorerId, ExplorerStatus, PlayerItemId, UserId};

/// Errors that can occur in the store layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// No explorer with this id.
    #[error("explorer not found: {0}")]
    ExplorerNotFound(ExplorerId),

    /// The explorer is `returned` or `dead` and can no longer change.
    #[error("explorer {0} is terminal and cannot be updated")]
    Terminal(ExplorerId),

    /// A status change that does not follow a lifecycle edge.
    #[error("explorer {id}: invalid transition {from} -> {to}")]
    InvalidTransition {
        /// The explorer.
        id: ExplorerId,
        /// Stored status.
        from: ExplorerStatus,
        /// Requested status.
        to: ExplorerStatus,
    },

    /// An explorer with this id already exists.
    #[error("explorer already exists: {0}")]
    DuplicateExplorer(ExplorerId),

    /// No inventory item with this id.
    #[error("inventory item not found: {0}")]
    ItemNotFound(PlayerItemId),

    /// No legacy record for this player.
    #[error("no legacy record for player {0}")]
    LegacyNotFound(UserId),

    /// The backing store refused the write.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing a snapshot file failed.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

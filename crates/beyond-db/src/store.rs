//! Store collaborator traits.
//!
//! The tick engine and the explorer commands talk to persistence only
//! through these traits. Each operation is independently atomic; nothing
//! here spans a transaction across explorers or tables. The returned
//! futures are `Send` so that ticks can run on a multi-threaded runtime.

use std::collections::BTreeMap;
use std::future::Future;

use beyond_types::{
    Explorer, ExplorerId, ExplorerUpdate, JournalEntry, LegacyCounter, LegacyUpdate, PlayerItem,
    PlayerItemId, PlayerLegacy, RegionId, UserId, WorldCounter, WorldDiscovery, WorldState,
    WorldStateUpdate,
};

use crate::error::DbError;

/// Explorer records.
pub trait ExplorerStore: Send + Sync {
    /// Every explorer that is `active` or `returning`.
    fn live_explorers(&self) -> impl Future<Output = Result<Vec<Explorer>, DbError>> + Send;

    /// One explorer by id.
    fn explorer(
        &self,
        id: ExplorerId,
    ) -> impl Future<Output = Result<Option<Explorer>, DbError>> + Send;

    /// Insert a new explorer.
    fn insert_explorer(&self, explorer: Explorer)
    -> impl Future<Output = Result<(), DbError>> + Send;

    /// Apply a partial update and return the stored result.
    ///
    /// Implementations reject updates to terminal explorers and status
    /// changes that do not follow a lifecycle edge.
    fn update_explorer(
        &self,
        id: ExplorerId,
        update: ExplorerUpdate,
    ) -> impl Future<Output = Result<Explorer, DbError>> + Send;

    /// Live explorers per region.
    fn region_counts(&self) -> impl Future<Output = Result<BTreeMap<RegionId, u32>, DbError>> + Send;
}

/// The singleton world record and its discovery log.
pub trait WorldStore: Send + Sync {
    /// The world record.
    fn world(&self) -> impl Future<Output = Result<WorldState, DbError>> + Send;

    /// Apply a partial update and return the stored result.
    fn update_world(
        &self,
        update: WorldStateUpdate,
    ) -> impl Future<Output = Result<WorldState, DbError>> + Send;

    /// Add one to a lifetime counter.
    fn increment_world(
        &self,
        counter: WorldCounter,
    ) -> impl Future<Output = Result<(), DbError>> + Send;

    /// Claim a secret for its first discoverer.
    ///
    /// Compare-and-set: returns `false` without recording anything if the
    /// secret is already in the discovered set.
    fn claim_secret(
        &self,
        discovery: WorldDiscovery,
    ) -> impl Future<Output = Result<bool, DbError>> + Send;

    /// Every first-discoverer record, oldest first.
    fn discoveries(&self) -> impl Future<Output = Result<Vec<WorldDiscovery>, DbError>> + Send;
}

/// Append-only journal.
pub trait JournalStore: Send + Sync {
    /// Append one entry.
    fn append_journal(&self, entry: JournalEntry)
    -> impl Future<Output = Result<(), DbError>> + Send;

    /// An explorer's entries in the order they were written.
    fn journal_for(
        &self,
        explorer: ExplorerId,
    ) -> impl Future<Output = Result<Vec<JournalEntry>, DbError>> + Send;
}

/// Per-player legacy records.
pub trait LegacyStore: Send + Sync {
    /// The player's legacy, created fresh if missing.
    fn ensure_legacy(&self, user: UserId)
    -> impl Future<Output = Result<PlayerLegacy, DbError>> + Send;

    /// The player's legacy, if any.
    fn legacy(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<PlayerLegacy>, DbError>> + Send;

    /// Add one to a lifetime counter, creating the record if missing.
    fn increment_legacy(
        &self,
        user: UserId,
        counter: LegacyCounter,
    ) -> impl Future<Output = Result<PlayerLegacy, DbError>> + Send;

    /// Apply a partial update.
    fn update_legacy(
        &self,
        user: UserId,
        update: LegacyUpdate,
    ) -> impl Future<Output = Result<PlayerLegacy, DbError>> + Send;
}

/// Durable player inventories.
pub trait InventoryStore: Send + Sync {
    /// Add an item instance.
    fn add_item(&self, item: PlayerItem) -> impl Future<Output = Result<(), DbError>> + Send;

    /// One item instance by id.
    fn item(
        &self,
        id: PlayerItemId,
    ) -> impl Future<Output = Result<Option<PlayerItem>, DbError>> + Send;

    /// A player's items, oldest first.
    fn items_for(&self, user: UserId)
    -> impl Future<Output = Result<Vec<PlayerItem>, DbError>> + Send;

    /// Mark an item instance as carried or not.
    fn set_equipped(
        &self,
        id: PlayerItemId,
        equipped: bool,
    ) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Every collaborator the engine needs, behind one bound.
pub trait Stores: ExplorerStore + WorldStore + JournalStore + LegacyStore + InventoryStore {}

impl<T> Stores for T where T: ExplorerStore + WorldStore + JournalStore + LegacyStore + InventoryStore
{}

//! In-memory store with JSON snapshot persistence.
//!
//! [`MemoryStore`] implements every collaborator trait over a single
//! `tokio` [`RwLock`]. Each trait method takes the lock once, so every
//! operation is atomic on its own. The whole state can be written to and
//! read back from a JSON snapshot file between runs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use beyond_types::{
    Explorer, ExplorerId, ExplorerUpdate, JournalEntry, LegacyCounter, LegacyUpdate, PlayerItem,
    PlayerItemId, PlayerLegacy, RegionId, UserId, WorldCounter, WorldDiscovery, WorldState,
    WorldStateUpdate,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::DbError;
use crate::store::{ExplorerStore, InventoryStore, JournalStore, LegacyStore, WorldStore};

/// Everything the store holds.
#[derive(Debug, Default)]
struct MemoryState {
    world: WorldState,
    explorers: BTreeMap<ExplorerId, Explorer>,
    journal: Vec<JournalEntry>,
    legacies: BTreeMap<UserId, PlayerLegacy>,
    items: BTreeMap<PlayerItemId, PlayerItem>,
    discoveries: Vec<WorldDiscovery>,
    /// Explorers whose updates fail with [`DbError::Unavailable`].
    rejected: BTreeSet<ExplorerId>,
}

/// On-disk form of [`MemoryState`]. Collections are stored as plain lists.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    world: WorldState,
    #[serde(default)]
    explorers: Vec<Explorer>,
    #[serde(default)]
    journal: Vec<JournalEntry>,
    #[serde(default)]
    legacies: Vec<PlayerLegacy>,
    #[serde(default)]
    items: Vec<PlayerItem>,
    #[serde(default)]
    discoveries: Vec<WorldDiscovery>,
}

impl From<&MemoryState> for Snapshot {
    fn from(state: &MemoryState) -> Self {
        Self {
            world: state.world.clone(),
            explorers: state.explorers.values().cloned().collect(),
            journal: state.journal.clone(),
            legacies: state.legacies.values().cloned().collect(),
            items: state.items.values().cloned().collect(),
            discoveries: state.discoveries.clone(),
        }
    }
}

impl From<Snapshot> for MemoryState {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            world: snapshot.world,
            explorers: snapshot.explorers.into_iter().map(|e| (e.id, e)).collect(),
            journal: snapshot.journal,
            legacies: snapshot
                .legacies
                .into_iter()
                .map(|l| (l.user_id, l))
                .collect(),
            items: snapshot.items.into_iter().map(|i| (i.id, i)).collect(),
            discoveries: snapshot.discoveries,
            rejected: BTreeSet::new(),
        }
    }
}

/// A process-local store for every collaborator trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// An empty store at tick zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a snapshot file.
    pub async fn load(path: &Path) -> Result<Self, DbError> {
        let bytes = tokio::fs::read(path).await?;
        let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
        info!(
            path = %path.display(),
            tick = snapshot.world.current_tick,
            explorers = snapshot.explorers.len(),
            "Snapshot loaded"
        );
        Ok(Self {
            state: RwLock::new(MemoryState::from(snapshot)),
        })
    }

    /// Load a store from `path`, or start empty if the file does not exist.
    pub async fn open(path: &Path) -> Result<Self, DbError> {
        if tokio::fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            info!(path = %path.display(), "No snapshot found, starting a fresh world");
            Ok(Self::new())
        }
    }

    /// Write the whole store to `path`.
    ///
    /// The snapshot is written beside the target and renamed over it, so a
    /// crash mid-write leaves the previous snapshot intact.
    pub async fn save(&self, path: &Path) -> Result<(), DbError> {
        let (bytes, tick) = {
            let state = self.state.read().await;
            let snapshot = Snapshot::from(&*state);
            (serde_json::to_vec_pretty(&snapshot)?, state.world.current_tick)
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, &bytes).await?;
        tokio::fs::rename(&staging, path).await?;
        info!(path = %path.display(), tick, bytes = bytes.len(), "Snapshot saved");
        Ok(())
    }

    /// Make every later update to `id` fail with [`DbError::Unavailable`].
    ///
    /// Only built for tests and the `test-util` feature.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn reject_updates_for(&self, id: ExplorerId) {
        self.state.write().await.rejected.insert(id);
    }
}

impl ExplorerStore for MemoryStore {
    async fn live_explorers(&self) -> Result<Vec<Explorer>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .explorers
            .values()
            .filter(|e| e.is_live())
            .cloned()
            .collect())
    }

    async fn explorer(&self, id: ExplorerId) -> Result<Option<Explorer>, DbError> {
        Ok(self.state.read().await.explorers.get(&id).cloned())
    }

    async fn insert_explorer(&self, explorer: Explorer) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        if state.explorers.contains_key(&explorer.id) {
            return Err(DbError::DuplicateExplorer(explorer.id));
        }
        debug!(explorer_id = %explorer.id, name = %explorer.name, "Explorer inserted");
        state.explorers.insert(explorer.id, explorer);
        Ok(())
    }

    async fn update_explorer(
        &self,
        id: ExplorerId,
        update: ExplorerUpdate,
    ) -> Result<Explorer, DbError> {
        let mut state = self.state.write().await;
        if state.rejected.contains(&id) {
            return Err(DbError::Unavailable(format!("updates to {id} are rejected")));
        }
        let explorer = state
            .explorers
            .get_mut(&id)
            .ok_or(DbError::ExplorerNotFound(id))?;
        if explorer.status.is_terminal() {
            return Err(DbError::Terminal(id));
        }
        if let Some(next) = update.status {
            if next != explorer.status && !explorer.status.can_transition_to(next) {
                return Err(DbError::InvalidTransition {
                    id,
                    from: explorer.status,
                    to: next,
                });
            }
        }
        update.apply(explorer);
        Ok(explorer.clone())
    }

    async fn region_counts(&self) -> Result<BTreeMap<RegionId, u32>, DbError> {
        let state = self.state.read().await;
        let mut counts = BTreeMap::new();
        for explorer in state.explorers.values().filter(|e| e.is_live()) {
            let count: &mut u32 = counts.entry(explorer.current_region.clone()).or_default();
            *count = count.saturating_add(1);
        }
        Ok(counts)
    }
}

impl WorldStore for MemoryStore {
    async fn world(&self) -> Result<WorldState, DbError> {
        Ok(self.state.read().await.world.clone())
    }

    async fn update_world(&self, update: WorldStateUpdate) -> Result<WorldState, DbError> {
        let mut state = self.state.write().await;
        if let Some(tick) = update.current_tick {
            state.world.current_tick = tick;
        }
        state.world.updated_at = Utc::now();
        Ok(state.world.clone())
    }

    async fn increment_world(&self, counter: WorldCounter) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        state.world.increment(counter);
        state.world.updated_at = Utc::now();
        Ok(())
    }

    async fn claim_secret(&self, discovery: WorldDiscovery) -> Result<bool, DbError> {
        let mut state = self.state.write().await;
        if !state
            .world
            .discovered_secrets
            .insert(discovery.secret_id.clone())
        {
            debug!(secret = %discovery.secret_id, "Secret already claimed");
            return Ok(false);
        }
        debug!(
            secret = %discovery.secret_id,
            explorer = %discovery.discovered_by_explorer,
            tick = discovery.discovered_on_tick,
            "Secret claimed"
        );
        state.world.updated_at = Utc::now();
        state.discoveries.push(discovery);
        Ok(true)
    }

    async fn discoveries(&self) -> Result<Vec<WorldDiscovery>, DbError> {
        Ok(self.state.read().await.discoveries.clone())
    }
}

impl JournalStore for MemoryStore {
    async fn append_journal(&self, entry: JournalEntry) -> Result<(), DbError> {
        self.state.write().await.journal.push(entry);
        Ok(())
    }

    async fn journal_for(&self, explorer: ExplorerId) -> Result<Vec<JournalEntry>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .journal
            .iter()
            .filter(|e| e.explorer_id == explorer)
            .cloned()
            .collect())
    }
}

impl LegacyStore for MemoryStore {
    async fn ensure_legacy(&self, user: UserId) -> Result<PlayerLegacy, DbError> {
        let mut state = self.state.write().await;
        Ok(state
            .legacies
            .entry(user)
            .or_insert_with(|| PlayerLegacy::new(user))
            .clone())
    }

    async fn legacy(&self, user: UserId) -> Result<Option<PlayerLegacy>, DbError> {
        Ok(self.state.read().await.legacies.get(&user).cloned())
    }

    async fn increment_legacy(
        &self,
        user: UserId,
        counter: LegacyCounter,
    ) -> Result<PlayerLegacy, DbError> {
        let mut state = self.state.write().await;
        let legacy = state
            .legacies
            .entry(user)
            .or_insert_with(|| PlayerLegacy::new(user));
        legacy.increment(counter);
        Ok(legacy.clone())
    }

    async fn update_legacy(
        &self,
        user: UserId,
        update: LegacyUpdate,
    ) -> Result<PlayerLegacy, DbError> {
        let mut state = self.state.write().await;
        let legacy = state
            .legacies
            .get_mut(&user)
            .ok_or(DbError::LegacyNotFound(user))?;
        if let Some(floors) = update.stat_floors {
            legacy.stat_floors = floors;
        }
        if let Some(unlocked) = update.unlocked_specialties {
            legacy.unlocked_specialties = unlocked;
        }
        Ok(legacy.clone())
    }
}

impl InventoryStore for MemoryStore {
    async fn add_item(&self, item: PlayerItem) -> Result<(), DbError> {
        self.state.write().await.items.insert(item.id, item);
        Ok(())
    }

    async fn item(&self, id: PlayerItemId) -> Result<Option<PlayerItem>, DbError> {
        Ok(self.state.read().await.items.get(&id).cloned())
    }

    async fn items_for(&self, user: UserId) -> Result<Vec<PlayerItem>, DbError> {
        let state = self.state.read().await;
        let mut items: Vec<PlayerItem> = state
            .items
            .values()
            .filter(|i| i.user_id == user)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.created_at);
        Ok(items)
    }

    async fn set_equipped(&self, id: PlayerItemId, equipped: bool) -> Result<(), DbError> {
        let mut state = self.state.write().await;
        let item = state.items.get_mut(&id).ok_or(DbError::ItemNotFound(id))?;
        item.is_equipped = equipped;
        Ok(())
    }
}

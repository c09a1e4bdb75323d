//! Core entity structs for The Beyond.
//!
//! Covers the [`Explorer`] and its partial update, journal entries, the
//! per-player [`PlayerLegacy`] and inventory, and the world singleton with
//! its first-discoverer records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ExplorerStatus, JournalEventType, LegacyCounter, Stat, WorldCounter};
use crate::ids::{
    DiscoveryId, ExplorerId, ItemId, JournalEntryId, KeepsakeId, PersonalityId, PlayerItemId,
    RegionId, SecretId, SpecialtyId, UserId,
};

/// Maximum explorer health.
pub const MAX_HEALTH: u32 = 100;

/// Lowest value any stat may take.
pub const MIN_STAT: u8 = 1;

/// Highest value any stat may take.
pub const MAX_STAT: u8 = 10;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The four innate stats of an explorer, also used for a player's stat
/// floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stats {
    /// Survival and toughness.
    pub vigor: u8,
    /// Discovery and wits.
    pub cunning: u8,
    /// Escape chance.
    pub resolve: u8,
    /// Death defiance and item finds.
    pub fortune: u8,
}

impl Stats {
    /// Create a stat block.
    pub const fn new(vigor: u8, cunning: u8, resolve: u8, fortune: u8) -> Self {
        Self {
            vigor,
            cunning,
            resolve,
            fortune,
        }
    }

    /// Every stat set to the same value.
    pub const fn uniform(value: u8) -> Self {
        Self::new(value, value, value, value)
    }

    /// Read one stat.
    pub const fn get(self, stat: Stat) -> u8 {
        match stat {
            Stat::Vigor => self.vigor,
            Stat::Cunning => self.cunning,
            Stat::Resolve => self.resolve,
            Stat::Fortune => self.fortune,
        }
    }

    /// Overwrite one stat.
    pub const fn set(&mut self, stat: Stat, value: u8) {
        match stat {
            Stat::Vigor => self.vigor = value,
            Stat::Cunning => self.cunning = value,
            Stat::Resolve => self.resolve = value,
            Stat::Fortune => self.fortune = value,
        }
    }

    /// Whether every stat lies in `MIN_STAT..=MAX_STAT`.
    pub fn all_in_range(self) -> bool {
        Stat::ALL
            .iter()
            .all(|s| (MIN_STAT..=MAX_STAT).contains(&self.get(*s)))
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(MIN_STAT)
    }
}

// ---------------------------------------------------------------------------
// Explorer
// ---------------------------------------------------------------------------

/// A record of an item picked up during an expedition, held by the
/// explorer until it returns home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FoundItem {
    /// The catalog item that was found.
    pub item_id: ItemId,
    /// Region the item was found in.
    pub found_in_region: RegionId,
    /// Whole in-world day the item was found on.
    pub found_on_day: u32,
}

/// Which stat floors a legacy bonus raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StatFloorTarget {
    /// All four floors.
    All,
    /// A single floor.
    Single(Stat),
}

/// One-time bonus granted to the player when an explorer returns home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LegacyBonus {
    /// The expedition was too short to leave a mark.
    None,
    /// Raise one or all of the player's stat floors by one.
    StatFloor(StatFloorTarget),
    /// A minor item-bonus flag.
    ItemBonus,
}

/// A persistent explorer undergoing (or having finished) a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Explorer {
    /// Unique identifier.
    pub id: ExplorerId,
    /// Owning player.
    pub user_id: UserId,
    /// Display name substituted into narrative text.
    pub name: String,
    /// Innate stats, each 1--10.
    pub stats: Stats,
    /// Chosen specialty.
    pub specialty_id: SpecialtyId,
    /// Chosen personality.
    pub personality_id: PersonalityId,
    /// Carried keepsake, mentioned on death.
    pub keepsake_id: KeepsakeId,
    /// Equipped inventory instances, in equip order.
    pub equipped_items: Vec<PlayerItemId>,
    /// Lifecycle status.
    pub status: ExplorerStatus,
    /// Health, 0--100.
    pub health: u32,
    /// Region the explorer is currently in.
    pub current_region: RegionId,
    /// Elapsed in-world days.
    pub days_alive: f64,
    /// Whether a recall is in progress.
    pub is_recalling: bool,
    /// Remaining days on the journey home; meaningful only while returning.
    pub recall_days_remaining: f64,
    /// Items found so far, oldest first.
    pub found_items: Vec<FoundItem>,
    /// Cause key recorded on death.
    pub cause_of_death: Option<String>,
    /// Bonus granted on a successful return.
    pub legacy_bonus: Option<LegacyBonus>,
    /// When the explorer was enlisted.
    pub created_at: DateTime<Utc>,
    /// Last time any field changed.
    pub updated_at: DateTime<Utc>,
}

impl Explorer {
    /// The whole in-world day used to stamp journal entries.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn journal_day(&self) -> u32 {
        // days_alive is never negative and stays far below u32::MAX.
        self.days_alive.max(0.0).floor() as u32
    }

    /// Whether ticks still act on this explorer.
    pub const fn is_live(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// A partial attribute update to one explorer. `None` leaves a field
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplorerUpdate {
    /// New lifecycle status.
    pub status: Option<ExplorerStatus>,
    /// New health.
    pub health: Option<u32>,
    /// New current region.
    pub current_region: Option<RegionId>,
    /// New elapsed days.
    pub days_alive: Option<f64>,
    /// New recall flag.
    pub is_recalling: Option<bool>,
    /// New remaining recall days.
    pub recall_days_remaining: Option<f64>,
    /// Replacement found-item list.
    pub found_items: Option<Vec<FoundItem>>,
    /// Cause of death.
    pub cause_of_death: Option<String>,
    /// Legacy bonus granted on return.
    pub legacy_bonus: Option<LegacyBonus>,
}

impl ExplorerUpdate {
    /// Whether the update touches no field.
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.health.is_none()
            && self.current_region.is_none()
            && self.days_alive.is_none()
            && self.is_recalling.is_none()
            && self.recall_days_remaining.is_none()
            && self.found_items.is_none()
            && self.cause_of_death.is_none()
            && self.legacy_bonus.is_none()
    }

    /// Write every present field onto `explorer`.
    ///
    /// Status transitions are not checked here; stores validate them
    /// before applying.
    pub fn apply(self, explorer: &mut Explorer) {
        if let Some(status) = self.status {
            explorer.status = status;
        }
        if let Some(health) = self.health {
            explorer.health = health.min(MAX_HEALTH);
        }
        if let Some(region) = self.current_region {
            explorer.current_region = region;
        }
        if let Some(days) = self.days_alive {
            explorer.days_alive = days;
        }
        if let Some(recalling) = self.is_recalling {
            explorer.is_recalling = recalling;
        }
        if let Some(remaining) = self.recall_days_remaining {
            explorer.recall_days_remaining = remaining;
        }
        if let Some(items) = self.found_items {
            explorer.found_items = items;
        }
        if let Some(cause) = self.cause_of_death {
            explorer.cause_of_death = Some(cause);
        }
        if let Some(bonus) = self.legacy_bonus {
            explorer.legacy_bonus = Some(bonus);
        }
        explorer.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

/// An immutable narrative record tied to one explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: JournalEntryId,
    /// The explorer the entry belongs to.
    pub explorer_id: ExplorerId,
    /// Whole in-world day of the entry.
    pub day: u32,
    /// Tick that produced the entry.
    pub tick: u64,
    /// Narrative text with the explorer's name substituted.
    pub text: String,
    /// What kind of event the entry narrates.
    pub event_type: JournalEventType,
    /// Whether the event was significant.
    pub is_significant: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    /// Build a new entry stamped with the current time.
    pub fn new(
        explorer_id: ExplorerId,
        day: u32,
        tick: u64,
        text: String,
        event_type: JournalEventType,
        is_significant: bool,
    ) -> Self {
        Self {
            id: JournalEntryId::new(),
            explorer_id,
            day,
            tick,
            text,
            event_type,
            is_significant,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Player legacy and inventory
// ---------------------------------------------------------------------------

/// Cross-explorer progression for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerLegacy {
    /// The player.
    pub user_id: UserId,
    /// Explorers enlisted.
    pub total_explorers: u32,
    /// Explorers that came home.
    pub total_returns: u32,
    /// Explorers lost.
    pub total_deaths: u32,
    /// Secrets first-discovered.
    pub total_discoveries: u32,
    /// Minimum added to every rolled stat.
    pub stat_floors: Stats,
    /// Non-common specialties the player may roll.
    pub unlocked_specialties: Vec<SpecialtyId>,
}

impl PlayerLegacy {
    /// A fresh legacy: all counters zero, every floor at one.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            total_explorers: 0,
            total_returns: 0,
            total_deaths: 0,
            total_discoveries: 0,
            stat_floors: Stats::default(),
            unlocked_specialties: Vec::new(),
        }
    }

    /// Read one lifetime counter.
    pub const fn counter(&self, counter: LegacyCounter) -> u32 {
        match counter {
            LegacyCounter::Explorers => self.total_explorers,
            LegacyCounter::Returns => self.total_returns,
            LegacyCounter::Deaths => self.total_deaths,
            LegacyCounter::Discoveries => self.total_discoveries,
        }
    }

    /// Add one to a lifetime counter, saturating.
    pub const fn increment(&mut self, counter: LegacyCounter) {
        let slot = match counter {
            LegacyCounter::Explorers => &mut self.total_explorers,
            LegacyCounter::Returns => &mut self.total_returns,
            LegacyCounter::Deaths => &mut self.total_deaths,
            LegacyCounter::Discoveries => &mut self.total_discoveries,
        };
        *slot = slot.saturating_add(1);
    }

    /// Whether a specialty is unlocked for this player.
    pub fn has_unlocked(&self, specialty: &SpecialtyId) -> bool {
        self.unlocked_specialties.contains(specialty)
    }
}

/// A partial update to a player's legacy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyUpdate {
    /// Replacement stat floors.
    pub stat_floors: Option<Stats>,
    /// Replacement unlocked-specialty list.
    pub unlocked_specialties: Option<Vec<SpecialtyId>>,
}

/// An item instance in a player's durable collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlayerItem {
    /// Unique instance identifier.
    pub id: PlayerItemId,
    /// Owning player.
    pub user_id: UserId,
    /// Catalog item.
    pub item_id: ItemId,
    /// Name of the explorer who brought it home, if found.
    pub found_by: Option<String>,
    /// Region it was found in, if found.
    pub found_in: Option<RegionId>,
    /// Day it was found on, if found.
    pub found_on_day: Option<u32>,
    /// Whether an explorer currently carries it.
    pub is_equipped: bool,
    /// When it entered the collection.
    pub created_at: DateTime<Utc>,
}

impl PlayerItem {
    /// A guild-issued item with no discovery provenance.
    pub fn issued(user_id: UserId, item_id: ItemId) -> Self {
        Self {
            id: PlayerItemId::new(),
            user_id,
            item_id,
            found_by: None,
            found_in: None,
            found_on_day: None,
            is_equipped: false,
            created_at: Utc::now(),
        }
    }

    /// An item brought home by a returning explorer.
    pub fn brought_home(user_id: UserId, explorer_name: &str, found: &FoundItem) -> Self {
        Self {
            found_by: Some(explorer_name.to_owned()),
            found_in: Some(found.found_in_region.clone()),
            found_on_day: Some(found.found_on_day),
            ..Self::issued(user_id, found.item_id.clone())
        }
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// The process-wide world record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldState {
    /// Monotonic tick counter.
    pub current_tick: u64,
    /// Explorers ever enlisted.
    pub total_explorers_ever: u64,
    /// Explorers ever lost.
    pub total_deaths_ever: u64,
    /// Explorers ever returned.
    pub total_returns_ever: u64,
    /// Secrets discovered by anyone. Each appears at most once.
    pub discovered_secrets: BTreeSet<SecretId>,
    /// Last time the record changed.
    pub updated_at: DateTime<Utc>,
}

impl WorldState {
    /// Whether a secret has already been claimed.
    pub fn is_discovered(&self, secret: &SecretId) -> bool {
        self.discovered_secrets.contains(secret)
    }

    /// Read one lifetime counter.
    pub const fn counter(&self, counter: WorldCounter) -> u64 {
        match counter {
            WorldCounter::ExplorersEver => self.total_explorers_ever,
            WorldCounter::DeathsEver => self.total_deaths_ever,
            WorldCounter::ReturnsEver => self.total_returns_ever,
        }
    }

    /// Add one to a lifetime counter, saturating.
    pub const fn increment(&mut self, counter: WorldCounter) {
        let slot = match counter {
            WorldCounter::ExplorersEver => &mut self.total_explorers_ever,
            WorldCounter::DeathsEver => &mut self.total_deaths_ever,
            WorldCounter::ReturnsEver => &mut self.total_returns_ever,
        };
        *slot = slot.saturating_add(1);
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            current_tick: 0,
            total_explorers_ever: 0,
            total_deaths_ever: 0,
            total_returns_ever: 0,
            discovered_secrets: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }
}

/// A partial update to the world record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStateUpdate {
    /// New tick counter.
    pub current_tick: Option<u64>,
}

/// The first-discoverer record of a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldDiscovery {
    /// Unique identifier.
    pub id: DiscoveryId,
    /// The secret.
    pub secret_id: SecretId,
    /// Name of the discovering explorer.
    pub discovered_by_explorer: String,
    /// Owner of the discovering explorer.
    pub discovered_by_user: UserId,
    /// Tick of the discovery.
    pub discovered_on_tick: u64,
    /// Region the secret lives in.
    pub region: RegionId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

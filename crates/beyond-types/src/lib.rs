//! Shared type definitions for The Beyond explorer simulation.
//!
//! Every crate in the workspace speaks in these types. Types that reach a
//! front end are exported to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- UUID wrappers for runtime entities and slug wrappers for
//!   static reference data
//! - [`enums`] -- Lifecycle status, journal tags, stats, effect kinds, counters
//! - [`structs`] -- Explorers, journal entries, legacy, inventory, world state

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    EffectKind, ExplorerStatus, ItemSource, JournalEventType, LegacyCounter, Rarity, Stat,
    WorldCounter,
};
pub use ids::{
    DiscoveryId, ExplorerId, ItemId, JournalEntryId, KeepsakeId, PersonalityId, PlayerItemId,
    RegionId, SecretId, SpecialtyId, UserId,
};
pub use structs::{
    Explorer, ExplorerUpdate, FoundItem, JournalEntry, LegacyBonus, LegacyUpdate, MAX_HEALTH,
    MAX_STAT, MIN_STAT, PlayerItem, PlayerLegacy, StatFloorTarget, Stats, WorldDiscovery,
    WorldState, WorldStateUpdate,
};

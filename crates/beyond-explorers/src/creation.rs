//! Explorer creation.
//!
//! Requests are validated against the catalog before anything is written.
//! Stat rolls take the two best of three d4 plus the player's stat floor.

use beyond_types::{
    Explorer, ExplorerId, ExplorerStatus, KeepsakeId, MAX_STAT, MIN_STAT, PersonalityId,
    PlayerItemId, PlayerLegacy, RegionId, SpecialtyId, Stat, Stats, UserId,
};
use beyond_world::{Catalog, RandomSource, Specialty};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;

/// Sides on each stat die.
const STAT_DIE_SIDES: usize = 4;

/// A request to send a new explorer through the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnlistRequest {
    /// Owning player.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Stats, each 1--10.
    pub stats: Stats,
    /// Specialty id.
    pub specialty_id: SpecialtyId,
    /// Personality id.
    pub personality_id: PersonalityId,
    /// Keepsake id.
    pub keepsake_id: KeepsakeId,
    /// Inventory instances to equip.
    #[serde(default)]
    pub equipped_items: Vec<PlayerItemId>,
}

/// Check a request against the catalog.
///
/// Ownership and availability of equipped instances need the inventory
/// store and are checked by the caller.
pub fn validate_enlistment(request: &EnlistRequest, catalog: &Catalog) -> Result<(), ExplorerError> {
    if request.name.trim().is_empty() {
        return Err(ExplorerError::EmptyName);
    }
    if let Some(stat) = Stat::ALL
        .into_iter()
        .find(|s| !(MIN_STAT..=MAX_STAT).contains(&request.stats.get(*s)))
    {
        return Err(ExplorerError::StatOutOfRange {
            stat,
            value: request.stats.get(stat),
        });
    }
    if catalog.specialty(&request.specialty_id).is_none() {
        return Err(ExplorerError::UnknownSpecialty(request.specialty_id.clone()));
    }
    if catalog.personality(&request.personality_id).is_none() {
        return Err(ExplorerError::UnknownPersonality(request.personality_id.clone()));
    }
    if catalog.keepsake(&request.keepsake_id).is_none() {
        return Err(ExplorerError::UnknownKeepsake(request.keepsake_id.clone()));
    }
    Ok(())
}

/// Build a fresh explorer from a validated request.
pub fn new_explorer(request: EnlistRequest, config: &ExplorerConfig) -> Explorer {
    let now = Utc::now();
    Explorer {
        id: ExplorerId::new(),
        user_id: request.user_id,
        name: request.name.trim().to_owned(),
        stats: request.stats,
        specialty_id: request.specialty_id,
        personality_id: request.personality_id,
        keepsake_id: request.keepsake_id,
        equipped_items: request.equipped_items,
        status: ExplorerStatus::Active,
        health: config.starting_health,
        current_region: RegionId::new(config.starting_region.as_str()),
        days_alive: 0.0,
        is_recalling: false,
        recall_days_remaining: 0.0,
        found_items: Vec::new(),
        cause_of_death: None,
        legacy_bonus: None,
        created_at: now,
        updated_at: now,
    }
}

/// Roll four stats on top of the player's floors.
pub fn roll_stats(floors: Stats, rng: &mut impl RandomSource) -> Stats {
    let mut stats = Stats::default();
    for stat in Stat::ALL {
        stats.set(stat, roll_stat(floors.get(stat), rng));
    }
    stats
}

/// Two best of three d4, plus the floor, capped at the stat maximum.
fn roll_stat(floor: u8, rng: &mut impl RandomSource) -> u8 {
    let mut dice = [0_u8; 3];
    for die in &mut dice {
        let face = rng.below(STAT_DIE_SIDES).saturating_add(1);
        *die = u8::try_from(face).unwrap_or(1);
    }
    dice.sort_unstable();
    let [_, mid, high] = dice;
    mid.saturating_add(high).saturating_add(floor).min(MAX_STAT)
}

/// Pick a specialty among the common ones and those the player unlocked.
pub fn roll_specialty<'c>(
    catalog: &'c Catalog,
    legacy: &PlayerLegacy,
    rng: &mut impl RandomSource,
) -> Option<&'c Specialty> {
    let available = catalog.available_specialties(legacy);
    rng.pick(&available).copied()
}

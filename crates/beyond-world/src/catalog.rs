//! Item, specialty, personality, and keepsake definitions.
//!
//! Each definition carries a list of [`Effect`]s. An effect is a closed
//! [`EffectKind`] plus an additive value, optionally limited to one region.

use std::collections::BTreeMap;

use beyond_types::{
    EffectKind, ItemId, ItemSource, KeepsakeId, PersonalityId, PlayerLegacy, Rarity, RegionId,
    SpecialtyId,
};
use serde::{Deserialize, Serialize};

/// Slug of the keepsake meaning "carried nothing". It is never mentioned in
/// death narration.
pub const NOTHING_KEEPSAKE: &str = "nothing";

/// A single additive bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    /// Which modifier the value feeds.
    pub kind: EffectKind,
    /// Additive value; may be negative.
    pub value: f64,
    /// When set, the effect only applies while in this region.
    pub condition: Option<RegionId>,
}

impl Effect {
    /// An unconditional effect.
    pub const fn new(kind: EffectKind, value: f64) -> Self {
        Self {
            kind,
            value,
            condition: None,
        }
    }

    /// An effect that only applies in `region`.
    pub fn in_region(kind: EffectKind, value: f64, region: &str) -> Self {
        Self {
            kind,
            value,
            condition: Some(RegionId::from(region)),
        }
    }

    /// Whether the effect applies in `region`.
    pub fn applies_in(&self, region: &RegionId) -> bool {
        self.condition.as_ref().is_none_or(|c| c == region)
    }
}

/// An item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique slug.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// What the item is.
    pub description: String,
    /// Flavor line appended when the item is found.
    pub flavor_text: String,
    /// How rare it is.
    pub rarity: Rarity,
    /// Guild-issued or found.
    pub source: ItemSource,
    /// Whether the item is used up.
    pub consumable: bool,
    /// Bonuses while equipped.
    pub effects: Vec<Effect>,
}

/// A condition a player must meet before a specialty can be rolled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCondition {
    /// The player has brought home at least this many explorers.
    ReturnedExplorers(u32),
    /// The player has lost at least this many explorers.
    LostExplorers(u32),
    /// One of the player's explorers lived at least this many days.
    SurvivedDays(f64),
}

impl UnlockCondition {
    /// Whether the condition holds for `legacy`, given the longest
    /// expedition just completed.
    pub fn is_met(self, legacy: &PlayerLegacy, days_survived: f64) -> bool {
        match self {
            Self::ReturnedExplorers(n) => legacy.total_returns >= n,
            Self::LostExplorers(n) => legacy.total_deaths >= n,
            Self::SurvivedDays(days) => days_survived >= days,
        }
    }
}

/// A specialty definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    /// Unique slug.
    pub id: SpecialtyId,
    /// Display name.
    pub name: String,
    /// What the specialty does.
    pub description: String,
    /// Common specialties are always available.
    pub rarity: Rarity,
    /// Bonuses granted.
    pub effects: Vec<Effect>,
    /// What unlocks a non-common specialty.
    pub unlock: Option<UnlockCondition>,
}

/// A personality definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// Unique slug.
    pub id: PersonalityId,
    /// Display name.
    pub name: String,
    /// Temperament summary.
    pub description: String,
    /// Bonuses and penalties.
    pub effects: Vec<Effect>,
}

/// A keepsake definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keepsake {
    /// Unique slug.
    pub id: KeepsakeId,
    /// Display name.
    pub name: String,
    /// Line appended to death narration, with `{name}`.
    pub death_mention: String,
}

impl Keepsake {
    /// Whether this is the "carried nothing" sentinel.
    pub fn is_nothing(&self) -> bool {
        self.id.as_str() == NOTHING_KEEPSAKE
    }
}

/// All effect-bearing definitions, keyed by slug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Items.
    pub items: BTreeMap<ItemId, Item>,
    /// Specialties, in declaration order.
    pub specialties: Vec<Specialty>,
    /// Personalities.
    pub personalities: BTreeMap<PersonalityId, Personality>,
    /// Keepsakes.
    pub keepsakes: BTreeMap<KeepsakeId, Keepsake>,
}

impl Catalog {
    /// Look up an item.
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Look up a specialty.
    pub fn specialty(&self, id: &SpecialtyId) -> Option<&Specialty> {
        self.specialties.iter().find(|s| &s.id == id)
    }

    /// Look up a personality.
    pub fn personality(&self, id: &PersonalityId) -> Option<&Personality> {
        self.personalities.get(id)
    }

    /// Look up a keepsake.
    pub fn keepsake(&self, id: &KeepsakeId) -> Option<&Keepsake> {
        self.keepsakes.get(id)
    }

    /// Specialties a player may roll: every common one plus the unlocked
    /// non-common ones, in declaration order.
    pub fn available_specialties(&self, legacy: &PlayerLegacy) -> Vec<&Specialty> {
        self.specialties
            .iter()
            .filter(|s| s.rarity == Rarity::Common || legacy.has_unlocked(&s.id))
            .collect()
    }

    /// Non-common specialties whose unlock condition now holds but which
    /// the player has not unlocked yet.
    pub fn newly_unlocked(&self, legacy: &PlayerLegacy, days_survived: f64) -> Vec<SpecialtyId> {
        self.specialties
            .iter()
            .filter(|s| s.rarity != Rarity::Common && !legacy.has_unlocked(&s.id))
            .filter(|s| s.unlock.is_some_and(|c| c.is_met(legacy, days_survived)))
            .map(|s| s.id.clone())
            .collect()
    }

    /// Guild-issued items.
    pub fn guild_items(&self) -> impl Iterator<Item = &Item> {
        self.items.values().filter(|i| i.source == ItemSource::Guild)
    }
}

#[cfg(test)]
mod tests {
    use beyond_types::UserId;

    use super::*;

    #[test]
    fn conditional_effect_applies_only_in_its_region() {
        let effect = Effect::in_region(EffectKind::SurvivalRegion, 0.2, "crystal_caves");
        assert!(effect.applies_in(&RegionId::from("crystal_caves")));
        assert!(!effect.applies_in(&RegionId::from("mistwood")));
        assert!(Effect::new(EffectKind::RestBonus, 0.1).applies_in(&RegionId::from("mistwood")));
    }

    #[test]
    fn unlock_conditions_read_the_legacy() {
        let mut legacy = PlayerLegacy::new(UserId::new());
        legacy.total_returns = 3;
        legacy.total_deaths = 4;
        assert!(UnlockCondition::ReturnedExplorers(3).is_met(&legacy, 0.0));
        assert!(!UnlockCondition::LostExplorers(5).is_met(&legacy, 0.0));
        assert!(UnlockCondition::SurvivedDays(30.0).is_met(&legacy, 30.25));
        assert!(!UnlockCondition::SurvivedDays(30.0).is_met(&legacy, 29.75));
    }
}

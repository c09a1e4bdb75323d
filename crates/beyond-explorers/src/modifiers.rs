//! Modifier aggregation.
//!
//! An explorer's stats, specialty, personality, and equipped items fold into
//! one additive [`Modifiers`] vector for its current region. The vector is
//! computed fresh every tick and never stored. No clamping happens here;
//! resolvers clamp the probabilities they derive from it.

use beyond_types::{EffectKind, Explorer, ItemId, RegionId, Stats};
use beyond_world::{Catalog, Effect};
use serde::Serialize;
use tracing::trace;

/// The stat value that contributes nothing.
const STAT_BASELINE: f64 = 5.0;

/// Modifier gained per stat point above the baseline.
const STAT_STEP: f64 = 0.02;

/// Death defiance gained per fortune point above the baseline.
const FORTUNE_DEFY_STEP: f64 = 0.015;

/// Nine additive bonuses applied to one explorer for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Modifiers {
    /// Added to survival probability (and return-journey survival).
    pub survival: f64,
    /// Added to the discovery gate.
    pub discovery: f64,
    /// Added to survival probability.
    pub danger_avoid: f64,
    /// Chance to escape a danger unharmed.
    pub escape_chance: f64,
    /// Subtracted from the fatal chance of a danger.
    pub death_defy: f64,
    /// Added to the movement chance.
    pub travel_speed: f64,
    /// Added to the item-find chance.
    pub item_find: f64,
    /// Added to the secret-find chance.
    pub secret_find: f64,
    /// Scales end-of-tick health recovery.
    pub rest_bonus: f64,
}

impl Modifiers {
    /// Baseline contributions of the four stats.
    pub fn from_stats(stats: Stats) -> Self {
        let above = |value: u8| f64::from(value) - STAT_BASELINE;
        Self {
            survival: above(stats.vigor) * STAT_STEP,
            discovery: above(stats.cunning) * STAT_STEP,
            escape_chance: above(stats.resolve) * STAT_STEP,
            death_defy: above(stats.fortune) * FORTUNE_DEFY_STEP,
            item_find: above(stats.fortune) * STAT_STEP,
            ..Self::default()
        }
    }

    /// The field an effect kind feeds.
    const fn slot(&mut self, kind: EffectKind) -> &mut f64 {
        match kind {
            EffectKind::SurvivalBonus | EffectKind::SurvivalRegion => &mut self.survival,
            EffectKind::DiscoveryBonus => &mut self.discovery,
            EffectKind::DangerAvoid => &mut self.danger_avoid,
            EffectKind::EscapeChance => &mut self.escape_chance,
            EffectKind::DeathDefy => &mut self.death_defy,
            EffectKind::TravelSpeed => &mut self.travel_speed,
            EffectKind::ItemFind => &mut self.item_find,
            EffectKind::SecretFind => &mut self.secret_find,
            EffectKind::RestBonus => &mut self.rest_bonus,
        }
    }

    /// Add every effect whose region condition is met.
    pub fn apply(&mut self, effects: &[Effect], region: &RegionId) {
        for effect in effects.iter().filter(|e| e.applies_in(region)) {
            *self.slot(effect.kind) += effect.value;
        }
    }
}

/// Aggregate an explorer's modifiers for its current region.
///
/// `equipped` holds the catalog ids behind the explorer's equipped
/// inventory instances. Specialty, personality, or item ids missing from the
/// catalog contribute nothing.
pub fn aggregate(explorer: &Explorer, catalog: &Catalog, equipped: &[ItemId]) -> Modifiers {
    let region = &explorer.current_region;
    let mut mods = Modifiers::from_stats(explorer.stats);

    match catalog.specialty(&explorer.specialty_id) {
        Some(specialty) => mods.apply(&specialty.effects, region),
        None => trace!(specialty = %explorer.specialty_id, "Unknown specialty skipped"),
    }
    match catalog.personality(&explorer.personality_id) {
        Some(personality) => mods.apply(&personality.effects, region),
        None => trace!(personality = %explorer.personality_id, "Unknown personality skipped"),
    }
    for id in equipped {
        match catalog.item(id) {
            Some(item) => mods.apply(&item.effects, region),
            None => trace!(item = %id, "Unknown item skipped"),
        }
    }

    mods
}

#[cfg(test)]
mod tests {
    use beyond_types::{PersonalityId, SpecialtyId};
    use beyond_world::create_starting_catalog;

    use super::*;
    use crate::testing::explorer_in;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn average_stats_contribute_nothing() {
        assert_eq!(Modifiers::from_stats(Stats::uniform(5)), Modifiers::default());
    }

    #[test]
    fn stat_formulas() {
        let mods = Modifiers::from_stats(Stats::new(10, 1, 7, 9));
        assert!(close(mods.survival, 0.10));
        assert!(close(mods.discovery, -0.08));
        assert!(close(mods.escape_chance, 0.04));
        assert!(close(mods.death_defy, 0.06));
        assert!(close(mods.item_find, 0.08));
    }

    #[test]
    fn region_conditions_gate_item_effects() {
        let catalog = create_starting_catalog();
        let lantern = [ItemId::from("lantern"), ItemId::from("rope")];

        let in_caves = explorer_in("crystal_caves");
        let mods = aggregate(&in_caves, &catalog, &lantern);
        // scout specialty, bold personality
        assert!(close(mods.survival, 0.45));
        assert!(close(mods.escape_chance, 0.15));
        assert!(close(mods.danger_avoid, 0.1));
        assert!(close(mods.travel_speed, 0.35));

        let in_mistwood = explorer_in("mistwood");
        let mods = aggregate(&in_mistwood, &catalog, &lantern);
        assert!(close(mods.survival, 0.0));
    }

    #[test]
    fn unknown_references_are_skipped() {
        let catalog = create_starting_catalog();
        let mut explorer = explorer_in("mistwood");
        explorer.specialty_id = SpecialtyId::from("juggler");
        explorer.personality_id = PersonalityId::from("grumpy");
        let mods = aggregate(&explorer, &catalog, &[ItemId::from("moonbeam")]);
        assert_eq!(mods, Modifiers::default());
    }

    #[test]
    fn aggregation_is_repeatable() {
        let catalog = create_starting_catalog();
        let explorer = explorer_in("the_depths");
        let items = [ItemId::from("glowstone"), ItemId::from("depth_lantern")];
        let first = aggregate(&explorer, &catalog, &items);
        let second = aggregate(&explorer, &catalog, &items);
        assert_eq!(first.survival.to_bits(), second.survival.to_bits());
        assert_eq!(first, second);
    }
}

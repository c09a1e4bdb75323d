//! Survival resolution.
//!
//! Runs first every tick for active explorers. One roll against the clamped
//! survival probability decides whether a danger fires; a fired danger ends
//! in exactly one of escape, death, or injury.

use beyond_types::Explorer;
use beyond_world::{NarrativeTemplates, RandomSource, Region};

use crate::config::ExplorerConfig;
use crate::death::DeathCause;
use crate::modifiers::Modifiers;

/// The result of a danger that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DangerOutcome {
    /// Got away unharmed.
    Escaped {
        /// Journal text.
        text: String,
    },
    /// Hurt but alive.
    Injured {
        /// Health lost.
        damage: u32,
        /// Health after the injury (always above zero).
        health: u32,
        /// Journal text.
        text: String,
    },
    /// Killed. The death processor takes over.
    Died {
        /// Why.
        cause: DeathCause,
    },
}

/// Probability that a tick passes without danger, clamped to the configured
/// floor and ceiling.
pub fn survival_chance(
    health: u32,
    region: &Region,
    mods: &Modifiers,
    config: &ExplorerConfig,
) -> f64 {
    let mut chance = f64::from(region.danger_level).mul_add(-config.danger_step, 1.0);
    chance += mods.survival + mods.danger_avoid;

    if health < config.critical_health {
        chance -= config.critical_penalty;
    } else if health < config.wounded_health {
        chance -= config.wounded_penalty;
    }

    chance.clamp(config.survival_floor, config.survival_ceiling)
}

/// Roll for danger. `None` means the tick passed safely.
///
/// Draw order: the survival roll, then the escape roll, then the fatal roll,
/// then the injury damage, then the narrative pick.
pub fn resolve_survival(
    explorer: &Explorer,
    region: &Region,
    mods: &Modifiers,
    config: &ExplorerConfig,
    templates: &NarrativeTemplates,
    rng: &mut impl RandomSource,
) -> Option<DangerOutcome> {
    let threshold = survival_chance(explorer.health, region, mods, config);
    if rng.roll() <= threshold {
        return None;
    }

    if rng.chance(mods.escape_chance) {
        let text = templates.escape(&region.id, &explorer.name, rng);
        return Some(DangerOutcome::Escaped { text });
    }

    let fatal = (config.base_death_chance - mods.death_defy).max(config.death_chance_floor);
    if rng.chance(fatal) {
        return Some(DangerOutcome::Died {
            cause: DeathCause::Region(region.id.clone()),
        });
    }

    let damage = injury_damage(config, rng);
    let health = explorer.health.saturating_sub(damage);
    if health == 0 {
        return Some(DangerOutcome::Died {
            cause: DeathCause::Injuries,
        });
    }

    let text = templates.injury(&region.id, &explorer.name, rng);
    Some(DangerOutcome::Injured {
        damage,
        health,
        text,
    })
}

/// Base damage plus a uniform integer below the spread.
fn injury_damage(config: &ExplorerConfig, rng: &mut impl RandomSource) -> u32 {
    let spread = usize::try_from(config.injury_damage_spread).unwrap_or(usize::MAX);
    let extra = u32::try_from(rng.below(spread)).unwrap_or(0);
    config.injury_base_damage.saturating_add(extra)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use beyond_types::RegionId;
    use beyond_world::{RngDice, ScriptedDice, create_starting_world};

    use super::*;
    use crate::testing::explorer_in;

    fn region(id: &str) -> Region {
        let graph = create_starting_world().unwrap();
        graph.get(&RegionId::from(id)).cloned().unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn summit_survival_for_average_explorer() {
        let config = ExplorerConfig::default();
        let summit = region("the_summit");
        let mods = Modifiers::default();
        assert!(close(survival_chance(100, &summit, &mods, &config), 0.28));
    }

    #[test]
    fn critical_health_penalty() {
        let config = ExplorerConfig::default();
        let summit = region("the_summit");
        let mods = Modifiers::default();
        assert!(close(survival_chance(20, &summit, &mods, &config), 0.13));
        assert!(close(survival_chance(40, &summit, &mods, &config), 0.23));
        assert!(close(survival_chance(50, &summit, &mods, &config), 0.28));
    }

    #[test]
    fn probability_stays_clamped_for_extreme_modifiers() {
        let config = ExplorerConfig::default();
        let summit = region("the_summit");
        let gate = region("the_gate");
        let huge = Modifiers {
            survival: 50.0,
            danger_avoid: 50.0,
            ..Modifiers::default()
        };
        let awful = Modifiers {
            survival: -50.0,
            danger_avoid: -50.0,
            ..Modifiers::default()
        };
        for health in [0, 10, 45, 100] {
            for region in [&summit, &gate] {
                for mods in [&huge, &awful, &Modifiers::default()] {
                    let p = survival_chance(health, region, mods, &config);
                    assert!((0.10..=0.98).contains(&p), "{p}");
                }
            }
        }
        assert!(close(survival_chance(100, &gate, &huge, &config), 0.98));
        assert!(close(survival_chance(0, &summit, &awful, &config), 0.10));
    }

    #[test]
    fn safe_roll_produces_no_event() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_summit");
        let mut rng = ScriptedDice::new([0.2]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_summit"),
            &Modifiers::default(),
            &config,
            &templates,
            &mut rng,
        );
        assert_eq!(outcome, None);
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn escape_wins_before_death() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_summit");
        let mods = Modifiers {
            escape_chance: 0.5,
            ..Modifiers::default()
        };
        let mut rng = ScriptedDice::new([0.9, 0.1, 0.0]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_summit"),
            &mods,
            &config,
            &templates,
            &mut rng,
        );
        assert!(matches!(outcome, Some(DangerOutcome::Escaped { .. })));
    }

    #[test]
    fn fatal_roll_dies_in_region() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_depths");
        let mut rng = ScriptedDice::new([0.99, 0.9, 0.2]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_depths"),
            &Modifiers::default(),
            &config,
            &templates,
            &mut rng,
        );
        assert_eq!(
            outcome,
            Some(DangerOutcome::Died {
                cause: DeathCause::Region(RegionId::from("the_depths")),
            })
        );
    }

    #[test]
    fn death_defy_never_goes_below_floor() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_depths");
        let mods = Modifiers {
            death_defy: 5.0,
            ..Modifiers::default()
        };
        let mut rng = ScriptedDice::new([0.99, 0.9, 0.04]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_depths"),
            &mods,
            &config,
            &templates,
            &mut rng,
        );
        assert!(matches!(outcome, Some(DangerOutcome::Died { .. })));
    }

    #[test]
    fn injury_damages_health() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_depths");
        // damage roll 0.5 -> 20 + 10
        let mut rng = ScriptedDice::new([0.99, 0.9, 0.9, 0.5, 0.0]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_depths"),
            &Modifiers::default(),
            &config,
            &templates,
            &mut rng,
        );
        let Some(DangerOutcome::Injured {
            damage,
            health,
            text,
        }) = outcome
        else {
            panic!("expected injury, got {outcome:?}");
        };
        assert_eq!(damage, 30);
        assert_eq!(health, 70);
        assert!(text.contains("Ada"));
    }

    #[test]
    fn lethal_injury_dies_of_injuries() {
        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let mut explorer = explorer_in("the_depths");
        explorer.health = 25;
        let mut rng = ScriptedDice::new([0.99, 0.9, 0.9, 0.99]);
        let outcome = resolve_survival(
            &explorer,
            &region("the_depths"),
            &Modifiers::default(),
            &config,
            &templates,
            &mut rng,
        );
        assert_eq!(
            outcome,
            Some(DangerOutcome::Died {
                cause: DeathCause::Injuries,
            })
        );
    }

    #[test]
    fn danger_rate_at_danger_level_one_is_eight_percent() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let config = ExplorerConfig::default();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_gate");
        let gate = region("the_gate");
        let mods = Modifiers::default();
        let mut rng = RngDice::new(SmallRng::seed_from_u64(7));

        let draws = 100_000_u32;
        let mut dangers = 0_u32;
        for _ in 0..draws {
            if resolve_survival(&explorer, &gate, &mods, &config, &templates, &mut rng).is_some() {
                dangers += 1;
            }
        }
        let rate = f64::from(dangers) / f64::from(draws);
        // three standard deviations is about 0.0026
        assert!((rate - 0.08).abs() < 0.005, "danger rate {rate}");
    }
}

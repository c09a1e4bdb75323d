//! Tunables for explorer resolution.
//!
//! These values correspond to the `explorers` section of
//! `beyond-config.yaml`. The [`ExplorerConfig`] struct bundles every
//! constant the resolvers use so that callers (tick orchestrator, tests)
//! can override defaults. Missing YAML keys take the defaults below.

use serde::{Deserialize, Serialize};

/// Configuration for per-explorer tick resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// In-world days that pass per tick (default: 0.25).
    pub days_per_tick: f64,

    // -- survival --
    /// Survival lost per point of region danger (default: 0.08).
    pub danger_step: f64,
    /// Lowest survival probability after modifiers (default: 0.10).
    pub survival_floor: f64,
    /// Highest survival probability after modifiers (default: 0.98).
    pub survival_ceiling: f64,
    /// Health below which the critical penalty applies (default: 30).
    pub critical_health: u32,
    /// Survival penalty for critical health (default: 0.15).
    pub critical_penalty: f64,
    /// Health below which the wounded penalty applies (default: 50).
    pub wounded_health: u32,
    /// Survival penalty for wounded health (default: 0.05).
    pub wounded_penalty: f64,
    /// Chance a danger is fatal before death defiance (default: 0.25).
    pub base_death_chance: f64,
    /// Fatal chance never drops below this (default: 0.05).
    pub death_chance_floor: f64,
    /// Fixed part of injury damage (default: 20).
    pub injury_base_damage: u32,
    /// Injury adds a uniform integer in `[0, spread)` (default: 20).
    pub injury_damage_spread: u32,

    // -- discovery --
    /// Base chance a discovery is attempted at all (default: 0.10).
    pub discovery_gate: f64,
    /// Base chance to uncover a secret (default: 0.05).
    pub secret_base: f64,
    /// Base chance to find a region item (default: 0.10).
    pub item_base: f64,

    // -- movement and narration --
    /// Base chance to relocate (default: 0.15).
    pub movement_base: f64,
    /// Chance to prefer a connection leading away from the gate (default: 0.70).
    pub forward_bias: f64,
    /// Explorers must have lived longer than this to move (default: 1.0).
    pub min_days_before_moving: f64,
    /// Chance of an ambient entry on an uneventful tick (default: 0.70).
    pub quiet_chance: f64,
    /// Health recovered per tick is `round(rest_bonus * scale)` (default: 5.0).
    pub rest_recovery_scale: f64,

    // -- return journey --
    /// Base chance a returning tick passes without a hazard (default: 0.85).
    pub return_base_survival: f64,
    /// Chance a return hazard is fatal (default: 0.30).
    pub return_fatal_chance: f64,
    /// Days added by a non-fatal delay (default: 0.5).
    pub return_delay_days: f64,
    /// Health lost in a non-fatal delay (default: 15).
    pub return_delay_damage: u32,
    /// Chance a delay costs the most recently found item (default: 0.20).
    pub item_loss_chance: f64,

    // -- recall estimate --
    /// Days added to the gate distance when recalling (default: 0.5).
    pub recall_base_days: f64,
    /// Upper bound of the random extra recall days (default: 0.5).
    pub recall_jitter_days: f64,
    /// Survival estimate before distance (default: 0.85).
    pub recall_base_survival: f64,
    /// Survival estimate lost per hop from the gate (default: 0.1).
    pub recall_distance_penalty: f64,
    /// Lowest survival estimate (default: 0.5).
    pub recall_min_survival: f64,

    // -- legacy --
    /// Days alive that raise every stat floor (default: 30).
    pub legacy_all_floors_days: f64,
    /// Days alive that raise one random stat floor (default: 15).
    pub legacy_single_floor_days: f64,
    /// Days alive that grant the item bonus flag (default: 7).
    pub legacy_item_bonus_days: f64,
    /// Highest value a stat floor can reach (default: 5).
    pub stat_floor_cap: u8,

    // -- enlistment --
    /// Health of a new explorer (default: 100).
    pub starting_health: u32,
    /// Region new explorers start in (default: `the_gate`).
    pub starting_region: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            days_per_tick: 0.25,
            danger_step: 0.08,
            survival_floor: 0.10,
            survival_ceiling: 0.98,
            critical_health: 30,
            critical_penalty: 0.15,
            wounded_health: 50,
            wounded_penalty: 0.05,
            base_death_chance: 0.25,
            death_chance_floor: 0.05,
            injury_base_damage: 20,
            injury_damage_spread: 20,
            discovery_gate: 0.10,
            secret_base: 0.05,
            item_base: 0.10,
            movement_base: 0.15,
            forward_bias: 0.70,
            min_days_before_moving: 1.0,
            quiet_chance: 0.70,
            rest_recovery_scale: 5.0,
            return_base_survival: 0.85,
            return_fatal_chance: 0.30,
            return_delay_days: 0.5,
            return_delay_damage: 15,
            item_loss_chance: 0.20,
            recall_base_days: 0.5,
            recall_jitter_days: 0.5,
            recall_base_survival: 0.85,
            recall_distance_penalty: 0.1,
            recall_min_survival: 0.5,
            legacy_all_floors_days: 30.0,
            legacy_single_floor_days: 15.0,
            legacy_item_bonus_days: 7.0,
            stat_floor_cap: 5,
            starting_health: 100,
            starting_region: String::from(beyond_world::GATE),
        }
    }
}

impl ExplorerConfig {
    /// Health recovered at the end of an active tick.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rest_recovery(&self, rest_bonus: f64) -> u32 {
        // Clamped to a small non-negative range before the cast.
        (rest_bonus * self.rest_recovery_scale)
            .round()
            .clamp(0.0, f64::from(beyond_types::MAX_HEALTH)) as u32
    }
}

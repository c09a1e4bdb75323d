//! The journey home.
//!
//! Each tick a returning explorer first advances: remaining recall days
//! drop and elapsed days grow by one tick's worth. The hazard roll and the
//! arrival check then see the advanced values. A fatal hazard hands the
//! explorer to the death processor; a delay pushes arrival back, costs
//! health, and may cost the most recently found item.

use beyond_types::{
    Explorer, ExplorerStatus, ExplorerUpdate, FoundItem, LegacyBonus, Stat, StatFloorTarget,
    Stats,
};
use beyond_world::RandomSource;

use crate::config::ExplorerConfig;
use crate::modifiers::Modifiers;

/// Where a returning explorer stands after this tick's hazard roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// A fatal hazard. The explorer dies with cause `lost_returning`.
    Lost,
    /// The explorer reached the gate.
    Arrived,
    /// Still on the road.
    EnRoute,
}

/// One tick of progress on the way home.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStep {
    /// What happened.
    pub outcome: ReturnOutcome,
    /// Elapsed days after this tick.
    pub days_alive: f64,
    /// Remaining recall days after this tick.
    pub recall_days_remaining: f64,
    /// Health after this tick.
    pub health: u32,
    /// Found items still carried.
    pub found_items: Vec<FoundItem>,
    /// Whether a non-fatal delay happened.
    pub delayed: bool,
    /// The item dropped during a delay, if any.
    pub lost_item: Option<FoundItem>,
}

impl ReturnStep {
    /// Persisted progress for an explorer still on the road (or about to be
    /// finalized by the caller).
    pub fn progress_update(&self) -> ExplorerUpdate {
        ExplorerUpdate {
            health: Some(self.health),
            days_alive: Some(self.days_alive),
            recall_days_remaining: Some(self.recall_days_remaining),
            found_items: Some(self.found_items.clone()),
            ..ExplorerUpdate::default()
        }
    }
}

/// Advance a returning explorer by one tick.
///
/// Draw order: the hazard roll; on a hazard the fatal roll; on a delay the
/// item-loss roll, drawn even when nothing is carried.
pub fn advance_return(
    explorer: &Explorer,
    mods: &Modifiers,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> ReturnStep {
    let mut step = ReturnStep {
        outcome: ReturnOutcome::EnRoute,
        days_alive: explorer.days_alive + config.days_per_tick,
        recall_days_remaining: explorer.recall_days_remaining - config.days_per_tick,
        health: explorer.health,
        found_items: explorer.found_items.clone(),
        delayed: false,
        lost_item: None,
    };

    let survival = config.return_base_survival + mods.survival;
    if rng.roll() > survival {
        if rng.chance(config.return_fatal_chance) {
            step.outcome = ReturnOutcome::Lost;
            return step;
        }
        step.delayed = true;
        step.recall_days_remaining += config.return_delay_days;
        step.health = step.health.saturating_sub(config.return_delay_damage);
        if rng.chance(config.item_loss_chance) {
            step.lost_item = step.found_items.pop();
        }
    }

    if step.recall_days_remaining <= 0.0 {
        step.outcome = ReturnOutcome::Arrived;
    }
    step
}

/// The one-time legacy bonus for an explorer that came home after
/// `days_alive` days.
///
/// Only the single-floor tier draws, to pick the stat.
pub fn legacy_bonus_for(
    days_alive: f64,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> LegacyBonus {
    if days_alive >= config.legacy_all_floors_days {
        LegacyBonus::StatFloor(StatFloorTarget::All)
    } else if days_alive >= config.legacy_single_floor_days {
        rng.pick(&Stat::ALL).map_or(LegacyBonus::None, |stat| {
            LegacyBonus::StatFloor(StatFloorTarget::Single(*stat))
        })
    } else if days_alive >= config.legacy_item_bonus_days {
        LegacyBonus::ItemBonus
    } else {
        LegacyBonus::None
    }
}

/// The player's stat floors after a bonus, each capped at `cap`. `None`
/// when the bonus does not touch floors.
pub fn raised_floors(floors: Stats, bonus: LegacyBonus, cap: u8) -> Option<Stats> {
    let LegacyBonus::StatFloor(target) = bonus else {
        return None;
    };
    let raise = |value: u8| value.saturating_add(1).min(cap.max(value));
    let mut raised = floors;
    match target {
        StatFloorTarget::All => {
            for stat in Stat::ALL {
                raised.set(stat, raise(floors.get(stat)));
            }
        }
        StatFloorTarget::Single(stat) => raised.set(stat, raise(floors.get(stat))),
    }
    Some(raised)
}

/// The explorer update that finalizes an arrival.
pub fn arrival_update(step: &ReturnStep, bonus: LegacyBonus) -> ExplorerUpdate {
    ExplorerUpdate {
        status: Some(ExplorerStatus::Returned),
        is_recalling: Some(false),
        recall_days_remaining: Some(0.0),
        legacy_bonus: Some(bonus),
        ..step.progress_update()
    }
}

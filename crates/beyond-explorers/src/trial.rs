//! Personality trial scoring.
//!
//! Each answer casts one vote for a personality and adds a point to one
//! stat. The personality with the most votes wins; a tie is settled with a
//! single random pick among the leaders.

use std::collections::BTreeMap;

use beyond_types::{MAX_STAT, PersonalityId, Stat, Stats};
use beyond_world::{RandomSource, TRIAL_LENGTH, TRIAL_SCENARIOS, TrialScenario, trial_scenario};
use serde::{Deserialize, Serialize};

use crate::error::ExplorerError;

/// The player's pick for one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialAnswer {
    /// Scene slug.
    pub scenario_id: String,
    /// Zero-based option index.
    pub option_index: usize,
}

impl TrialAnswer {
    /// Answer `scenario` with the option at `option_index`.
    pub fn new(scenario: &str, option_index: usize) -> Self {
        Self {
            scenario_id: scenario.to_owned(),
            option_index,
        }
    }
}

/// The personality a trial settled on and the stat points it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialResult {
    /// Winning personality.
    pub personality: PersonalityId,
    /// Points earned per stat; zero where no answer favored it.
    pub stat_bonuses: Stats,
}

impl TrialResult {
    /// `stats` with the earned points added, capped at the stat maximum.
    pub fn boost(&self, stats: Stats) -> Stats {
        let mut boosted = stats;
        for stat in Stat::ALL {
            let value = stats.get(stat).saturating_add(self.stat_bonuses.get(stat));
            boosted.set(stat, value.min(MAX_STAT));
        }
        boosted
    }
}

/// Draw the scenes for one trial, without repeats.
pub fn draw_trial(rng: &mut impl RandomSource) -> Vec<&'static TrialScenario> {
    let mut pool: Vec<&'static TrialScenario> = TRIAL_SCENARIOS.iter().collect();
    let mut drawn = Vec::with_capacity(TRIAL_LENGTH);
    while drawn.len() < TRIAL_LENGTH && !pool.is_empty() {
        drawn.push(pool.swap_remove(rng.below(pool.len())));
    }
    drawn
}

/// Score a completed trial.
///
/// # Errors
///
/// Returns [`ExplorerError::TrialAnswerCount`] unless exactly one answer per
/// drawn scene is given, [`ExplorerError::UnknownScenario`] for a scene that
/// does not exist, and [`ExplorerError::InvalidTrialOption`] for an option
/// index the scene does not have.
pub fn resolve_trial(
    answers: &[TrialAnswer],
    rng: &mut impl RandomSource,
) -> Result<TrialResult, ExplorerError> {
    if answers.len() != TRIAL_LENGTH {
        return Err(ExplorerError::TrialAnswerCount {
            expected: TRIAL_LENGTH,
            got: answers.len(),
        });
    }

    let mut votes: BTreeMap<&'static str, u32> = BTreeMap::new();
    let mut stat_bonuses = Stats::new(0, 0, 0, 0);
    for answer in answers {
        let scenario = trial_scenario(&answer.scenario_id)
            .ok_or_else(|| ExplorerError::UnknownScenario(answer.scenario_id.clone()))?;
        let option = scenario.option(answer.option_index).ok_or_else(|| {
            ExplorerError::InvalidTrialOption {
                scenario: answer.scenario_id.clone(),
                index: answer.option_index,
            }
        })?;
        let count = votes.entry(option.personality).or_default();
        *count = count.saturating_add(1);
        stat_bonuses.set(option.bonus, stat_bonuses.get(option.bonus).saturating_add(1));
    }

    let most = votes.values().copied().max().unwrap_or_default();
    let leaders: Vec<&'static str> = votes
        .iter()
        .filter(|(_, n)| **n == most)
        .map(|(p, _)| *p)
        .collect();
    let personality = rng
        .pick(&leaders)
        .copied()
        .ok_or(ExplorerError::TrialAnswerCount {
            expected: TRIAL_LENGTH,
            got: 0,
        })?;

    Ok(TrialResult {
        personality: PersonalityId::from(personality),
        stat_bonuses,
    })
}

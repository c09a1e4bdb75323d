//! Recall: turning an active explorer toward home.

use beyond_types::{Explorer, ExplorerStatus, ExplorerUpdate};
use beyond_world::{RandomSource, RegionGraph};
use serde::Serialize;

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;

/// What the player is told when a recall starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecallPlan {
    /// Days until the explorer reaches the gate, barring delays.
    pub estimated_days: f64,
    /// Rough odds of making it home.
    pub survival_chance: f64,
}

impl RecallPlan {
    /// The explorer update that starts the journey home.
    pub fn update(&self) -> ExplorerUpdate {
        ExplorerUpdate {
            status: Some(ExplorerStatus::Returning),
            is_recalling: Some(true),
            recall_days_remaining: Some(self.estimated_days),
            ..ExplorerUpdate::default()
        }
    }
}

/// Plan a recall for `explorer`.
///
/// Only active explorers in a known region can be recalled. The estimate is
/// the gate distance plus a base and a random jitter; the survival estimate
/// shrinks with distance down to a floor.
pub fn plan_recall(
    explorer: &Explorer,
    graph: &RegionGraph,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> Result<RecallPlan, ExplorerError> {
    if explorer.status != ExplorerStatus::Active {
        return Err(ExplorerError::NotActive {
            id: explorer.id,
            status: explorer.status,
        });
    }
    let region = graph
        .get(&explorer.current_region)
        .ok_or_else(|| ExplorerError::UnknownRegion(explorer.current_region.clone()))?;

    let distance = f64::from(region.distance_from_gate);
    let estimated_days = rng
        .roll()
        .mul_add(config.recall_jitter_days, distance + config.recall_base_days);
    let survival_chance = distance
        .mul_add(-config.recall_distance_penalty, config.recall_base_survival)
        .max(config.recall_min_survival);

    Ok(RecallPlan {
        estimated_days,
        survival_chance,
    })
}

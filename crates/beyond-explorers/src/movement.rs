//! Movement along the region graph.

use beyond_types::{Explorer, RegionId};
use beyond_world::{RandomSource, Region, RegionGraph, narrative};

use crate::config::ExplorerConfig;
use crate::modifiers::Modifiers;

/// A move to a connected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Destination.
    pub to: RegionId,
    /// Journal text.
    pub text: String,
}

/// Decide whether the explorer moves this tick, and where.
///
/// Explorers that have not yet lived past the minimum stay put without a
/// roll. Otherwise one roll decides whether to move. When connections lead
/// further from the gate, a second roll prefers one of them; failing that,
/// any connection is picked.
pub fn resolve_movement(
    explorer: &Explorer,
    region: &Region,
    graph: &RegionGraph,
    mods: &Modifiers,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> Option<Relocation> {
    if explorer.days_alive <= config.min_days_before_moving {
        return None;
    }
    if !rng.chance(config.movement_base + mods.travel_speed) || !region.has_connections() {
        return None;
    }

    let forward = graph.forward_connections(region);
    let choice = if !forward.is_empty() && rng.chance(config.forward_bias) {
        rng.pick(&forward)
    } else {
        rng.pick(&region.connected_to)
    }?;

    let target = graph.get(choice)?;
    Some(Relocation {
        to: target.id.clone(),
        text: narrative::movement(&explorer.name, &target.name, &target.description),
    })
}

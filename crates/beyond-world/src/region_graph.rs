//! The world graph: regions as nodes, connections as directed edges.
//!
//! The graph is fixed after construction. [`RegionGraph::from_regions`]
//! rejects duplicate ids, connections to unknown regions, and danger or
//! richness values outside 1--10, so lookups during a tick only fail when an
//! explorer carries a region id that was never part of the world.

use std::collections::BTreeMap;

use beyond_types::RegionId;
use tracing::debug;

use crate::error::WorldError;
use crate::region::Region;

/// The region graph.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RegionGraph {
    /// All regions indexed by id.
    regions: BTreeMap<RegionId, Region>,
}

impl RegionGraph {
    /// Build and validate a graph.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateRegion`], [`WorldError::OutOfRange`],
    /// or [`WorldError::UnknownConnection`] when the definitions are
    /// inconsistent.
    pub fn from_regions(regions: impl IntoIterator<Item = Region>) -> Result<Self, WorldError> {
        let mut map = BTreeMap::new();
        for region in regions {
            for (field, value) in [
                ("danger_level", region.danger_level),
                ("discovery_richness", region.discovery_richness),
            ] {
                if !(1..=10).contains(&value) {
                    return Err(WorldError::OutOfRange {
                        region: region.id,
                        field,
                        value,
                    });
                }
            }
            if map.contains_key(&region.id) {
                return Err(WorldError::DuplicateRegion(region.id));
            }
            map.insert(region.id.clone(), region);
        }

        for region in map.values() {
            if let Some(target) = region
                .connected_to
                .iter()
                .find(|target| !map.contains_key(*target))
            {
                return Err(WorldError::UnknownConnection {
                    region: region.id.clone(),
                    target: target.clone(),
                });
            }
        }

        debug!(regions = map.len(), "region graph validated");
        Ok(Self { regions: map })
    }

    /// Look up a region.
    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Whether a region exists.
    pub fn contains(&self, id: &RegionId) -> bool {
        self.regions.contains_key(id)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the graph has no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate regions in id order.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Connections of `region` that lead further from the gate, in
    /// declaration order.
    pub fn forward_connections(&self, region: &Region) -> Vec<RegionId> {
        region
            .connected_to
            .iter()
            .filter(|id| {
                self.get(id)
                    .is_some_and(|target| target.distance_from_gate > region.distance_from_gate)
            })
            .cloned()
            .collect()
    }
}

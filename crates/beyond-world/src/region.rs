//! Region nodes and their secrets.

use std::collections::BTreeSet;

use beyond_types::{ItemId, RegionId, SecretId};
use serde::{Deserialize, Serialize};

/// A region-bound secret. Each can be discovered once across the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    /// Unique slug.
    pub id: SecretId,
    /// Display name.
    pub name: String,
    /// What the secret is.
    pub description: String,
    /// Journal text written by the first discoverer, with `{name}`.
    pub discovered_text: String,
}

/// A node in the fixed world graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique slug.
    pub id: RegionId,
    /// Display name used in movement narration.
    pub name: String,
    /// One-line description appended to movement narration.
    pub description: String,
    /// How dangerous the region is, 1--10.
    pub danger_level: u8,
    /// How much there is to find, 1--10.
    pub discovery_richness: u8,
    /// Regions reachable in one move, in declaration order.
    pub connected_to: Vec<RegionId>,
    /// Hops from the starting gate.
    pub distance_from_gate: u32,
    /// Secrets hidden here.
    pub secrets: Vec<Secret>,
    /// Catalog items that can be found here.
    pub possible_items: Vec<ItemId>,
}

impl Region {
    /// Secrets in this region that nobody has discovered yet, in
    /// declaration order.
    pub fn undiscovered_secrets(&self, discovered: &BTreeSet<SecretId>) -> Vec<&Secret> {
        self.secrets
            .iter()
            .filter(|s| !discovered.contains(&s.id))
            .collect()
    }

    /// Whether the region has any outgoing connection.
    pub fn has_connections(&self) -> bool {
        !self.connected_to.is_empty()
    }
}

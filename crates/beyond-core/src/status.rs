//! Read-only world status for dashboards and logs.

use beyond_db::{DbError, Stores};
use beyond_types::{RegionId, SecretId, UserId};
use beyond_world::ReferenceData;
use serde::Serialize;

/// A claimed secret and who claimed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredSecret {
    /// The secret.
    pub secret_id: SecretId,
    /// Display name, or the slug if the region data no longer lists it.
    pub name: String,
    /// Region it was found in.
    pub region: RegionId,
    /// Name of the first discoverer.
    pub discovered_by: String,
    /// Owner of the first discoverer.
    pub discovered_by_user: UserId,
    /// Tick of the discovery.
    pub discovered_on_tick: u64,
}

/// One region's live picture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionStatus {
    /// Region id.
    pub id: RegionId,
    /// Display name.
    pub name: String,
    /// Live explorers currently there.
    pub explorers: u32,
    /// Danger level, 1--10.
    pub danger_level: u8,
    /// Discovery richness, 1--10.
    pub discovery_richness: u8,
}

/// Snapshot of the whole world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldStatus {
    /// Last completed tick.
    pub tick: u64,
    /// Explorers ever enlisted.
    pub total_explorers_ever: u64,
    /// Explorers ever lost.
    pub total_deaths_ever: u64,
    /// Explorers ever returned.
    pub total_returns_ever: u64,
    /// Claimed secrets, oldest first.
    pub discovered_secrets: Vec<DiscoveredSecret>,
    /// Every region in the graph.
    pub regions: Vec<RegionStatus>,
}

/// Gather the current world status.
///
/// # Errors
///
/// Returns [`DbError`] if the store cannot be read.
pub async fn world_status<S: Stores>(
    store: &S,
    reference: &ReferenceData,
) -> Result<WorldStatus, DbError> {
    let world = store.world().await?;
    let discoveries = store.discoveries().await?;
    let counts = store.region_counts().await?;

    let discovered_secrets = discoveries
        .into_iter()
        .map(|d| {
            let name = reference
                .regions
                .get(&d.region)
                .and_then(|r| r.secrets.iter().find(|s| s.id == d.secret_id))
                .map_or_else(|| d.secret_id.to_string(), |s| s.name.clone());
            DiscoveredSecret {
                secret_id: d.secret_id,
                name,
                region: d.region,
                discovered_by: d.discovered_by_explorer,
                discovered_by_user: d.discovered_by_user,
                discovered_on_tick: d.discovered_on_tick,
            }
        })
        .collect();

    let regions = reference
        .regions
        .regions()
        .map(|r| RegionStatus {
            id: r.id.clone(),
            name: r.name.clone(),
            explorers: counts.get(&r.id).copied().unwrap_or(0),
            danger_level: r.danger_level,
            discovery_richness: r.discovery_richness,
        })
        .collect();

    Ok(WorldStatus {
        tick: world.current_tick,
        total_explorers_ever: world.total_explorers_ever,
        total_deaths_ever: world.total_deaths_ever,
        total_returns_ever: world.total_returns_ever,
        discovered_secrets,
        regions,
    })
}

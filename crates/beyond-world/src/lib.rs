//! Static reference data and randomness for The Beyond.
//!
//! This crate models what never changes while the world runs: the region
//! graph with its secrets and obtainable items, the catalog of effect-bearing
//! definitions, and the journal templates. It also defines the injectable
//! [`RandomSource`] every resolver draws from.
//!
//! # Modules
//!
//! - [`catalog`] -- Items, specialties, personalities, keepsakes, effects.
//! - [`dice`] -- [`RandomSource`], the production [`RngDice`], and the
//!   scripted [`ScriptedDice`] used by tests.
//! - [`error`] -- Validation errors.
//! - [`narrative`] -- Template tables and fixed journal lines.
//! - [`region`] -- Region nodes and secrets.
//! - [`region_graph`] -- The validated world graph.
//! - [`starting_world`] -- The default five-region world and its catalog.
//! - [`trial`] -- Personality trial scenes.

pub mod catalog;
pub mod dice;
pub mod error;
pub mod narrative;
pub mod region;
pub mod region_graph;
pub mod starting_world;
pub mod trial;

pub use catalog::{
    Catalog, Effect, Item, Keepsake, NOTHING_KEEPSAKE, Personality, Specialty, UnlockCondition,
};
pub use dice::{RandomSource, RngDice, ScriptedDice};
pub use error::WorldError;
pub use narrative::NarrativeTemplates;
pub use region::{Region, Secret};
pub use region_graph::RegionGraph;
pub use starting_world::{GATE, create_starting_catalog, create_starting_world};
pub use trial::{TRIAL_LENGTH, TRIAL_SCENARIOS, TrialOption, TrialScenario, trial_scenario};

use beyond_types::RegionId;

/// Everything a tick reads but never writes.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// The world graph.
    pub regions: RegionGraph,
    /// Effect-bearing definitions.
    pub catalog: Catalog,
    /// Journal templates.
    pub narrative: NarrativeTemplates,
}

impl ReferenceData {
    /// Bundle and cross-check reference data.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::RegionNotFound`] if the gate region is missing,
    /// or [`WorldError::UnknownItem`] if a region lists an item the catalog
    /// does not define.
    pub fn new(
        regions: RegionGraph,
        catalog: Catalog,
        narrative: NarrativeTemplates,
    ) -> Result<Self, WorldError> {
        if !regions.contains(&RegionId::from(GATE)) {
            return Err(WorldError::RegionNotFound(RegionId::from(GATE)));
        }
        for region in regions.regions() {
            if let Some(missing) = region
                .possible_items
                .iter()
                .find(|item| catalog.item(item).is_none())
            {
                return Err(WorldError::UnknownItem {
                    region: region.id.clone(),
                    item: missing.clone(),
                });
            }
        }
        Ok(Self {
            regions,
            catalog,
            narrative,
        })
    }

    /// The default world, catalog, and templates.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if the built-in data fails validation.
    pub fn starting() -> Result<Self, WorldError> {
        Self::new(
            create_starting_world()?,
            create_starting_catalog(),
            NarrativeTemplates::starting(),
        )
    }
}

//! Ambient narration for uneventful ticks.

use beyond_types::Explorer;
use beyond_world::{NarrativeTemplates, RandomSource, Region};

use crate::config::ExplorerConfig;

/// With the configured chance, an ambient line for the explorer's region.
pub fn quiet_entry(
    explorer: &Explorer,
    region: &Region,
    config: &ExplorerConfig,
    templates: &NarrativeTemplates,
    rng: &mut impl RandomSource,
) -> Option<String> {
    rng.chance(config.quiet_chance)
        .then(|| templates.quiet(&region.id, &explorer.name, rng))
}

//! Discovery resolution.
//!
//! A discovery is attempted only when the gate roll passes. The secret
//! branch is tried first; claiming a secret touches shared world state, so
//! the caller performs the claim and falls back to [`roll_item`] when
//! another explorer got there first. Anything that is neither a secret nor
//! an item becomes a minor flavor line.

use std::collections::BTreeSet;

use beyond_types::{Explorer, FoundItem, JournalEventType, SecretId};
use beyond_world::{Catalog, NarrativeTemplates, RandomSource, Region, Secret, narrative};

use crate::config::ExplorerConfig;
use crate::modifiers::Modifiers;

/// A discovery made this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// A world secret, claimed for the first time.
    Secret {
        /// The claimed secret.
        secret_id: SecretId,
        /// The secret's discovered text with the name filled in.
        text: String,
    },
    /// An item appended to the explorer's found items.
    Item {
        /// The record to append.
        found: FoundItem,
        /// Journal text.
        text: String,
    },
    /// Flavor only.
    Minor {
        /// Journal text.
        text: String,
    },
}

impl Discovery {
    /// Secrets and items are significant; minor flavor is not.
    pub const fn is_significant(&self) -> bool {
        matches!(self, Self::Secret { .. } | Self::Item { .. })
    }

    /// Journal event type for this discovery.
    pub const fn event_type(&self) -> JournalEventType {
        match self {
            Self::Secret { .. } | Self::Minor { .. } => JournalEventType::Discovery,
            Self::Item { .. } => JournalEventType::ItemFound,
        }
    }
}

/// Whether a discovery is attempted at all this tick.
pub fn discovery_attempted(
    mods: &Modifiers,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> bool {
    rng.chance(config.discovery_gate + mods.discovery)
}

/// Roll for a secret the world has not seen yet.
///
/// The roll is always drawn. A secret is picked only when the roll passes
/// and the region still holds an undiscovered one.
pub fn roll_secret<'r>(
    region: &'r Region,
    discovered: &BTreeSet<SecretId>,
    mods: &Modifiers,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> Option<&'r Secret> {
    if !rng.chance(config.secret_base + mods.secret_find) {
        return None;
    }
    let open = region.undiscovered_secrets(discovered);
    rng.pick(&open).copied()
}

/// The discovery for a secret whose claim succeeded.
pub fn secret_found(explorer: &Explorer, secret: &Secret) -> Discovery {
    Discovery::Secret {
        secret_id: secret.id.clone(),
        text: narrative::fill(&secret.discovered_text, &explorer.name),
    }
}

/// Roll for one of the region's obtainable items.
///
/// Returns `None` when the roll fails, the region lists no items, or the
/// picked item is missing from the catalog.
pub fn roll_item(
    explorer: &Explorer,
    region: &Region,
    catalog: &Catalog,
    mods: &Modifiers,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
) -> Option<Discovery> {
    if !rng.chance(config.item_base + mods.item_find) {
        return None;
    }
    let item = rng
        .pick(&region.possible_items)
        .and_then(|id| catalog.item(id))?;

    Some(Discovery::Item {
        found: FoundItem {
            item_id: item.id.clone(),
            found_in_region: region.id.clone(),
            found_on_day: explorer.journal_day(),
        },
        text: narrative::item_found(&explorer.name, &item.name, &item.flavor_text),
    })
}

/// A minor flavor discovery for the region.
pub fn minor(
    explorer: &Explorer,
    region: &Region,
    templates: &NarrativeTemplates,
    rng: &mut impl RandomSource,
) -> Discovery {
    Discovery::Minor {
        text: templates.minor_discovery(&region.id, &explorer.name, rng),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use beyond_types::{ItemId, RegionId};
    use beyond_world::{ScriptedDice, create_starting_catalog, create_starting_world};

    use super::*;
    use crate::testing::explorer_in;

    fn region(id: &str) -> Region {
        let graph = create_starting_world().unwrap();
        graph.get(&RegionId::from(id)).cloned().unwrap()
    }

    #[test]
    fn gate_uses_discovery_bonus() {
        let config = ExplorerConfig::default();
        let mods = Modifiers {
            discovery: 0.2,
            ..Modifiers::default()
        };
        let mut rng = ScriptedDice::new([0.25, 0.35]);
        assert!(discovery_attempted(&mods, &config, &mut rng));
        assert!(!discovery_attempted(&mods, &config, &mut rng));
    }

    #[test]
    fn secret_roll_skips_discovered_secrets() {
        let config = ExplorerConfig::default();
        let caves = region("crystal_caves");
        let mut discovered = BTreeSet::new();
        discovered.insert(SecretId::from("crystal_heart"));

        let mut rng = ScriptedDice::new([0.01, 0.0]);
        let secret = roll_secret(&caves, &discovered, &Modifiers::default(), &config, &mut rng);
        assert_eq!(secret.map(|s| s.id.as_str()), Some("echo_chamber"));

        discovered.insert(SecretId::from("echo_chamber"));
        let mut rng = ScriptedDice::new([0.01]);
        let secret = roll_secret(&caves, &discovered, &Modifiers::default(), &config, &mut rng);
        assert!(secret.is_none());
        assert_eq!(rng.remaining(), 0);
    }

    #[test]
    fn secret_text_names_the_explorer() {
        let caves = region("crystal_caves");
        let explorer = explorer_in("crystal_caves");
        let secret = caves.secrets.first().unwrap();
        let discovery = secret_found(&explorer, secret);
        assert!(discovery.is_significant());
        assert_eq!(discovery.event_type(), JournalEventType::Discovery);
        assert!(matches!(
            &discovery,
            Discovery::Secret { text, .. } if text.starts_with("Ada entered a chamber")
        ));
    }

    #[test]
    fn item_found_records_region_and_day() {
        let config = ExplorerConfig::default();
        let catalog = create_starting_catalog();
        let depths = region("the_depths");
        let mut explorer = explorer_in("the_depths");
        explorer.days_alive = 4.75;

        // roll passes, then picks the last of three items
        let mut rng = ScriptedDice::new([0.05, 0.9]);
        let discovery = roll_item(
            &explorer,
            &depths,
            &catalog,
            &Modifiers::default(),
            &config,
            &mut rng,
        );
        let Some(Discovery::Item { found, text }) = discovery else {
            panic!("expected an item, got {discovery:?}");
        };
        assert_eq!(found.item_id, ItemId::from("depth_lantern"));
        assert_eq!(found.found_in_region, RegionId::from("the_depths"));
        assert_eq!(found.found_on_day, 4);
        assert_eq!(
            text,
            "Ada found something: Depth Lantern. The flame fears nothing"
        );
    }

    #[test]
    fn gate_has_no_items_to_find() {
        let config = ExplorerConfig::default();
        let catalog = create_starting_catalog();
        let gate = region("the_gate");
        let explorer = explorer_in("the_gate");
        let mut rng = ScriptedDice::new([0.0]);
        let discovery = roll_item(
            &explorer,
            &gate,
            &catalog,
            &Modifiers::default(),
            &config,
            &mut rng,
        );
        assert!(discovery.is_none());
    }

    #[test]
    fn items_missing_from_catalog_are_not_found() {
        let config = ExplorerConfig::default();
        let depths = region("the_depths");
        let explorer = explorer_in("the_depths");
        let mut rng = ScriptedDice::new([0.0, 0.0]);
        let discovery = roll_item(
            &explorer,
            &depths,
            &Catalog::default(),
            &Modifiers::default(),
            &config,
            &mut rng,
        );
        assert!(discovery.is_none());
    }

    #[test]
    fn minor_discoveries_are_not_significant() {
        let templates = NarrativeTemplates::starting();
        let summit = region("the_summit");
        let explorer = explorer_in("the_summit");
        let mut rng = ScriptedDice::new([0.0]);
        let discovery = minor(&explorer, &summit, &templates, &mut rng);
        assert!(!discovery.is_significant());
        assert_eq!(
            discovery,
            Discovery::Minor {
                text: String::from("Ada found cairns built by other explorers."),
            }
        );
    }
}

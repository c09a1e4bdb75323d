//! Default starting world for The Beyond.
//!
//! Five regions reaching from the gate to the summit, 17 items (six guild
//! supplies and eleven found items), eight specialties, six personalities,
//! and six keepsakes.

use std::collections::BTreeMap;

use beyond_types::{
    EffectKind, ItemId, ItemSource, KeepsakeId, PersonalityId, Rarity, RegionId, SecretId,
    SpecialtyId,
};

use crate::catalog::{Catalog, Effect, Item, Keepsake, Personality, Specialty, UnlockCondition};
use crate::error::WorldError;
use crate::region::{Region, Secret};
use crate::region_graph::RegionGraph;

use EffectKind::{
    DangerAvoid, DeathDefy, DiscoveryBonus, EscapeChance, ItemFind, RestBonus, SecretFind,
    SurvivalBonus, SurvivalRegion, TravelSpeed,
};

/// Slug of the region every explorer starts in and returns to.
pub const GATE: &str = "the_gate";

/// Helper to build a [`Secret`].
fn secret(id: &str, name: &str, description: &str, discovered_text: &str) -> Secret {
    Secret {
        id: SecretId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        discovered_text: discovered_text.to_owned(),
    }
}

/// Helper to build a [`Region`].
#[allow(clippy::too_many_arguments)]
fn region(
    id: &str,
    name: &str,
    description: &str,
    danger_level: u8,
    discovery_richness: u8,
    connected_to: &[&str],
    distance_from_gate: u32,
    secrets: Vec<Secret>,
    possible_items: &[&str],
) -> Region {
    Region {
        id: RegionId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        danger_level,
        discovery_richness,
        connected_to: connected_to.iter().map(|c| RegionId::from(*c)).collect(),
        distance_from_gate,
        secrets,
        possible_items: possible_items.iter().map(|i| ItemId::from(*i)).collect(),
    }
}

/// Create the default region graph.
///
/// # Errors
///
/// Returns [`WorldError`] if the graph fails validation (should not happen
/// with valid hard-coded data).
#[allow(clippy::too_many_lines)]
pub fn create_starting_world() -> Result<RegionGraph, WorldError> {
    RegionGraph::from_regions([
        region(
            GATE,
            "The Gate",
            "Where all journeys begin. Safe, but unremarkable.",
            1,
            2,
            &["mistwood"],
            0,
            vec![secret(
                "gate_inscription",
                "Ancient Inscription",
                "Words carved into the gate itself...",
                "{name} traced the worn carvings on the gate. Words from before memory.",
            )],
            &[],
        ),
        region(
            "mistwood",
            "The Mistwood",
            "Dense forest shrouded in perpetual fog. Easy to get lost.",
            3,
            5,
            &[GATE, "crystal_caves", "the_depths"],
            1,
            vec![
                secret(
                    "hidden_shrine",
                    "Hidden Shrine",
                    "A moss-covered shrine to something forgotten",
                    "{name} pushed through the mist and found a shrine older than the trees around it.",
                ),
                secret(
                    "safe_path",
                    "The Safe Path",
                    "A route through the wood that the mist cannot touch",
                    "{name} noticed the fog parting along a faint trail. A path the mist fears?",
                ),
            ],
            &["travelers_charm", "fog_cloak"],
        ),
        region(
            "crystal_caves",
            "Crystal Caves",
            "Glittering underground passages. Beautiful and treacherous.",
            5,
            7,
            &["mistwood", "the_summit"],
            2,
            vec![
                secret(
                    "crystal_heart",
                    "The Crystal Heart",
                    "A massive crystal that pulses with inner light",
                    "{name} entered a chamber dominated by a crystal the size of a house. It was... breathing.",
                ),
                secret(
                    "echo_chamber",
                    "Echo Chamber",
                    "A place where whispers never die",
                    "Voices. Not {name}'s own. Words from explorers long gone, trapped in the stone.",
                ),
            ],
            &["crystal_shard", "glowstone", "echo_compass"],
        ),
        region(
            "the_depths",
            "The Depths",
            "Ancient ruins descending into darkness. What built this place?",
            7,
            8,
            &["mistwood", "the_summit"],
            2,
            vec![
                secret(
                    "library_remains",
                    "Library Remains",
                    "Fragments of knowledge from before",
                    "{name} found shelves carved into the walls. Most empty. But not all.",
                ),
                secret(
                    "the_machine",
                    "The Machine",
                    "It still works. But what does it do?",
                    "Gears turned as {name} approached. Something here still lives. Still waits.",
                ),
            ],
            &["ancient_key", "preserved_scroll", "depth_lantern"],
        ),
        region(
            "the_summit",
            "The Summit",
            "The highest point. The end of all journeys, one way or another.",
            9,
            10,
            &["crystal_caves", "the_depths"],
            3,
            vec![
                secret(
                    "sky_shrine",
                    "Sky Shrine",
                    "An altar open to the heavens",
                    "{name} stood at the peak. An altar waited there, aimed at stars no map has named.",
                ),
                secret(
                    "the_truth",
                    "The Truth",
                    "What the Beyond actually is",
                    "At the summit, {name} finally understood. The Beyond is not a place. It's a--",
                ),
            ],
            &["star_fragment", "summit_stone", "truth_shard"],
        ),
    ])
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Helper to build an [`Item`].
#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    description: &str,
    flavor_text: &str,
    rarity: Rarity,
    source: ItemSource,
    consumable: bool,
    effects: Vec<Effect>,
) -> Item {
    Item {
        id: ItemId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        flavor_text: flavor_text.to_owned(),
        rarity,
        source,
        consumable,
        effects,
    }
}

/// Helper to build a common [`Specialty`] or, with `unlock`, a gated one.
fn specialty(
    id: &str,
    name: &str,
    description: &str,
    rarity: Rarity,
    effects: Vec<Effect>,
    unlock: Option<UnlockCondition>,
) -> Specialty {
    Specialty {
        id: SpecialtyId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        rarity,
        effects,
        unlock,
    }
}

/// Helper to build a [`Personality`].
fn personality(id: &str, name: &str, description: &str, effects: Vec<Effect>) -> Personality {
    Personality {
        id: PersonalityId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        effects,
    }
}

/// Helper to build a [`Keepsake`].
fn keepsake(id: &str, name: &str, death_mention: &str) -> Keepsake {
    Keepsake {
        id: KeepsakeId::from(id),
        name: name.to_owned(),
        death_mention: death_mention.to_owned(),
    }
}

/// Create the default catalog.
#[allow(clippy::too_many_lines)]
pub fn create_starting_catalog() -> Catalog {
    use ItemSource::{Found, Guild};
    use Rarity::{Common, Legendary, Rare, Uncommon};

    let items = [
        // Guild supplies
        item(
            "rations",
            "Rations",
            "Three days of food",
            "Not tasty, but reliable",
            Common,
            Guild,
            true,
            vec![Effect::new(SurvivalBonus, 0.15)],
        ),
        item(
            "rope",
            "Rope",
            "Fifty feet of strong hemp",
            "A hundred uses",
            Common,
            Guild,
            false,
            vec![
                Effect::new(EscapeChance, 0.15),
                Effect::in_region(SurvivalRegion, 0.2, "crystal_caves"),
            ],
        ),
        item(
            "lantern",
            "Lantern",
            "Oil lamp with spare fuel",
            "Push back the dark",
            Common,
            Guild,
            false,
            vec![
                Effect::in_region(SurvivalRegion, 0.25, "crystal_caves"),
                Effect::in_region(SurvivalRegion, 0.25, "the_depths"),
            ],
        ),
        item(
            "healing_salve",
            "Healing Salve",
            "Numbs pain, prevents infection",
            "Burns, then bliss",
            Common,
            Guild,
            true,
            vec![Effect::new(DeathDefy, 0.2)],
        ),
        item(
            "warm_cloak",
            "Warm Cloak",
            "Keeps out cold and rain",
            "Smells like campfires",
            Common,
            Guild,
            false,
            vec![Effect::new(SurvivalBonus, 0.1), Effect::new(RestBonus, 0.15)],
        ),
        item(
            "compass",
            "Compass",
            "Always points home",
            "When lost, trust the needle",
            Common,
            Guild,
            false,
            vec![Effect::new(TravelSpeed, 0.15), Effect::new(DangerAvoid, 0.1)],
        ),
        // Found in The Beyond
        item(
            "travelers_charm",
            "Traveler's Charm",
            "A worn token from a previous explorer",
            "Someone carried this far",
            Uncommon,
            Found,
            false,
            vec![Effect::new(SurvivalBonus, 0.1), Effect::new(TravelSpeed, 0.1)],
        ),
        item(
            "fog_cloak",
            "Fog Cloak",
            "Woven from the mist itself",
            "Hard to see, hard to find",
            Rare,
            Found,
            false,
            vec![
                Effect::new(DangerAvoid, 0.3),
                Effect::in_region(SurvivalRegion, 0.3, "mistwood"),
            ],
        ),
        item(
            "crystal_shard",
            "Crystal Shard",
            "Glows faintly in darkness",
            "Warm to the touch",
            Uncommon,
            Found,
            false,
            vec![
                Effect::new(DiscoveryBonus, 0.15),
                Effect::in_region(SurvivalRegion, 0.2, "crystal_caves"),
            ],
        ),
        item(
            "glowstone",
            "Glowstone",
            "Never needs fuel, never dims",
            "What powers it?",
            Rare,
            Found,
            false,
            vec![
                Effect::in_region(SurvivalRegion, 0.35, "crystal_caves"),
                Effect::in_region(SurvivalRegion, 0.35, "the_depths"),
                Effect::new(DiscoveryBonus, 0.1),
            ],
        ),
        item(
            "echo_compass",
            "Echo Compass",
            "Points toward secrets",
            "It knows things",
            Rare,
            Found,
            false,
            vec![Effect::new(SecretFind, 0.35), Effect::new(DiscoveryBonus, 0.2)],
        ),
        item(
            "ancient_key",
            "Ancient Key",
            "Opens... something",
            "Heavy with purpose",
            Rare,
            Found,
            false,
            vec![
                Effect::new(SecretFind, 0.25),
                Effect::in_region(SurvivalRegion, 0.2, "the_depths"),
            ],
        ),
        item(
            "preserved_scroll",
            "Preserved Scroll",
            "Ancient knowledge, barely readable",
            "The ink still moves",
            Uncommon,
            Found,
            false,
            vec![Effect::new(DiscoveryBonus, 0.2), Effect::new(SecretFind, 0.15)],
        ),
        item(
            "depth_lantern",
            "Depth Lantern",
            "Burns with blue flame",
            "The flame fears nothing",
            Rare,
            Found,
            false,
            vec![
                Effect::in_region(SurvivalRegion, 0.4, "the_depths"),
                Effect::new(DangerAvoid, 0.15),
            ],
        ),
        item(
            "star_fragment",
            "Star Fragment",
            "Fallen from above",
            "Cold as the void",
            Legendary,
            Found,
            false,
            vec![
                Effect::new(DeathDefy, 0.3),
                Effect::new(SecretFind, 0.3),
                Effect::new(SurvivalBonus, 0.15),
            ],
        ),
        item(
            "summit_stone",
            "Summit Stone",
            "From the very peak",
            "It remembers the sky",
            Legendary,
            Found,
            false,
            vec![
                Effect::new(SurvivalBonus, 0.25),
                Effect::new(TravelSpeed, 0.2),
                Effect::new(DiscoveryBonus, 0.2),
            ],
        ),
        item(
            "truth_shard",
            "Truth Shard",
            "A piece of something greater",
            "It whispers answers",
            Legendary,
            Found,
            false,
            vec![
                Effect::new(SecretFind, 0.4),
                Effect::new(DiscoveryBonus, 0.25),
                Effect::new(DeathDefy, 0.2),
            ],
        ),
    ];

    let specialties = vec![
        specialty(
            "forager",
            "Forager",
            "Can find sustenance anywhere",
            Common,
            vec![Effect::new(SurvivalBonus, 0.15)],
            None,
        ),
        specialty(
            "scout",
            "Scout",
            "Moves quickly and quietly",
            Common,
            vec![Effect::new(DangerAvoid, 0.2), Effect::new(TravelSpeed, 0.15)],
            None,
        ),
        specialty(
            "keen_eye",
            "Keen Eye",
            "Notices what others miss",
            Common,
            vec![Effect::new(DiscoveryBonus, 0.2), Effect::new(SecretFind, 0.15)],
            None,
        ),
        specialty(
            "thick_skin",
            "Thick Skin",
            "Shrugs off minor injuries",
            Common,
            vec![Effect::new(SurvivalBonus, 0.1), Effect::new(EscapeChance, 0.15)],
            None,
        ),
        specialty(
            "lucky",
            "Lucky",
            "Fortune favors them",
            Common,
            vec![Effect::new(DeathDefy, 0.1), Effect::new(ItemFind, 0.15)],
            None,
        ),
        specialty(
            "pathfinder",
            "Pathfinder",
            "Knows the safe routes",
            Uncommon,
            vec![Effect::new(SurvivalBonus, 0.2), Effect::new(TravelSpeed, 0.25)],
            Some(UnlockCondition::ReturnedExplorers(3)),
        ),
        specialty(
            "survivor",
            "Survivor",
            "Has cheated death before",
            Uncommon,
            vec![Effect::new(DeathDefy, 0.2), Effect::new(EscapeChance, 0.2)],
            Some(UnlockCondition::LostExplorers(5)),
        ),
        specialty(
            "fated",
            "Fated",
            "Destiny has plans for them",
            Rare,
            vec![Effect::new(DeathDefy, 0.25), Effect::new(SecretFind, 0.3)],
            Some(UnlockCondition::SurvivedDays(30.0)),
        ),
    ];

    let personalities = [
        personality(
            "bold",
            "Bold",
            "Faces the unknown head-on",
            vec![Effect::new(TravelSpeed, 0.2), Effect::new(DangerAvoid, -0.1)],
        ),
        personality(
            "cautious",
            "Cautious",
            "Careful and deliberate",
            vec![Effect::new(DangerAvoid, 0.2), Effect::new(TravelSpeed, -0.1)],
        ),
        personality(
            "curious",
            "Curious",
            "Drawn to mysteries",
            vec![Effect::new(DiscoveryBonus, 0.25), Effect::new(DangerAvoid, -0.05)],
        ),
        personality(
            "resourceful",
            "Resourceful",
            "Makes do with what's at hand",
            vec![Effect::new(ItemFind, 0.2), Effect::new(SurvivalBonus, 0.1)],
        ),
        personality(
            "steadfast",
            "Steadfast",
            "Endures where others falter",
            vec![Effect::new(SurvivalBonus, 0.15), Effect::new(RestBonus, 0.2)],
        ),
        personality(
            "wanderer",
            "Wanderer",
            "Born to roam",
            vec![Effect::new(TravelSpeed, 0.25), Effect::new(DiscoveryBonus, 0.1)],
        ),
    ];

    let keepsakes = [
        keepsake(
            "letter",
            "A letter never sent",
            "{name}'s hand found the letter in their pocket.",
        ),
        keepsake(
            "ring",
            "A ring that no longer fits",
            "{name} touched the ring one last time.",
        ),
        keepsake(
            "drawing",
            "A child's drawing",
            "The drawing was creased from being held so often.",
        ),
        keepsake(
            "seeds",
            "Seeds from the old garden",
            "The seeds would never grow now.",
        ),
        keepsake(
            "coin",
            "A lucky coin",
            "{name} flipped the coin. It landed on edge.",
        ),
        keepsake(
            "nothing",
            "Nothing - they left it all behind",
            "They had come with nothing. They left with nothing.",
        ),
    ];

    Catalog {
        items: items.into_iter().map(|i| (i.id.clone(), i)).collect::<BTreeMap<_, _>>(),
        specialties,
        personalities: personalities
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect(),
        keepsakes: keepsakes.into_iter().map(|k| (k.id.clone(), k)).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use beyond_types::{PlayerLegacy, UserId};

    use super::*;

    #[test]
    fn starting_world_has_five_connected_regions() {
        let graph = create_starting_world().unwrap();
        assert_eq!(graph.len(), 5);
        let summit = graph.get(&RegionId::from("the_summit")).unwrap();
        assert_eq!(summit.danger_level, 9);
        assert_eq!(summit.distance_from_gate, 3);
        let gate = graph.get(&RegionId::from(GATE)).unwrap();
        assert!(gate.possible_items.is_empty());
    }

    #[test]
    fn every_region_secret_is_unique() {
        let graph = create_starting_world().unwrap();
        let mut seen = std::collections::BTreeSet::new();
        for region in graph.regions() {
            for secret in &region.secrets {
                assert!(seen.insert(secret.id.clone()), "duplicate {}", secret.id);
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn catalog_counts() {
        let catalog = create_starting_catalog();
        assert_eq!(catalog.items.len(), 17);
        assert_eq!(catalog.guild_items().count(), 6);
        assert_eq!(catalog.specialties.len(), 8);
        assert_eq!(catalog.personalities.len(), 6);
        assert_eq!(catalog.keepsakes.len(), 6);
    }

    #[test]
    fn fresh_players_roll_only_common_specialties() {
        let catalog = create_starting_catalog();
        let legacy = PlayerLegacy::new(UserId::new());
        let ids: Vec<&str> = catalog
            .available_specialties(&legacy)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["forager", "scout", "keen_eye", "thick_skin", "lucky"]);
    }

    #[test]
    fn unlocks_follow_legacy_counters() {
        let catalog = create_starting_catalog();
        let mut legacy = PlayerLegacy::new(UserId::new());
        legacy.total_returns = 3;
        let unlocked = catalog.newly_unlocked(&legacy, 31.0);
        assert_eq!(
            unlocked,
            vec![SpecialtyId::from("pathfinder"), SpecialtyId::from("fated")]
        );

        legacy.unlocked_specialties = unlocked;
        assert!(catalog.newly_unlocked(&legacy, 31.0).is_empty());
        assert_eq!(catalog.available_specialties(&legacy).len(), 7);
    }
}

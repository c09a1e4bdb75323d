//! Journal text.
//!
//! Templates contain a `{name}` placeholder that [`fill`] replaces with the
//! explorer's name. Region-keyed tables fall back to the `mistwood` set when
//! a region has no entry of its own; death text falls back from the cause
//! to the explorer's region and finally to a generic line.

use std::collections::BTreeMap;

use beyond_types::RegionId;
use serde::{Deserialize, Serialize};

use crate::dice::RandomSource;

/// Region whose templates stand in for regions without their own.
pub const FALLBACK_REGION: &str = "mistwood";

/// Death line used when neither the cause nor the region has templates.
pub const GENERIC_DEATH: &str = "{name} did not survive.";

/// Fixed return-home line.
pub const RETURN_HOME: &str = "{name} passed through the gate. They had returned from The Beyond.";

/// Last-resort lines for tables that have no entry for a region.
const GENERIC_QUIET: &str = "{name} pressed on.";
const GENERIC_ESCAPE: &str = "{name} got away.";
const GENERIC_INJURY: &str = "{name} was hurt.";
const GENERIC_MINOR: &str = "{name} found nothing of note.";
const GENERIC_RETURNING: &str = "{name} kept walking toward the gate.";

/// Substitute every `{name}` in `template`.
pub fn fill(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

/// Item-found line.
pub fn item_found(name: &str, item_name: &str, flavor: &str) -> String {
    format!("{name} found something: {item_name}. {flavor}")
}

/// Movement line.
pub fn movement(name: &str, region_name: &str, region_description: &str) -> String {
    format!("{name} traveled to {region_name}. {region_description}")
}

/// Item-lost line.
pub fn item_lost(item_name: &str) -> String {
    format!("The {item_name} was lost in the chaos.")
}

/// Region- and cause-keyed template tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeTemplates {
    /// Ambient lines per region.
    pub quiet: BTreeMap<RegionId, Vec<String>>,
    /// Escaped-danger lines per region.
    pub escape: BTreeMap<RegionId, Vec<String>>,
    /// Injury lines per region.
    pub injury: BTreeMap<RegionId, Vec<String>>,
    /// Minor flavor discoveries per region.
    pub minor_discovery: BTreeMap<RegionId, Vec<String>>,
    /// Death lines per cause key (a region id, `injuries`, `lost_returning`).
    pub death: BTreeMap<String, Vec<String>>,
    /// Lines for explorers still on the way home.
    pub returning: Vec<String>,
}

impl NarrativeTemplates {
    /// An ambient line for `region`.
    pub fn quiet(&self, region: &RegionId, name: &str, rng: &mut impl RandomSource) -> String {
        regional(&self.quiet, region, name, GENERIC_QUIET, rng)
    }

    /// An escaped-danger line for `region`.
    pub fn escape(&self, region: &RegionId, name: &str, rng: &mut impl RandomSource) -> String {
        regional(&self.escape, region, name, GENERIC_ESCAPE, rng)
    }

    /// An injury line for `region`.
    pub fn injury(&self, region: &RegionId, name: &str, rng: &mut impl RandomSource) -> String {
        regional(&self.injury, region, name, GENERIC_INJURY, rng)
    }

    /// A minor discovery line for `region`.
    pub fn minor_discovery(
        &self,
        region: &RegionId,
        name: &str,
        rng: &mut impl RandomSource,
    ) -> String {
        regional(&self.minor_discovery, region, name, GENERIC_MINOR, rng)
    }

    /// A death line: templates for `cause`, else for `region`, else the
    /// generic line.
    pub fn death(
        &self,
        cause: &str,
        region: &RegionId,
        name: &str,
        rng: &mut impl RandomSource,
    ) -> String {
        let table = self
            .death
            .get(cause)
            .or_else(|| self.death.get(region.as_str()));
        let template = table
            .and_then(|t| rng.pick(t))
            .map_or(GENERIC_DEATH, String::as_str);
        fill(template, name)
    }

    /// A still-on-the-way-home line.
    pub fn returning(&self, name: &str, rng: &mut impl RandomSource) -> String {
        let template = rng
            .pick(&self.returning)
            .map_or(GENERIC_RETURNING, String::as_str);
        fill(template, name)
    }
}

/// Pick from the region's table, falling back to [`FALLBACK_REGION`] and
/// then to `generic`.
fn regional(
    table: &BTreeMap<RegionId, Vec<String>>,
    region: &RegionId,
    name: &str,
    generic: &str,
    rng: &mut impl RandomSource,
) -> String {
    let lines = table
        .get(region)
        .or_else(|| table.get(FALLBACK_REGION))
        .map_or(&[][..], Vec::as_slice);
    let template = rng.pick(lines).map_or(generic, String::as_str);
    fill(template, name)
}

// ---------------------------------------------------------------------------
// Starting content
// ---------------------------------------------------------------------------

/// Insert one keyed list of lines.
fn add<K: From<&'static str> + Ord>(
    table: &mut BTreeMap<K, Vec<String>>,
    key: &'static str,
    lines: &[&str],
) {
    table.insert(K::from(key), lines.iter().map(|l| (*l).to_owned()).collect());
}

impl NarrativeTemplates {
    /// The journal text shipped with the starting world.
    #[allow(clippy::too_many_lines)]
    pub fn starting() -> Self {
        let mut quiet = BTreeMap::new();
        add(
            &mut quiet,
            "the_gate",
            &[
                "{name} rested near the gate, watching others prepare to leave.",
                "The gate hummed quietly. {name} wondered what lay beyond.",
                "{name} checked their supplies one more time.",
                "The air near the gate felt different. Charged, somehow.",
                "{name} watched the horizon, gathering courage.",
            ],
        );
        add(
            &mut quiet,
            "mistwood",
            &[
                "The mist swirled around {name}. Everything looked the same.",
                "{name} followed the sound of water through the fog.",
                "Something moved in the mist. {name} waited. Nothing.",
                "The trees here were ancient. {name} felt watched.",
                "Footsteps echoed strangely in the mist. Were they alone?",
                "{name} pressed deeper into the fog, one careful step at a time.",
                "The mist thinned briefly. {name} caught a glimpse of sky.",
            ],
        );
        add(
            &mut quiet,
            "crystal_caves",
            &[
                "Light danced on the cave walls. {name} paused to watch.",
                "The crystals sang softly when {name} passed.",
                "Deeper into the caves. The air grew cold.",
                "{name} found a chamber of perfect silence.",
                "Colors {name} had never seen before reflected off every surface.",
                "The crystals here grew in impossible patterns.",
                "{name} rested against a warm crystal. It pulsed like a heartbeat.",
            ],
        );
        add(
            &mut quiet,
            "the_depths",
            &[
                "The ruins stretched endlessly downward.",
                "{name} found marks on the wall. Someone was here before.",
                "The machine sounds were louder here. Closer.",
                "Darkness pressed in from all sides. {name} kept moving.",
                "Ancient symbols covered the walls. {name} traced them without understanding.",
                "The air was stale. How long since anyone breathed here?",
                "{name} found a room filled with broken statues. Broken by what?",
            ],
        );
        add(
            &mut quiet,
            "the_summit",
            &[
                "The wind cut through everything.",
                "{name} could see forever from here.",
                "The sky was different at the summit. Wrong, somehow.",
                "So few had made it this far. {name} understood why.",
                "The silence at the summit was absolute.",
                "{name} felt the weight of every step that brought them here.",
                "Stars were visible even in daylight. They moved too fast.",
            ],
        );

        let mut escape = BTreeMap::new();
        add(
            &mut escape,
            "mistwood",
            &[
                "{name} ducked into the mist just in time.",
                "The fog provided cover. {name} slipped away unseen.",
                "{name} scrambled up a tree. Whatever it was passed below.",
            ],
        );
        add(
            &mut escape,
            "crystal_caves",
            &[
                "{name} squeezed through a narrow crystal gap.",
                "The light confused it. {name} escaped in the glare.",
                "{name} dropped into a lower passage. Safe, for now.",
            ],
        );
        add(
            &mut escape,
            "the_depths",
            &[
                "{name} hid in the shadows of the ancient machines.",
                "A door sealed behind {name}. Something pounded on the other side.",
                "{name} ran. The echoes made it impossible to follow.",
            ],
        );
        add(
            &mut escape,
            "the_summit",
            &[
                "{name} found shelter behind a stone outcrop.",
                "The wind shifted. {name} used it to disappear.",
                "{name} dropped below the ridgeline. Out of sight, out of danger.",
            ],
        );

        let mut injury = BTreeMap::new();
        add(
            &mut injury,
            "mistwood",
            &[
                "{name} stumbled into a thorn thicket. The scratches burned.",
                "Something bit {name} in the fog. They never saw what.",
                "{name} fell into a hidden ravine. The climb back was painful.",
            ],
        );
        add(
            &mut injury,
            "crystal_caves",
            &[
                "A crystal formation collapsed. {name} barely avoided the worst.",
                "{name} slipped on wet stone. Their leg would remember this.",
                "The air here was wrong. {name} coughed blood.",
            ],
        );
        add(
            &mut injury,
            "the_depths",
            &[
                "Something in the darkness struck {name}.",
                "A mechanism triggered. {name} was lucky to escape with just wounds.",
                "{name} touched the wrong thing. The burns were severe.",
            ],
        );
        add(
            &mut injury,
            "the_summit",
            &[
                "The cold sapped {name}'s strength. Frostbite was setting in.",
                "A rockslide. {name} was caught in the edge of it.",
                "Lightning struck nearby. {name} felt the charge through their whole body.",
            ],
        );

        let mut death = BTreeMap::new();
        add(
            &mut death,
            "mistwood",
            &[
                "{name} wandered too deep into the mist.",
                "The mist took {name}.",
                "{name} was last seen walking into the fog. They never walked out.",
            ],
        );
        add(
            &mut death,
            "crystal_caves",
            &[
                "The cave collapsed. {name} didn't escape.",
                "{name} fell into the darkness.",
                "The crystals dimmed. When they lit again, {name} was gone.",
            ],
        );
        add(
            &mut death,
            "the_depths",
            &[
                "Something in the depths found {name}.",
                "The machines finally noticed {name}.",
                "{name} descended too far. Some depths have no bottom.",
            ],
        );
        add(
            &mut death,
            "the_summit",
            &[
                "The summit claimed {name}.",
                "The cold was too much. {name} stopped moving.",
                "{name} saw something at the peak. It was the last thing they saw.",
            ],
        );
        add(
            &mut death,
            "lost_returning",
            &[
                "{name} never made it home.",
                "The way back was harder than {name} knew.",
                "So close to the gate. But not close enough.",
            ],
        );
        add(
            &mut death,
            "injuries",
            &[
                "{name}'s wounds were too severe.",
                "{name} fought hard. But the body has limits.",
                "Rest would not come. {name} grew still.",
            ],
        );

        let mut minor_discovery = BTreeMap::new();
        add(
            &mut minor_discovery,
            "the_gate",
            &[
                "{name} found footprints from those who came before.",
                "A message scratched into the gate: \"Keep moving.\"",
            ],
        );
        add(
            &mut minor_discovery,
            "mistwood",
            &[
                "{name} found the remains of an old campfire. Cold for years.",
                "Strange mushrooms grew here. {name} left them alone.",
                "Animal tracks crossed the path. Something large.",
            ],
        );
        add(
            &mut minor_discovery,
            "crystal_caves",
            &[
                "{name} discovered a pool of perfectly still water.",
                "Old mining tools. Someone tried to harvest the crystals.",
                "A skeleton, half-buried in crystal. {name} moved on quickly.",
            ],
        );
        add(
            &mut minor_discovery,
            "the_depths",
            &[
                "{name} found a room of broken clocks. All stopped at the same time.",
                "Writing on the walls. A language no one speaks anymore.",
                "Tools of unknown purpose. {name} dared not touch them.",
            ],
        );
        add(
            &mut minor_discovery,
            "the_summit",
            &[
                "{name} found cairns built by other explorers.",
                "The bones of a great beast, half-buried in snow.",
                "A view of lands not shown on any map.",
            ],
        );

        let returning = [
            "{name} pressed on toward the gate. Not far now.",
            "Home. The word kept {name} moving.",
            "Every step brought {name} closer to safety.",
            "{name} could almost see the gate through the trees.",
            "The compass needle swung. Home was that way.",
            "{name} thought of all they would tell when they returned.",
            "Tired. Hurt. But alive. {name} kept walking.",
        ]
        .iter()
        .map(|l| (*l).to_owned())
        .collect();

        Self {
            quiet,
            escape,
            injury,
            minor_discovery,
            death,
            returning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    #[test]
    fn fill_replaces_every_placeholder() {
        assert_eq!(fill("{name} and {name}", "Ash"), "Ash and Ash");
    }

    #[test]
    fn regions_without_escape_lines_use_the_mistwood_set() {
        let templates = NarrativeTemplates::starting();
        let mut dice = ScriptedDice::new([0.0]);
        let line = templates.escape(&RegionId::from("the_gate"), "Ash", &mut dice);
        assert_eq!(line, "Ash ducked into the mist just in time.");
    }

    #[test]
    fn death_prefers_cause_then_region_then_generic() {
        let templates = NarrativeTemplates::starting();
        let summit = RegionId::from("the_summit");

        let mut dice = ScriptedDice::new([0.0]);
        let by_cause = templates.death("injuries", &summit, "Ash", &mut dice);
        assert_eq!(by_cause, "Ash's wounds were too severe.");

        let mut dice = ScriptedDice::new([0.0]);
        let by_region = templates.death("unknown", &summit, "Ash", &mut dice);
        assert_eq!(by_region, "The summit claimed Ash.");

        let mut dice = ScriptedDice::new([0.0]);
        let generic = templates.death("unknown", &RegionId::from("the_gate"), "Ash", &mut dice);
        assert_eq!(generic, "Ash did not survive.");
    }

    #[test]
    fn fixed_lines() {
        assert_eq!(
            item_found("Ash", "Rope", "A hundred uses"),
            "Ash found something: Rope. A hundred uses"
        );
        assert_eq!(item_lost("Glowstone"), "The Glowstone was lost in the chaos.");
        assert_eq!(
            fill(RETURN_HOME, "Ash"),
            "Ash passed through the gate. They had returned from The Beyond."
        );
    }

    #[test]
    fn empty_tables_fall_back_to_generic_lines() {
        let templates = NarrativeTemplates::default();
        let mut dice = ScriptedDice::new(Vec::new());
        let line = templates.quiet(&RegionId::from("mistwood"), "Ash", &mut dice);
        assert_eq!(line, "Ash pressed on.");
        assert_eq!(dice.remaining(), 0);
    }
}

//! Death causes and the terminal death record.
//!
//! A death is final. [`process_death`] builds everything the caller needs to
//! persist: the journal text, the explorer update, and the cause key. The
//! caller writes the journal entry, applies the update, and bumps the player
//! and world death counters.

use beyond_types::{Explorer, ExplorerStatus, ExplorerUpdate, RegionId};
use beyond_world::{Catalog, NarrativeTemplates, RandomSource, narrative};

/// Why an explorer died.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// A fatal danger in this region.
    Region(RegionId),
    /// Injury damage brought health to zero.
    Injuries,
    /// A fatal hazard on the way home.
    LostReturning,
    /// No specific cause was reported.
    Unknown,
}

impl DeathCause {
    /// The key used for template lookup and stored as cause of death.
    pub fn key(&self) -> &str {
        match self {
            Self::Region(region) => region.as_str(),
            Self::Injuries => "injuries",
            Self::LostReturning => "lost_returning",
            Self::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

/// Everything produced by an explorer's death.
#[derive(Debug, Clone, PartialEq)]
pub struct DeathRecord {
    /// The cause.
    pub cause: DeathCause,
    /// Significant `death` journal text.
    pub text: String,
    /// Status `dead`, health 0, cause of death.
    pub update: ExplorerUpdate,
}

/// Journal text for a death.
///
/// Templates for the cause come first, then templates for the explorer's
/// region, then a generic line. The keepsake's mention is appended after a
/// blank line unless the explorer carried nothing or the keepsake is not in
/// the catalog.
pub fn death_narrative(
    explorer: &Explorer,
    cause: &DeathCause,
    catalog: &Catalog,
    templates: &NarrativeTemplates,
    rng: &mut impl RandomSource,
) -> String {
    let mut text = templates.death(cause.key(), &explorer.current_region, &explorer.name, rng);
    if let Some(keepsake) = catalog
        .keepsake(&explorer.keepsake_id)
        .filter(|k| !k.is_nothing())
    {
        text.push_str("\n\n");
        text.push_str(&narrative::fill(&keepsake.death_mention, &explorer.name));
    }
    text
}

/// Build the death record for `explorer`.
///
/// `days_alive` is carried into the update so a death on the road home
/// keeps the day already advanced this tick.
pub fn process_death(
    explorer: &Explorer,
    cause: DeathCause,
    catalog: &Catalog,
    templates: &NarrativeTemplates,
    rng: &mut impl RandomSource,
) -> DeathRecord {
    let text = death_narrative(explorer, &cause, catalog, templates, rng);
    let update = ExplorerUpdate {
        status: Some(ExplorerStatus::Dead),
        health: Some(0),
        days_alive: Some(explorer.days_alive),
        is_recalling: Some(false),
        cause_of_death: Some(cause.key().to_owned()),
        ..ExplorerUpdate::default()
    };
    DeathRecord {
        cause,
        text,
        update,
    }
}

#[cfg(test)]
mod tests {
    use beyond_types::KeepsakeId;
    use beyond_world::{ScriptedDice, create_starting_catalog};

    use super::*;
    use crate::testing::explorer_in;

    #[test]
    fn cause_keys() {
        assert_eq!(DeathCause::Region(RegionId::from("the_summit")).key(), "the_summit");
        assert_eq!(DeathCause::Injuries.to_string(), "injuries");
        assert_eq!(DeathCause::LostReturning.key(), "lost_returning");
    }

    #[test]
    fn keepsake_mention_follows_a_blank_line() {
        let catalog = create_starting_catalog();
        let templates = NarrativeTemplates::starting();
        let mut explorer = explorer_in("mistwood");
        explorer.keepsake_id = KeepsakeId::from("ring");
        let mut rng = ScriptedDice::new([0.0]);
        let text = death_narrative(&explorer, &DeathCause::Injuries, &catalog, &templates, &mut rng);
        assert!(text.ends_with("\n\nAda touched the ring one last time."));
        assert!(!text.contains("{name}"));
    }

    #[test]
    fn nothing_keepsake_is_never_mentioned() {
        let catalog = create_starting_catalog();
        let templates = NarrativeTemplates::starting();
        let mut explorer = explorer_in("mistwood");
        explorer.keepsake_id = KeepsakeId::from("nothing");
        let mut rng = ScriptedDice::new([0.0]);
        let text = death_narrative(&explorer, &DeathCause::Unknown, &catalog, &templates, &mut rng);
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn unknown_cause_outside_templated_regions_uses_generic_line() {
        let catalog = Catalog::default();
        let templates = NarrativeTemplates::default();
        let explorer = explorer_in("nowhere");
        let mut rng = ScriptedDice::new(Vec::new());
        let text = death_narrative(&explorer, &DeathCause::Unknown, &catalog, &templates, &mut rng);
        assert_eq!(text, "Ada did not survive.");
    }

    #[test]
    fn death_record_is_terminal() {
        let catalog = create_starting_catalog();
        let templates = NarrativeTemplates::starting();
        let explorer = explorer_in("the_depths");
        let mut rng = ScriptedDice::new(Vec::new());
        let record = process_death(
            &explorer,
            DeathCause::Region(RegionId::from("the_depths")),
            &catalog,
            &templates,
            &mut rng,
        );
        assert_eq!(record.update.status, Some(ExplorerStatus::Dead));
        assert_eq!(record.update.health, Some(0));
        assert_eq!(record.update.cause_of_death.as_deref(), Some("the_depths"));
    }
}

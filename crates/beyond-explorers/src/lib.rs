//! Per-explorer logic for The Beyond.
//!
//! Everything here operates on explorer state without touching I/O. It sits
//! between `beyond-world` (reference data and randomness) and `beyond-core`
//! (which loads explorers, persists outcomes, and runs the tick).
//!
//! # Modules
//!
//! - [`config`] -- Resolver tunables ([`ExplorerConfig`])
//! - [`creation`] -- Enlistment validation, stat and specialty rolls
//! - [`death`] -- Death causes and the terminal death record
//! - [`discovery`] -- Discovery gate, secrets, items, minor flavor
//! - [`error`] -- [`ExplorerError`]
//! - [`modifiers`] -- Modifier aggregation ([`Modifiers`])
//! - [`movement`] -- Relocation along the region graph
//! - [`pipeline`] -- Stage order and short-circuiting for active explorers
//! - [`quiet`] -- Ambient narration
//! - [`recall`] -- Recall planning
//! - [`returning`] -- The journey home and legacy bonuses
//! - [`survival`] -- Danger rolls
//! - [`trial`] -- Personality trial draws and scoring

pub mod config;
pub mod creation;
pub mod death;
pub mod discovery;
pub mod error;
pub mod modifiers;
pub mod movement;
pub mod pipeline;
pub mod quiet;
pub mod recall;
pub mod returning;
pub mod survival;
pub mod trial;

pub use config::ExplorerConfig;
pub use creation::{EnlistRequest, new_explorer, roll_specialty, roll_stats, validate_enlistment};
pub use death::{DeathCause, DeathRecord, death_narrative, process_death};
pub use discovery::{Discovery, discovery_attempted, minor, roll_item, roll_secret, secret_found};
pub use error::ExplorerError;
pub use modifiers::{Modifiers, aggregate};
pub use movement::{Relocation, resolve_movement};
pub use pipeline::{ACTIVE_PIPELINE, EventChain, Stage, TickEvent};
pub use quiet::quiet_entry;
pub use recall::{RecallPlan, plan_recall};
pub use returning::{
    ReturnOutcome, ReturnStep, advance_return, arrival_update, legacy_bonus_for, raised_floors,
};
pub use survival::{DangerOutcome, resolve_survival, survival_chance};
pub use trial::{TrialAnswer, TrialResult, draw_trial, resolve_trial};

#[cfg(test)]
pub(crate) mod testing {
    use beyond_types::{
        Explorer, ExplorerId, ExplorerStatus, KeepsakeId, PersonalityId, RegionId, SpecialtyId,
        Stats, UserId,
    };
    use chrono::Utc;

    /// An average scout named Ada, fresh and unhurt, standing in `region`.
    pub fn explorer_in(region: &str) -> Explorer {
        Explorer {
            id: ExplorerId::new(),
            user_id: UserId::new(),
            name: String::from("Ada"),
            stats: Stats::uniform(5),
            specialty_id: SpecialtyId::from("scout"),
            personality_id: PersonalityId::from("bold"),
            keepsake_id: KeepsakeId::from("letter"),
            equipped_items: Vec::new(),
            status: ExplorerStatus::Active,
            health: 100,
            current_region: RegionId::from(region),
            days_alive: 0.0,
            is_recalling: false,
            recall_days_remaining: 0.0,
            found_items: Vec::new(),
            cause_of_death: None,
            legacy_bonus: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

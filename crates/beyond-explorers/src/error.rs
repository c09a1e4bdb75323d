//! Error types for the `beyond-explorers` crate.
//!
//! Validation of explorer creation and recall requests fails with an
//! [`ExplorerError`] before any state is touched.

use beyond_types::{
    ExplorerId, ExplorerStatus, KeepsakeId, PersonalityId, RegionId, SpecialtyId, Stat,
};

/// Errors raised by explorer creation, recall, and lifecycle checks.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The explorer name is empty or only whitespace.
    #[error("explorer name is required")]
    EmptyName,

    /// A stat lies outside 1--10.
    #[error("stat {stat:?} out of range: {value}")]
    StatOutOfRange {
        /// The offending stat.
        stat: Stat,
        /// Its value.
        value: u8,
    },

    /// The specialty is not in the catalog.
    #[error("unknown specialty: {0}")]
    UnknownSpecialty(SpecialtyId),

    /// The personality is not in the catalog.
    #[error("unknown personality: {0}")]
    UnknownPersonality(PersonalityId),

    /// The keepsake is not in the catalog.
    #[error("unknown keepsake: {0}")]
    UnknownKeepsake(KeepsakeId),

    /// A trial needs exactly one answer per drawn scene.
    #[error("trial needs {expected} answers, got {got}")]
    TrialAnswerCount {
        /// Answers required.
        expected: usize,
        /// Answers given.
        got: usize,
    },

    /// A trial answer names a scene that does not exist.
    #[error("unknown trial scenario: {0}")]
    UnknownScenario(String),

    /// A trial answer picks an option the scene does not have.
    #[error("scenario {scenario} has no option {index}")]
    InvalidTrialOption {
        /// The scene.
        scenario: String,
        /// The requested option.
        index: usize,
    },

    /// The explorer's region is not part of the world graph.
    #[error("unknown region: {0}")]
    UnknownRegion(RegionId),

    /// A recall was requested for an explorer that is not exploring.
    #[error("explorer {id} is not active (status: {status})")]
    NotActive {
        /// The explorer.
        id: ExplorerId,
        /// Its current status.
        status: ExplorerStatus,
    },

    /// A status change that does not follow a lifecycle edge.
    #[error("explorer {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The explorer.
        id: ExplorerId,
        /// Current status.
        from: ExplorerStatus,
        /// Requested status.
        to: ExplorerStatus,
    },
}

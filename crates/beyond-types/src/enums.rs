//! Enumeration types for The Beyond.
//!
//! Lifecycle status, journal event tags, stats, effect kinds, item rarity
//! and source, and the named lifetime counters kept per player and per
//! world.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Explorer lifecycle
// ---------------------------------------------------------------------------

/// Lifecycle status of an explorer.
///
/// Transitions are monotone: `Active -> Returning -> Returned`, or
/// `Active | Returning -> Dead`. `Returned` and `Dead` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ExplorerStatus {
    /// Exploring The Beyond; processed by the full resolver chain.
    Active,
    /// Journeying home after a recall.
    Returning,
    /// Came back through the gate. Terminal.
    Returned,
    /// Did not survive. Terminal.
    Dead,
}

impl ExplorerStatus {
    /// Whether no further tick may act on an explorer in this status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Returned | Self::Dead)
    }

    /// Whether moving from `self` to `next` follows a lifecycle edge.
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Returning | Self::Dead)
                | (Self::Returning, Self::Returned | Self::Dead)
        )
    }

    /// The lowercase tag used in storage and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Returning => "returning",
            Self::Returned => "returned",
            Self::Dead => "dead",
        }
    }
}

impl core::fmt::Display for ExplorerStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Journal
// ---------------------------------------------------------------------------

/// The kind of event a journal entry narrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum JournalEventType {
    /// Ambient narration on an uneventful tick.
    Quiet,
    /// A secret or minor flavor discovery.
    Discovery,
    /// A survived danger (escape or injury).
    Danger,
    /// An item found in the current region.
    ItemFound,
    /// Travel to a connected region.
    Movement,
    /// Progress on the journey home.
    Returning,
    /// Arrival back through the gate.
    Return,
    /// The explorer's death.
    Death,
    /// A found item lost during a return-journey delay.
    ItemLost,
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// One of the four innate explorer stats (each 1--10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Stat {
    /// Survival and toughness.
    Vigor,
    /// Discovery and wits.
    Cunning,
    /// Pushing through; escape chance.
    Resolve,
    /// Lucky breaks; death defiance and item finds.
    Fortune,
}

impl Stat {
    /// All four stats in canonical order.
    pub const ALL: [Self; 4] = [Self::Vigor, Self::Cunning, Self::Resolve, Self::Fortune];

    /// The lowercase stat name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vigor => "vigor",
            Self::Cunning => "cunning",
            Self::Resolve => "resolve",
            Self::Fortune => "fortune",
        }
    }
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// The kind of additive bonus an effect contributes.
///
/// Every kind maps onto exactly one modifier field; `SurvivalBonus` and
/// `SurvivalRegion` both feed the survival field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum EffectKind {
    /// Survival bonus in every region.
    SurvivalBonus,
    /// Survival bonus meant for a specific region (paired with a condition).
    SurvivalRegion,
    /// Higher chance that a discovery is attempted.
    DiscoveryBonus,
    /// Lower chance that danger fires at all.
    DangerAvoid,
    /// Chance to escape a danger unharmed.
    EscapeChance,
    /// Reduces the chance a danger is fatal.
    DeathDefy,
    /// Higher chance to relocate.
    TravelSpeed,
    /// Higher chance to find region items.
    ItemFind,
    /// Higher chance to uncover secrets.
    SecretFind,
    /// Health recovered at the end of each tick.
    RestBonus,
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// How rare an item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Rarity {
    /// Widely available.
    Common,
    /// Occasionally found.
    Uncommon,
    /// Seldom found.
    Rare,
    /// Found only at the edge of the world.
    Legendary,
}

/// Where an item comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ItemSource {
    /// Supplied by the guild before departure.
    Guild,
    /// Found in The Beyond and brought home.
    Found,
}

// ---------------------------------------------------------------------------
// Counters
// ---------------------------------------------------------------------------

/// A named lifetime counter on a player's legacy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum LegacyCounter {
    /// Explorers enlisted.
    Explorers,
    /// Explorers that came home.
    Returns,
    /// Explorers lost.
    Deaths,
    /// Secrets first-discovered by the player's explorers.
    Discoveries,
}

/// A named lifetime counter on the world record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum WorldCounter {
    /// Explorers ever enlisted.
    ExplorersEver,
    /// Explorers ever lost.
    DeathsEver,
    /// Explorers ever returned.
    ReturnsEver,
}

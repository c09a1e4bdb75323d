//! The per-tick resolver order for active explorers.
//!
//! Stages run in [`ACTIVE_PIPELINE`] order. Each stage produces at most one
//! [`TickEvent`]; the first significant event ends the chain. A death ends
//! the explorer's tick outright and is handled outside the chain.

use beyond_types::JournalEventType;

/// One resolver slot in the active-explorer pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Danger roll: escape, injury, or death.
    Survival,
    /// Discovery gate, then secret, item, or minor flavor.
    Discovery,
    /// Relocation along the region graph.
    Movement,
    /// Ambient narration.
    Quiet,
}

impl Stage {
    /// Lowercase name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Survival => "survival",
            Self::Discovery => "discovery",
            Self::Movement => "movement",
            Self::Quiet => "quiet",
        }
    }
}

/// The order stages run in for an active explorer.
pub const ACTIVE_PIPELINE: [Stage; 4] = [
    Stage::Survival,
    Stage::Discovery,
    Stage::Movement,
    Stage::Quiet,
];

/// A journal-worthy event produced by one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickEvent {
    /// The stage that produced it.
    pub stage: Stage,
    /// Journal text.
    pub text: String,
    /// Journal event type.
    pub event_type: JournalEventType,
    /// Whether later stages are skipped.
    pub significant: bool,
}

impl TickEvent {
    /// Build an event.
    pub const fn new(
        stage: Stage,
        text: String,
        event_type: JournalEventType,
        significant: bool,
    ) -> Self {
        Self {
            stage,
            text,
            event_type,
            significant,
        }
    }
}

/// Collects stage events and tracks whether the chain has short-circuited.
#[derive(Debug, Default)]
pub struct EventChain {
    /// Events in the order they were produced.
    events: Vec<TickEvent>,
    /// Set once a significant event has been pushed.
    closed: bool,
}

impl EventChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `stage` still gets to run. Survival always runs; every other
    /// stage runs only while nothing significant has happened.
    pub const fn runs(&self, stage: Stage) -> bool {
        matches!(stage, Stage::Survival) || !self.closed
    }

    /// Record an event; a significant one closes the chain.
    pub fn push(&mut self, event: TickEvent) {
        self.closed |= event.significant;
        self.events.push(event);
    }

    /// Consume the chain, yielding its events.
    pub fn into_events(self) -> Vec<TickEvent> {
        self.events
    }

    /// Label of the most telling event, for tick summaries.
    pub fn label(&self) -> &'static str {
        self.events
            .iter()
            .find(|e| e.significant)
            .or_else(|| self.events.iter().rev().find(|e| e.stage != Stage::Quiet))
            .map_or("quiet", |e| match e.event_type {
                JournalEventType::Danger => "danger_survived",
                JournalEventType::ItemFound => "discovery_item",
                JournalEventType::Discovery if e.significant => "discovery_secret",
                JournalEventType::Discovery => "discovery_minor",
                JournalEventType::Movement => "moved",
                _ => "quiet",
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(stage: Stage, event_type: JournalEventType, significant: bool) -> TickEvent {
        TickEvent::new(stage, String::from("..."), event_type, significant)
    }

    #[test]
    fn pipeline_order_is_fixed() {
        let names: Vec<&str> = ACTIVE_PIPELINE.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["survival", "discovery", "movement", "quiet"]);
    }

    #[test]
    fn significant_event_closes_the_chain() {
        let mut chain = EventChain::new();
        assert!(ACTIVE_PIPELINE.iter().all(|s| chain.runs(*s)));

        chain.push(event(Stage::Survival, JournalEventType::Danger, true));
        assert!(!chain.runs(Stage::Discovery));
        assert!(!chain.runs(Stage::Movement));
        assert!(!chain.runs(Stage::Quiet));
        assert_eq!(chain.label(), "danger_survived");
    }

    #[test]
    fn minor_events_keep_the_chain_open() {
        let mut chain = EventChain::new();
        chain.push(event(Stage::Discovery, JournalEventType::Discovery, false));
        chain.push(event(Stage::Movement, JournalEventType::Movement, false));
        assert!(chain.runs(Stage::Quiet));
        chain.push(event(Stage::Quiet, JournalEventType::Quiet, false));
        assert_eq!(chain.label(), "moved");
        assert_eq!(chain.into_events().len(), 3);
    }

    #[test]
    fn empty_chain_is_quiet() {
        assert_eq!(EventChain::new().label(), "quiet");
    }
}

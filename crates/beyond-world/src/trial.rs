//! The personality trial.
//!
//! A new player answers a few short scenes. Every option leans toward one
//! personality and nudges one stat, so the answers together suggest a
//! temperament and a small head start.

use beyond_types::Stat;

/// Scenes drawn for one trial.
pub const TRIAL_LENGTH: usize = 3;

/// One answer to a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialOption {
    /// What the player reads.
    pub text: &'static str,
    /// Personality slug this answer votes for.
    pub personality: &'static str,
    /// Stat that gains a point.
    pub bonus: Stat,
}

/// A scene with four answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialScenario {
    /// Unique slug.
    pub id: &'static str,
    /// The situation.
    pub scene: &'static str,
    /// Possible answers.
    pub options: [TrialOption; 4],
}

impl TrialScenario {
    /// The answer at `index`, if there is one.
    pub fn option(&self, index: usize) -> Option<&TrialOption> {
        self.options.get(index)
    }
}

const fn answer(text: &'static str, personality: &'static str, bonus: Stat) -> TrialOption {
    TrialOption {
        text,
        personality,
        bonus,
    }
}

/// Every scene the trial can draw from.
pub static TRIAL_SCENARIOS: [TrialScenario; 6] = [
    TrialScenario {
        id: "river",
        scene: "You stand before a river, too wide to cross. The water is dark and fast.",
        options: [
            answer("Search for a crossing upstream", "cautious", Stat::Cunning),
            answer("Build a raft from fallen wood", "resourceful", Stat::Vigor),
            answer("Wade in and trust your strength", "bold", Stat::Resolve),
            answer("Wait for conditions to change", "steadfast", Stat::Fortune),
        ],
    },
    TrialScenario {
        id: "sound",
        scene: "A sound echoes from deeper in. It could be danger. It could be something wonderful.",
        options: [
            answer("Move toward it carefully", "curious", Stat::Cunning),
            answer("Call out a greeting", "bold", Stat::Resolve),
            answer("Hide and observe", "cautious", Stat::Fortune),
            answer("Mark the spot and move on", "wanderer", Stat::Vigor),
        ],
    },
    TrialScenario {
        id: "creature",
        scene: "A small creature lies in your path, injured. It watches you with frightened eyes.",
        options: [
            answer("Stop to help it", "steadfast", Stat::Resolve),
            answer("Leave food and move on", "resourceful", Stat::Fortune),
            answer("Study it carefully", "curious", Stat::Cunning),
            answer("Keep walking", "wanderer", Stat::Vigor),
        ],
    },
    TrialScenario {
        id: "door",
        scene: "A door in the hillside, half-hidden by vines. It's locked.",
        options: [
            answer("Search for a key", "curious", Stat::Cunning),
            answer("Try to force it open", "bold", Stat::Vigor),
            answer("Mark it and return later", "cautious", Stat::Resolve),
            answer("Leave it - some doors stay closed", "wanderer", Stat::Fortune),
        ],
    },
    TrialScenario {
        id: "storm",
        scene: "Dark clouds gather. A storm is coming, and there's no shelter in sight.",
        options: [
            answer("Push forward before it hits", "bold", Stat::Vigor),
            answer("Build a shelter quickly", "resourceful", Stat::Cunning),
            answer("Find low ground and wait", "cautious", Stat::Resolve),
            answer("Keep moving, storms pass", "steadfast", Stat::Fortune),
        ],
    },
    TrialScenario {
        id: "light",
        scene: "A faint light glows in the distance, off the path. Night is falling.",
        options: [
            answer("Investigate the light", "curious", Stat::Cunning),
            answer("Stay on the path", "cautious", Stat::Vigor),
            answer("Make camp and watch", "steadfast", Stat::Resolve),
            answer("Signal back", "bold", Stat::Fortune),
        ],
    },
];

/// Look up a scene by slug.
pub fn trial_scenario(id: &str) -> Option<&'static TrialScenario> {
    TRIAL_SCENARIOS.iter().find(|s| s.id == id)
}

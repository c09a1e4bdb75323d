//! End-to-end tick scenarios against the in-memory store.
//!
//! Every scenario scripts its random draws with `ScriptedDice`, so each
//! branch of the tick is exercised deterministically.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

use std::sync::Arc;

use beyond_core::{Outcome, TickEngine, enlist_explorer};
use beyond_db::{
    DbError, ExplorerStore, InventoryStore, JournalStore, LegacyStore, MemoryStore, WorldStore,
};
use beyond_explorers::{EnlistRequest, ExplorerConfig};
use beyond_types::{
    Explorer, ExplorerStatus, ExplorerUpdate, FoundItem, ItemId, JournalEventType, KeepsakeId,
    LegacyBonus, PersonalityId, RegionId, SecretId, SpecialtyId, StatFloorTarget, Stats, UserId,
};
use beyond_world::{ReferenceData, ScriptedDice};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

struct World {
    store: Arc<MemoryStore>,
    reference: Arc<ReferenceData>,
}

impl World {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            reference: Arc::new(ReferenceData::starting().unwrap()),
        }
    }

    fn engine(&self, dice: ScriptedDice) -> TickEngine<MemoryStore, ScriptedDice> {
        TickEngine::new(
            Arc::clone(&self.store),
            Arc::clone(&self.reference),
            ExplorerConfig::default(),
            dice,
        )
    }

    async fn enlist(&self, user: UserId, specialty: &str, personality: &str) -> Explorer {
        enlist_explorer(
            &*self.store,
            &self.reference,
            &ExplorerConfig::default(),
            EnlistRequest {
                user_id: user,
                name: String::from("Ada"),
                stats: Stats::uniform(5),
                specialty_id: SpecialtyId::from(specialty),
                personality_id: PersonalityId::from(personality),
                keepsake_id: KeepsakeId::from("letter"),
                equipped_items: Vec::new(),
            },
        )
        .await
        .unwrap()
    }

    async fn set(&self, explorer: &Explorer, update: ExplorerUpdate) -> Explorer {
        self.store.update_explorer(explorer.id, update).await.unwrap()
    }

    async fn reload(&self, explorer: &Explorer) -> Explorer {
        self.store.explorer(explorer.id).await.unwrap().unwrap()
    }
}

fn glowstone(day: u32) -> FoundItem {
    FoundItem {
        item_id: ItemId::from("glowstone"),
        found_in_region: RegionId::from("crystal_caves"),
        found_on_day: day,
    }
}

#[tokio::test]
async fn returning_explorer_arrives_and_flushes_items() {
    let world = World::new();
    let user = UserId::new();
    let ada = world.enlist(user, "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                status: Some(ExplorerStatus::Returning),
                is_recalling: Some(true),
                recall_days_remaining: Some(0.1),
                days_alive: Some(30.2),
                found_items: Some(vec![glowstone(12), glowstone(20)]),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    let mut engine = world.engine(ScriptedDice::new([0.1]));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(summary.tick, 1);
    assert_eq!(summary.outcomes[0].outcome, Outcome::Returned);

    let back = world.reload(&ada).await;
    assert_eq!(back.status, ExplorerStatus::Returned);
    assert!(!back.is_recalling);
    assert_eq!(
        back.legacy_bonus,
        Some(LegacyBonus::StatFloor(StatFloorTarget::All))
    );

    let items = world.store.items_for(user).await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.found_by.as_deref() == Some("Ada")));

    let state = world.store.world().await.unwrap();
    assert_eq!(state.total_returns_ever, 1);
    assert_eq!(state.current_tick, 1);

    let legacy = world.store.legacy(user).await.unwrap().unwrap();
    assert_eq!(legacy.total_returns, 1);
    assert_eq!(legacy.stat_floors, Stats::uniform(2));
    // Lived past thirty days: the rare specialty unlocks.
    assert!(legacy.has_unlocked(&SpecialtyId::from("fated")));

    let journal = world.store.journal_for(ada.id).await.unwrap();
    let last = journal.last().unwrap();
    assert_eq!(last.event_type, JournalEventType::Return);
    assert!(last.is_significant);

    // Returned explorers drop out of the next tick.
    let next = engine.run_tick().await.unwrap();
    assert_eq!(next.explorers_processed, 0);
}

#[tokio::test]
async fn return_hazard_can_be_fatal() {
    let world = World::new();
    let user = UserId::new();
    let ada = world.enlist(user, "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                status: Some(ExplorerStatus::Returning),
                recall_days_remaining: Some(2.0),
                days_alive: Some(4.0),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    // Hazard, then fatal.
    let mut engine = world.engine(ScriptedDice::new([0.99, 0.0]));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(
        summary.outcomes[0].outcome,
        Outcome::Died {
            cause: String::from("lost_returning")
        }
    );

    let gone = world.reload(&ada).await;
    assert_eq!(gone.status, ExplorerStatus::Dead);
    assert_eq!(gone.health, 0);
    assert_eq!(gone.cause_of_death.as_deref(), Some("lost_returning"));
    assert!(close(gone.days_alive, 4.25));

    assert_eq!(world.store.world().await.unwrap().total_deaths_ever, 1);
    assert_eq!(
        world.store.legacy(user).await.unwrap().unwrap().total_deaths,
        1
    );
}

#[tokio::test]
async fn return_delay_costs_the_last_item() {
    let world = World::new();
    let ada = world.enlist(UserId::new(), "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                status: Some(ExplorerStatus::Returning),
                recall_days_remaining: Some(2.0),
                days_alive: Some(4.0),
                found_items: Some(vec![glowstone(1), glowstone(3)]),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    // Hazard, not fatal, item lost.
    let mut engine = world.engine(ScriptedDice::new([0.99, 0.9, 0.0]));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(summary.outcomes[0].outcome, Outcome::EnRoute);

    let after = world.reload(&ada).await;
    assert_eq!(after.status, ExplorerStatus::Returning);
    assert_eq!(after.health, 85);
    assert!(close(after.recall_days_remaining, 2.25));
    assert_eq!(after.found_items, vec![glowstone(1)]);

    let kinds: Vec<JournalEventType> = world
        .store
        .journal_for(ada.id)
        .await
        .unwrap()
        .iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        kinds,
        [JournalEventType::ItemLost, JournalEventType::Returning]
    );
}

#[tokio::test]
async fn fatal_danger_kills_an_active_explorer() {
    let world = World::new();
    let user = UserId::new();
    let ada = world.enlist(user, "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                current_region: Some(RegionId::from("the_summit")),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    // Danger fires, no escape, fatal.
    let mut engine = world.engine(ScriptedDice::new([0.99, 0.99, 0.0]));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(
        summary.outcomes[0].outcome,
        Outcome::Died {
            cause: String::from("the_summit")
        }
    );

    let gone = world.reload(&ada).await;
    assert_eq!(gone.status, ExplorerStatus::Dead);
    assert_eq!(gone.health, 0);
    assert_eq!(gone.cause_of_death.as_deref(), Some("the_summit"));

    let journal = world.store.journal_for(ada.id).await.unwrap();
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].event_type, JournalEventType::Death);
    assert!(journal[0].is_significant);
    assert!(journal[0].text.contains("letter"));

    // Dead explorers cannot be touched again.
    assert!(matches!(
        world
            .store
            .update_explorer(
                ada.id,
                ExplorerUpdate {
                    health: Some(10),
                    ..ExplorerUpdate::default()
                }
            )
            .await,
        Err(DbError::Terminal(_))
    ));
    let next = engine.run_tick().await.unwrap();
    assert_eq!(next.explorers_processed, 0);
    assert_eq!(next.tick, 2);
}

#[tokio::test]
async fn quiet_tick_rests_and_advances_the_day() {
    let world = World::new();
    let ada = world.enlist(UserId::new(), "scout", "steadfast").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                health: Some(50),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    // Every draw is 0.5: safe, no discovery, too fresh to move, quiet entry.
    let mut engine = world.engine(ScriptedDice::new(Vec::new()));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(summary.outcomes[0].outcome, Outcome::Active { label: "quiet" });

    let after = world.reload(&ada).await;
    assert!(close(after.days_alive, 0.25));
    // Steadfast rests for round(0.2 * 5) = 1.
    assert_eq!(after.health, 51);

    let journal = world.store.journal_for(ada.id).await.unwrap();
    assert_eq!(journal.len(), 1);
    assert_eq!(journal[0].event_type, JournalEventType::Quiet);
    assert_eq!(journal[0].tick, 1);
    assert!(!journal[0].is_significant);
}

#[tokio::test]
async fn a_secret_has_one_first_discoverer() {
    let world = World::new();
    let first = world.enlist(UserId::new(), "keen_eye", "curious").await;
    let second = world.enlist(UserId::new(), "keen_eye", "curious").await;

    // All-zero draws: both explorers pass every discovery roll. The gate
    // holds a single secret, so whoever goes second gets minor flavor.
    let mut engine = world.engine(ScriptedDice::new(Vec::new()).then_always(0.0));
    let summary = engine.run_tick().await.unwrap();

    let mut labels: Vec<&str> = summary.outcomes.iter().map(|o| o.outcome.tag()).collect();
    labels.sort_unstable();
    assert_eq!(labels, ["discovery_minor", "discovery_secret"]);

    let state = world.store.world().await.unwrap();
    assert!(state.is_discovered(&SecretId::from("gate_inscription")));
    assert_eq!(world.store.discoveries().await.unwrap().len(), 1);

    let mut total = 0;
    for explorer in [&first, &second] {
        let legacy = world
            .store
            .legacy(explorer.user_id)
            .await
            .unwrap()
            .unwrap();
        total += legacy.total_discoveries;
    }
    assert_eq!(total, 1);

    // The next tick cannot award it again.
    let again = engine.run_tick().await.unwrap();
    assert_eq!(again.count("discovery_secret"), 0);
    assert_eq!(world.store.discoveries().await.unwrap().len(), 1);
}

#[tokio::test]
async fn one_failing_explorer_does_not_stop_the_tick() {
    let world = World::new();
    let broken = world.enlist(UserId::new(), "scout", "bold").await;
    let healthy = world.enlist(UserId::new(), "scout", "bold").await;
    world.store.reject_updates_for(broken.id).await;

    let mut engine = world.engine(ScriptedDice::new(Vec::new()));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(summary.explorers_processed, 2);
    assert_eq!(summary.count("error"), 1);

    let failed = summary
        .outcomes
        .iter()
        .find(|o| o.explorer_id == broken.id)
        .unwrap();
    assert!(matches!(failed.outcome, Outcome::Failed { .. }));

    assert!(close(world.reload(&healthy).await.days_alive, 0.25));
    assert!(close(world.reload(&broken).await.days_alive, 0.0));
    assert!(world.store.journal_for(broken.id).await.unwrap().is_empty());
    assert_eq!(world.store.world().await.unwrap().current_tick, 1);
}

#[tokio::test]
async fn failed_arrival_leaves_the_journey_untouched() {
    let world = World::new();
    let user = UserId::new();
    let ada = world.enlist(user, "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                status: Some(ExplorerStatus::Returning),
                is_recalling: Some(true),
                recall_days_remaining: Some(0.1),
                days_alive: Some(30.2),
                found_items: Some(vec![glowstone(12), glowstone(20)]),
                ..ExplorerUpdate::default()
            },
        )
        .await;
    world.store.reject_updates_for(ada.id).await;

    let mut engine = world.engine(ScriptedDice::new([0.1]));
    let summary = engine.run_tick().await.unwrap();
    assert!(matches!(summary.outcomes[0].outcome, Outcome::Failed { .. }));

    let still = world.reload(&ada).await;
    assert_eq!(still.status, ExplorerStatus::Returning);
    assert_eq!(still.found_items.len(), 2);

    assert!(world.store.items_for(user).await.unwrap().is_empty());
    assert!(world.store.journal_for(ada.id).await.unwrap().is_empty());
    assert_eq!(world.store.world().await.unwrap().total_returns_ever, 0);
    let returns = world
        .store
        .legacy(user)
        .await
        .unwrap()
        .map_or(0, |l| l.total_returns);
    assert_eq!(returns, 0);
}

#[tokio::test]
async fn failed_death_writes_no_death_record() {
    let world = World::new();
    let user = UserId::new();
    let ada = world.enlist(user, "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                current_region: Some(RegionId::from("the_summit")),
                ..ExplorerUpdate::default()
            },
        )
        .await;
    world.store.reject_updates_for(ada.id).await;

    // Danger fires, no escape, fatal.
    let mut engine = world.engine(ScriptedDice::new([0.99, 0.99, 0.0]));
    let summary = engine.run_tick().await.unwrap();
    assert!(matches!(summary.outcomes[0].outcome, Outcome::Failed { .. }));

    let still = world.reload(&ada).await;
    assert_eq!(still.status, ExplorerStatus::Active);
    assert!(still.cause_of_death.is_none());

    let journal = world.store.journal_for(ada.id).await.unwrap();
    assert!(journal.iter().all(|e| e.event_type != JournalEventType::Death));
    assert_eq!(world.store.world().await.unwrap().total_deaths_ever, 0);
    let deaths = world
        .store
        .legacy(user)
        .await
        .unwrap()
        .map_or(0, |l| l.total_deaths);
    assert_eq!(deaths, 0);
}

#[tokio::test]
async fn unknown_region_skips_the_explorer() {
    let world = World::new();
    let ada = world.enlist(UserId::new(), "scout", "bold").await;
    let ada = world
        .set(
            &ada,
            ExplorerUpdate {
                current_region: Some(RegionId::from("atlantis")),
                ..ExplorerUpdate::default()
            },
        )
        .await;

    let mut engine = world.engine(ScriptedDice::new(Vec::new()));
    let summary = engine.run_tick().await.unwrap();
    assert_eq!(
        summary.outcomes[0].outcome,
        Outcome::Skipped {
            region: RegionId::from("atlantis")
        }
    );

    let after = world.reload(&ada).await;
    assert_eq!(after.status, ExplorerStatus::Active);
    assert!(close(after.days_alive, 0.0));
    assert!(world.store.journal_for(ada.id).await.unwrap().is_empty());
}

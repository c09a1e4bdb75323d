//! Snapshot round trips for the in-memory store.
//!
//! Each test writes to its own file under the system temp directory and
//! removes it afterwards.

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::indexing_slicing
)]

use std::path::PathBuf;

use beyond_db::{
    DbError, ExplorerStore, InventoryStore, JournalStore, LegacyStore, MemoryStore, WorldStore,
};
use beyond_types::{
    DiscoveryId, Explorer, ExplorerId, ExplorerStatus, ExplorerUpdate, ItemId, JournalEntry,
    JournalEventType, KeepsakeId, LegacyCounter, PersonalityId, PlayerItem, RegionId, SecretId,
    SpecialtyId, Stats, UserId, WorldCounter, WorldDiscovery, WorldStateUpdate,
};
use chrono::Utc;
use uuid::Uuid;

fn scratch_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("beyond-db-{}", Uuid::new_v4()))
        .join("snapshot.json")
}

fn explorer(user: UserId, name: &str) -> Explorer {
    Explorer {
        id: ExplorerId::new(),
        user_id: user,
        name: name.to_owned(),
        stats: Stats::new(7, 5, 4, 6),
        specialty_id: SpecialtyId::from("cartographer"),
        personality_id: PersonalityId::from("curious"),
        keepsake_id: KeepsakeId::from("compass"),
        equipped_items: Vec::new(),
        status: ExplorerStatus::Active,
        health: 100,
        current_region: RegionId::from("mistwood"),
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

#[tokio::test]
async fn snapshot_round_trip_preserves_the_world() {
    let path = scratch_path();
    let store = MemoryStore::new();
    let user = UserId::new();

    let ada = explorer(user, "Ada");
    let ada_id = ada.id;
    store.insert_explorer(ada).await.unwrap();
    store
        .update_explorer(
            ada_id,
            ExplorerUpdate {
                days_alive: Some(2.5),
                health: Some(80),
                ..ExplorerUpdate::default()
            },
        )
        .await
        .unwrap();
    store
        .append_journal(JournalEntry::new(
            ada_id,
            2,
            10,
            String::from("The trees whispered."),
            JournalEventType::Quiet,
            false,
        ))
        .await
        .unwrap();
    store
        .increment_world(WorldCounter::ExplorersEver)
        .await
        .unwrap();
    store
        .update_world(WorldStateUpdate {
            current_tick: Some(10),
        })
        .await
        .unwrap();
    store
        .claim_secret(WorldDiscovery {
            id: DiscoveryId::new(),
            secret_id: SecretId::from("whispering_grove"),
            discovered_by_explorer: String::from("Ada"),
            discovered_by_user: user,
            discovered_on_tick: 10,
            region: RegionId::from("mistwood"),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    store
        .increment_legacy(user, LegacyCounter::Explorers)
        .await
        .unwrap();
    store
        .add_item(PlayerItem::issued(user, ItemId::from("rope")))
        .await
        .unwrap();

    store.save(&path).await.unwrap();
    let restored = MemoryStore::load(&path).await.unwrap();

    let world = restored.world().await.unwrap();
    assert_eq!(world.current_tick, 10);
    assert_eq!(world.total_explorers_ever, 1);
    assert!(world.is_discovered(&SecretId::from("whispering_grove")));
    assert_eq!(restored.discoveries().await.unwrap().len(), 1);

    let back = restored.explorer(ada_id).await.unwrap().unwrap();
    assert_eq!(back.health, 80);
    assert!((back.days_alive - 2.5).abs() < 1e-9);
    assert_eq!(restored.journal_for(ada_id).await.unwrap().len(), 1);
    assert_eq!(
        restored.legacy(user).await.unwrap().unwrap().total_explorers,
        1
    );
    assert_eq!(restored.items_for(user).await.unwrap().len(), 1);

    // A claimed secret stays claimed after a restart.
    let again = restored
        .claim_secret(WorldDiscovery {
            id: DiscoveryId::new(),
            secret_id: SecretId::from("whispering_grove"),
            discovered_by_explorer: String::from("Bea"),
            discovered_by_user: UserId::new(),
            discovered_on_tick: 11,
            region: RegionId::from("mistwood"),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
    assert!(!again);

    if let Some(dir) = path.parent() {
        let _ = tokio::fs::remove_dir_all(dir).await;
    }
}

#[tokio::test]
async fn open_without_a_file_starts_fresh() {
    let path = scratch_path();
    let store = MemoryStore::open(&path).await.unwrap();
    let world = store.world().await.unwrap();
    assert_eq!(world.current_tick, 0);
    assert!(store.live_explorers().await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_snapshot_is_a_serialization_error() {
    let path = scratch_path();
    let dir = path.parent().unwrap().to_path_buf();
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    let result = MemoryStore::load(&path).await;
    assert!(matches!(result, Err(DbError::Serialization(_))));

    let _ = tokio::fs::remove_dir_all(dir).await;
}

#[tokio::test]
async fn equipping_an_unknown_item_fails() {
    let store = MemoryStore::new();
    let missing = beyond_types::PlayerItemId::new();
    assert!(matches!(
        store.set_equipped(missing, true).await,
        Err(DbError::ItemNotFound(_))
    ));
}

//! Explorer seeding for a self-running world.
//!
//! When `seeding.seed_explorers` is non-zero and the world has no live
//! explorers, the spawner enlists that many explorers for the seed player.
//! Each one sits the personality trial with random answers, which settles
//! its personality and adds its stat points to the rolled stats. It also
//! gets a rolled specialty, a random keepsake, and one guild-issued item
//! equipped. Enlistment goes through the same command a player would use.

use beyond_core::config::SeedingConfig;
use beyond_core::enlist_explorer;
use beyond_db::Stores;
use beyond_explorers::{
    EnlistRequest, ExplorerConfig, TrialAnswer, draw_trial, resolve_trial, roll_specialty,
    roll_stats,
};
use beyond_types::{Explorer, PlayerItem, UserId};
use beyond_world::{RandomSource, ReferenceData};
use tracing::{debug, info};

use crate::error::EngineError;

/// Built-in pool of explorer names. The spawner picks without replacement
/// and falls back to numbered names once the pool runs dry.
const NAME_POOL: &[&str] = &[
    "Alder", "Birch", "Cedar", "Dusk", "Ember", "Fern", "Grove", "Haze", "Iris", "Juniper",
    "Kestrel", "Lark", "Moss", "Nettle", "Quill", "Reed", "Sage", "Thorn", "Vale", "Wren",
];

/// Enlist the configured number of seed explorers.
///
/// Returns the explorers created, which is empty when seeding is disabled
/// or the world is already populated.
pub async fn seed_explorers<S: Stores>(
    store: &S,
    reference: &ReferenceData,
    config: &ExplorerConfig,
    seeding: &SeedingConfig,
    rng: &mut impl RandomSource,
) -> Result<Vec<Explorer>, EngineError> {
    if seeding.seed_explorers == 0 {
        return Ok(Vec::new());
    }
    let live = store.live_explorers().await?.len();
    if live > 0 {
        info!(live, "World already populated, skipping seeding");
        return Ok(Vec::new());
    }

    let user = seeding.seed_user.unwrap_or_else(UserId::new);
    let legacy = store.ensure_legacy(user).await?;
    let catalog = &reference.catalog;
    let keepsakes: Vec<_> = catalog.keepsakes.keys().cloned().collect();
    let guild_items: Vec<_> = catalog.guild_items().map(|i| i.id.clone()).collect();
    let mut names: Vec<&str> = NAME_POOL.to_vec();

    let mut spawned = Vec::new();
    for n in 1..=seeding.seed_explorers {
        let name = if names.is_empty() {
            format!("Explorer {n}")
        } else {
            names.swap_remove(rng.below(names.len())).to_owned()
        };
        let specialty = roll_specialty(catalog, &legacy, rng).ok_or_else(|| {
            EngineError::Spawner {
                message: String::from("catalog has no specialty to roll"),
            }
        })?;
        let answers: Vec<TrialAnswer> = draw_trial(rng)
            .into_iter()
            .map(|scene| TrialAnswer::new(scene.id, rng.below(scene.options.len())))
            .collect();
        let trial = resolve_trial(&answers, rng).map_err(|err| EngineError::Spawner {
            message: err.to_string(),
        })?;
        let keepsake = rng.pick(&keepsakes).cloned().ok_or_else(|| EngineError::Spawner {
            message: String::from("catalog has no keepsakes"),
        })?;

        let mut equipped_items = Vec::new();
        if let Some(item_id) = rng.pick(&guild_items) {
            let issued = PlayerItem::issued(user, item_id.clone());
            equipped_items.push(issued.id);
            store.add_item(issued).await?;
        }

        let request = EnlistRequest {
            user_id: user,
            name,
            stats: trial.boost(roll_stats(legacy.stat_floors, rng)),
            specialty_id: specialty.id.clone(),
            personality_id: trial.personality,
            keepsake_id: keepsake,
            equipped_items,
        };
        let explorer = enlist_explorer(store, reference, config, request).await?;
        debug!(
            explorer_id = %explorer.id,
            name = %explorer.name,
            personality = %explorer.personality_id,
            stats = ?explorer.stats,
            "Seed explorer enlisted"
        );
        spawned.push(explorer);
    }

    info!(user_id = %user, count = spawned.len(), "Seed explorers enlisted");
    Ok(spawned)
}

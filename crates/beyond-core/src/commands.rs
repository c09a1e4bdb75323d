//! Player commands: enlisting an explorer and recalling one.
//!
//! Both commands validate everything they can before writing anything, so
//! a rejected request leaves the store untouched.

use std::collections::BTreeSet;

use beyond_db::{DbError, Stores};
use beyond_explorers::{
    EnlistRequest, ExplorerConfig, ExplorerError, RecallPlan, new_explorer, plan_recall,
    validate_enlistment,
};
use beyond_types::{Explorer, ExplorerId, LegacyCounter, PlayerItemId, UserId, WorldCounter};
use beyond_world::{RandomSource, ReferenceData};
use tracing::info;

/// Errors returned by player commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The request failed validation.
    #[error(transparent)]
    Invalid(#[from] ExplorerError),

    /// No explorer with this id.
    #[error("explorer not found: {0}")]
    ExplorerNotFound(ExplorerId),

    /// An equipped item instance does not exist.
    #[error("inventory item not found: {0}")]
    ItemNotFound(PlayerItemId),

    /// An equipped item instance belongs to another player.
    #[error("item {item} does not belong to player {user}")]
    NotOwner {
        /// The item instance.
        item: PlayerItemId,
        /// The requesting player.
        user: UserId,
    },

    /// An equipped item instance is already carried by another explorer.
    #[error("item already equipped: {0}")]
    AlreadyEquipped(PlayerItemId),

    /// The same instance is listed twice.
    #[error("item listed twice: {0}")]
    DuplicateItem(PlayerItemId),

    /// A store operation failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },
}

/// Send a new explorer through the gate.
///
/// Checks the request against the catalog and the player's inventory, then
/// creates the explorer, marks its items as equipped, and bumps the player
/// and world enlistment counters.
///
/// # Errors
///
/// Returns [`CommandError::Invalid`] for bad names, stats, or catalog ids,
/// one of the item variants for unusable equipment, or
/// [`CommandError::Store`] if a write fails.
pub async fn enlist_explorer<S: Stores>(
    store: &S,
    reference: &ReferenceData,
    config: &ExplorerConfig,
    request: EnlistRequest,
) -> Result<Explorer, CommandError> {
    validate_enlistment(&request, &reference.catalog)?;

    let mut seen = BTreeSet::new();
    for id in &request.equipped_items {
        if !seen.insert(*id) {
            return Err(CommandError::DuplicateItem(*id));
        }
        let item = store
            .item(*id)
            .await?
            .ok_or(CommandError::ItemNotFound(*id))?;
        if item.user_id != request.user_id {
            return Err(CommandError::NotOwner {
                item: *id,
                user: request.user_id,
            });
        }
        if item.is_equipped {
            return Err(CommandError::AlreadyEquipped(*id));
        }
    }

    store.ensure_legacy(request.user_id).await?;
    let explorer = new_explorer(request, config);
    store.insert_explorer(explorer.clone()).await?;
    for id in &explorer.equipped_items {
        store.set_equipped(*id, true).await?;
    }
    store
        .increment_legacy(explorer.user_id, LegacyCounter::Explorers)
        .await?;
    store.increment_world(WorldCounter::ExplorersEver).await?;

    info!(
        explorer_id = %explorer.id,
        user_id = %explorer.user_id,
        name = %explorer.name,
        specialty = %explorer.specialty_id,
        items = explorer.equipped_items.len(),
        "Explorer enlisted"
    );
    Ok(explorer)
}

/// Turn an active explorer toward home.
///
/// # Errors
///
/// Returns [`CommandError::ExplorerNotFound`] for an unknown id,
/// [`CommandError::Invalid`] if the explorer is not active or stands in an
/// unknown region, or [`CommandError::Store`] if the update fails.
pub async fn recall_explorer<S: Stores>(
    store: &S,
    reference: &ReferenceData,
    config: &ExplorerConfig,
    rng: &mut impl RandomSource,
    id: ExplorerId,
) -> Result<RecallPlan, CommandError> {
    let explorer = store
        .explorer(id)
        .await?
        .ok_or(CommandError::ExplorerNotFound(id))?;
    let plan = plan_recall(&explorer, &reference.regions, config, rng)?;
    store.update_explorer(id, plan.update()).await?;

    info!(
        explorer_id = %id,
        region = %explorer.current_region,
        estimated_days = plan.estimated_days,
        survival_chance = plan.survival_chance,
        "Explorer recalled"
    );
    Ok(plan)
}

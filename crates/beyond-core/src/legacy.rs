//! Player legacy bookkeeping after an explorer's journey ends.

use beyond_db::{DbError, LegacyStore};
use beyond_explorers::raised_floors;
use beyond_types::{LegacyBonus, LegacyCounter, LegacyUpdate, PlayerLegacy, UserId};
use beyond_world::Catalog;
use tracing::info;

/// How an explorer's journey ended, as far as the player's legacy cares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JourneyEnd {
    /// Counter to bump: returns or deaths.
    pub counter: LegacyCounter,
    /// Days the explorer lived.
    pub days_survived: f64,
    /// Bonus granted on a successful return.
    pub bonus: Option<LegacyBonus>,
}

/// Record a finished journey on the player's legacy.
///
/// Bumps the counter, raises stat floors for a stat-floor bonus, and
/// appends any specialty whose unlock condition now holds.
pub async fn settle_journey<S: LegacyStore>(
    store: &S,
    catalog: &Catalog,
    user: UserId,
    end: JourneyEnd,
    floor_cap: u8,
) -> Result<PlayerLegacy, DbError> {
    let mut legacy = store.increment_legacy(user, end.counter).await?;

    let mut update = LegacyUpdate::default();
    if let Some(floors) = end
        .bonus
        .and_then(|bonus| raised_floors(legacy.stat_floors, bonus, floor_cap))
    {
        update.stat_floors = Some(floors);
    }

    let unlocked = catalog.newly_unlocked(&legacy, end.days_survived);
    if !unlocked.is_empty() {
        info!(
            user_id = %user,
            specialties = ?unlocked,
            "Specialties unlocked"
        );
        let mut all = legacy.unlocked_specialties.clone();
        all.extend(unlocked);
        update.unlocked_specialties = Some(all);
    }

    if update != LegacyUpdate::default() {
        legacy = store.update_legacy(user, update).await?;
    }
    Ok(legacy)
}

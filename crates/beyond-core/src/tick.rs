//! Tick cycle: one pass over every live explorer.
//!
//! Each tick runs these steps:
//!
//! 1. **Load** -- read the world record and every `active` or `returning`
//!    explorer. The tick number is the stored counter plus one.
//!
//! 2. **Resolve** -- for each explorer, independently:
//!    - `active`: aggregate modifiers, then run the [`ACTIVE_PIPELINE`]
//!      (survival, discovery, movement, quiet). A death ends the explorer's
//!      tick; otherwise the explorer rests and the result is persisted in
//!      one update.
//!    - `returning`: advance the journey home, which ends in a death, an
//!      arrival, or another day on the road.
//!
//! 3. **Persist** -- write the new tick counter once.
//!
//! A failure while processing one explorer is logged, recorded in the
//! [`TickSummary`], and never stops the rest of the batch. Secret claims go
//! through the store's compare-and-set so that two explorers cannot both
//! become a secret's first discoverer.

use std::collections::BTreeSet;
use std::sync::Arc;

use beyond_db::{DbError, Stores};
use beyond_explorers::{
    ACTIVE_PIPELINE, DangerOutcome, DeathCause, Discovery, EventChain, ExplorerConfig, Modifiers,
    ReturnOutcome, ReturnStep, Stage, TickEvent, advance_return, aggregate, arrival_update,
    discovery_attempted, legacy_bonus_for, minor, process_death, quiet_entry, resolve_movement,
    resolve_survival, roll_item, roll_secret, secret_found,
};
use beyond_types::{
    DiscoveryId, Explorer, ExplorerId, ExplorerStatus, ExplorerUpdate, ItemId, JournalEntry,
    JournalEventType, LegacyCounter, PlayerItem, RegionId, SecretId, WorldCounter,
    WorldDiscovery, WorldStateUpdate,
};
use beyond_world::{RandomSource, ReferenceData, Region, narrative};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::legacy::{JourneyEnd, settle_journey};

/// Errors that abort a whole tick.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Another tick is still running; this one was skipped.
    #[error("a tick is already running")]
    AlreadyRunning,

    /// Loading the batch or persisting the tick counter failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },
}

/// Errors confined to one explorer's tick.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerTickError {
    /// A store operation failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: DbError,
    },
}

/// What happened to one explorer this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// An active explorer survived the tick. `label` names the most
    /// telling event (`quiet`, `danger_survived`, `discovery_item`,
    /// `discovery_secret`, `discovery_minor`, `moved`).
    Active {
        /// Event label.
        label: &'static str,
    },
    /// A returning explorer is still on the road.
    EnRoute,
    /// A returning explorer reached the gate.
    Returned,
    /// The explorer died.
    Died {
        /// Cause-of-death key.
        cause: String,
    },
    /// The explorer's region is unknown; nothing was changed.
    Skipped {
        /// The unknown region.
        region: RegionId,
    },
    /// The explorer had already finished its journey; nothing was changed.
    Finished {
        /// Its terminal status.
        status: ExplorerStatus,
    },
    /// Processing failed; persisted state may be partially updated.
    Failed {
        /// Error message.
        error: String,
    },
}

impl Outcome {
    /// Short tag for logs and summaries.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Active { label } => *label,
            Self::EnRoute => "returning",
            Self::Returned => "returned",
            Self::Died { .. } => "died",
            Self::Skipped { .. } => "skipped",
            Self::Finished { .. } => "finished",
            Self::Failed { .. } => "error",
        }
    }
}

/// One explorer's result in a [`TickSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorerOutcome {
    /// The explorer.
    pub explorer_id: ExplorerId,
    /// What happened.
    pub outcome: Outcome,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Explorers loaded for this tick.
    pub explorers_processed: u32,
    /// Per-explorer results, in processing order.
    pub outcomes: Vec<ExplorerOutcome>,
}

impl TickSummary {
    /// How many outcomes carry `tag`.
    pub fn count(&self, tag: &str) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.outcome.tag() == tag)
            .count()
    }
}

/// Drives ticks against a store.
pub struct TickEngine<S, R> {
    /// Persistence.
    store: Arc<S>,
    /// Region graph, catalog, narrative.
    reference: Arc<ReferenceData>,
    /// Resolver tunables.
    config: ExplorerConfig,
    /// Randomness for every resolver.
    rng: R,
}

impl<S: Stores, R: RandomSource> TickEngine<S, R> {
    /// Create an engine.
    pub const fn new(
        store: Arc<S>,
        reference: Arc<ReferenceData>,
        config: ExplorerConfig,
        rng: R,
    ) -> Self {
        Self {
            store,
            reference,
            config,
            rng,
        }
    }

    /// The store this engine writes to.
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run one tick over every live explorer.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Store`] if the batch cannot be loaded or the tick
    /// counter cannot be written. Per-explorer failures are recorded in the
    /// summary instead.
    pub async fn run_tick(&mut self) -> Result<TickSummary, TickError> {
        let world = self.store.world().await?;
        let tick = world.current_tick.saturating_add(1);
        let mut discovered = world.discovered_secrets;
        let explorers = self.store.live_explorers().await?;

        info!(tick, explorers = explorers.len(), "Tick started");

        let mut outcomes = Vec::with_capacity(explorers.len());
        for explorer in &explorers {
            let outcome = match self.process_explorer(explorer, tick, &mut discovered).await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(
                        tick,
                        explorer_id = %explorer.id,
                        error = %err,
                        "Explorer tick failed"
                    );
                    Outcome::Failed {
                        error: err.to_string(),
                    }
                }
            };
            debug!(tick, explorer_id = %explorer.id, outcome = outcome.tag(), "Explorer resolved");
            outcomes.push(ExplorerOutcome {
                explorer_id: explorer.id,
                outcome,
            });
        }

        self.store
            .update_world(WorldStateUpdate {
                current_tick: Some(tick),
            })
            .await?;

        let summary = TickSummary {
            tick,
            explorers_processed: u32::try_from(explorers.len()).unwrap_or(u32::MAX),
            outcomes,
        };
        info!(
            tick,
            processed = summary.explorers_processed,
            deaths = summary.count("died"),
            returns = summary.count("returned"),
            failures = summary.count("error"),
            "Tick complete"
        );
        Ok(summary)
    }

    /// Route one explorer to its status-specific processing.
    async fn process_explorer(
        &mut self,
        explorer: &Explorer,
        tick: u64,
        discovered: &mut BTreeSet<SecretId>,
    ) -> Result<Outcome, ExplorerTickError> {
        match explorer.status {
            ExplorerStatus::Active => self.process_active(explorer, tick, discovered).await,
            ExplorerStatus::Returning => self.process_returning(explorer, tick).await,
            // Terminal explorers are never loaded; nothing to do if one slips in.
            status @ (ExplorerStatus::Returned | ExplorerStatus::Dead) => {
                Ok(Outcome::Finished { status })
            }
        }
    }

    /// Modifiers for `explorer`, resolving equipped instances through the
    /// inventory. Instances that no longer exist are skipped.
    async fn modifiers_for(&self, explorer: &Explorer) -> Result<Modifiers, ExplorerTickError> {
        let mut equipped: Vec<ItemId> = Vec::with_capacity(explorer.equipped_items.len());
        for instance in &explorer.equipped_items {
            match self.store.item(*instance).await? {
                Some(item) => equipped.push(item.item_id),
                None => debug!(
                    explorer_id = %explorer.id,
                    item = %instance,
                    "Equipped item missing from inventory, skipped"
                ),
            }
        }
        Ok(aggregate(explorer, &self.reference.catalog, &equipped))
    }

    /// One tick for an `active` explorer.
    async fn process_active(
        &mut self,
        explorer: &Explorer,
        tick: u64,
        discovered: &mut BTreeSet<SecretId>,
    ) -> Result<Outcome, ExplorerTickError> {
        let reference = Arc::clone(&self.reference);
        let Some(region) = reference.regions.get(&explorer.current_region) else {
            warn!(
                tick,
                explorer_id = %explorer.id,
                region = %explorer.current_region,
                "Explorer in unknown region, skipped"
            );
            return Ok(Outcome::Skipped {
                region: explorer.current_region.clone(),
            });
        };
        let mods = self.modifiers_for(explorer).await?;

        // Working copy carrying this tick's changes.
        let mut current = explorer.clone();
        let mut chain = EventChain::new();

        for stage in ACTIVE_PIPELINE {
            if !chain.runs(stage) {
                continue;
            }
            match stage {
                Stage::Survival => {
                    match resolve_survival(
                        &current,
                        region,
                        &mods,
                        &self.config,
                        &reference.narrative,
                        &mut self.rng,
                    ) {
                        None => {}
                        Some(DangerOutcome::Escaped { text }) => {
                            chain.push(TickEvent::new(stage, text, JournalEventType::Danger, true));
                        }
                        Some(DangerOutcome::Injured { health, text, .. }) => {
                            current.health = health;
                            chain.push(TickEvent::new(stage, text, JournalEventType::Danger, true));
                        }
                        Some(DangerOutcome::Died { cause }) => {
                            return self.finish_death(&current, cause, tick).await;
                        }
                    }
                }
                Stage::Discovery => {
                    if let Some(found) = self
                        .resolve_discovery(&current, region, &mods, tick, discovered)
                        .await?
                    {
                        let significant = found.is_significant();
                        let event_type = found.event_type();
                        let text = match found {
                            Discovery::Secret { text, .. } | Discovery::Minor { text } => text,
                            Discovery::Item { found, text } => {
                                current.found_items.push(found);
                                text
                            }
                        };
                        chain.push(TickEvent::new(stage, text, event_type, significant));
                    }
                }
                Stage::Movement => {
                    if let Some(relocation) = resolve_movement(
                        &current,
                        region,
                        &reference.regions,
                        &mods,
                        &self.config,
                        &mut self.rng,
                    ) {
                        current.current_region = relocation.to;
                        chain.push(TickEvent::new(
                            stage,
                            relocation.text,
                            JournalEventType::Movement,
                            false,
                        ));
                    }
                }
                Stage::Quiet => {
                    if let Some(text) = quiet_entry(
                        &current,
                        region,
                        &self.config,
                        &reference.narrative,
                        &mut self.rng,
                    ) {
                        chain.push(TickEvent::new(stage, text, JournalEventType::Quiet, false));
                    }
                }
            }
        }

        let label = chain.label();
        let health = current
            .health
            .saturating_add(self.config.rest_recovery(mods.rest_bonus))
            .min(beyond_types::MAX_HEALTH);
        let update = ExplorerUpdate {
            health: Some(health),
            current_region: Some(current.current_region),
            days_alive: Some(current.days_alive + self.config.days_per_tick),
            found_items: Some(current.found_items),
            ..ExplorerUpdate::default()
        };
        self.store.update_explorer(explorer.id, update).await?;

        let day = explorer.journal_day();
        for event in chain.into_events() {
            debug!(
                tick,
                explorer_id = %explorer.id,
                stage = event.stage.as_str(),
                "Journal event"
            );
            self.store
                .append_journal(JournalEntry::new(
                    explorer.id,
                    day,
                    tick,
                    event.text,
                    event.event_type,
                    event.significant,
                ))
                .await?;
        }

        Ok(Outcome::Active { label })
    }

    /// The discovery stage: gate roll, then secret, item, or minor flavor.
    ///
    /// A secret another explorer already claimed falls through to the item
    /// branch.
    async fn resolve_discovery(
        &mut self,
        explorer: &Explorer,
        region: &Region,
        mods: &Modifiers,
        tick: u64,
        discovered: &mut BTreeSet<SecretId>,
    ) -> Result<Option<Discovery>, ExplorerTickError> {
        if !discovery_attempted(mods, &self.config, &mut self.rng) {
            return Ok(None);
        }

        if let Some(secret) = roll_secret(region, discovered, mods, &self.config, &mut self.rng) {
            let claimed = self
                .store
                .claim_secret(WorldDiscovery {
                    id: DiscoveryId::new(),
                    secret_id: secret.id.clone(),
                    discovered_by_explorer: explorer.name.clone(),
                    discovered_by_user: explorer.user_id,
                    discovered_on_tick: tick,
                    region: region.id.clone(),
                    created_at: Utc::now(),
                })
                .await?;
            discovered.insert(secret.id.clone());
            if claimed {
                info!(
                    tick,
                    explorer_id = %explorer.id,
                    secret = %secret.id,
                    region = %region.id,
                    "Secret discovered"
                );
                self.store
                    .increment_legacy(explorer.user_id, LegacyCounter::Discoveries)
                    .await?;
                return Ok(Some(secret_found(explorer, secret)));
            }
            debug!(tick, secret = %secret.id, "Secret claimed by another explorer");
        }

        let reference = Arc::clone(&self.reference);
        let found = roll_item(
            explorer,
            region,
            &reference.catalog,
            mods,
            &self.config,
            &mut self.rng,
        )
        .unwrap_or_else(|| minor(explorer, region, &reference.narrative, &mut self.rng));
        Ok(Some(found))
    }

    /// One tick for a `returning` explorer.
    ///
    /// The explorer's own update is written first; everything else follows
    /// only once it has landed.
    async fn process_returning(
        &mut self,
        explorer: &Explorer,
        tick: u64,
    ) -> Result<Outcome, ExplorerTickError> {
        let reference = Arc::clone(&self.reference);
        let mods = self.modifiers_for(explorer).await?;
        let step = advance_return(explorer, &mods, &self.config, &mut self.rng);

        let mut advanced = explorer.clone();
        step.progress_update().apply(&mut advanced);
        let day = advanced.journal_day();

        match step.outcome {
            ReturnOutcome::Lost => {
                self.finish_death(&advanced, DeathCause::LostReturning, tick)
                    .await
            }
            ReturnOutcome::Arrived => {
                let bonus = legacy_bonus_for(step.days_alive, &self.config, &mut self.rng);
                self.store
                    .update_explorer(explorer.id, arrival_update(&step, bonus))
                    .await?;
                self.record_item_lost(explorer, day, tick, &step).await?;

                for found in &step.found_items {
                    self.store
                        .add_item(PlayerItem::brought_home(
                            explorer.user_id,
                            &explorer.name,
                            found,
                        ))
                        .await?;
                }
                for instance in &explorer.equipped_items {
                    if let Err(err) = self.store.set_equipped(*instance, false).await {
                        debug!(item = %instance, error = %err, "Could not release equipped item");
                    }
                }

                self.store
                    .append_journal(JournalEntry::new(
                        explorer.id,
                        day,
                        tick,
                        narrative::fill(narrative::RETURN_HOME, &explorer.name),
                        JournalEventType::Return,
                        true,
                    ))
                    .await?;
                self.store.increment_world(WorldCounter::ReturnsEver).await?;
                settle_journey(
                    &*self.store,
                    &reference.catalog,
                    explorer.user_id,
                    JourneyEnd {
                        counter: LegacyCounter::Returns,
                        days_survived: step.days_alive,
                        bonus: Some(bonus),
                    },
                    self.config.stat_floor_cap,
                )
                .await?;

                info!(
                    tick,
                    explorer_id = %explorer.id,
                    days_alive = step.days_alive,
                    items = step.found_items.len(),
                    bonus = ?bonus,
                    "Explorer returned"
                );
                Ok(Outcome::Returned)
            }
            ReturnOutcome::EnRoute => {
                self.store
                    .update_explorer(explorer.id, step.progress_update())
                    .await?;
                self.record_item_lost(explorer, day, tick, &step).await?;

                let text = reference.narrative.returning(&explorer.name, &mut self.rng);
                self.store
                    .append_journal(JournalEntry::new(
                        explorer.id,
                        day,
                        tick,
                        text,
                        JournalEventType::Returning,
                        false,
                    ))
                    .await?;
                Ok(Outcome::EnRoute)
            }
        }
    }

    /// Journal the item dropped during a return delay, if any.
    async fn record_item_lost(
        &self,
        explorer: &Explorer,
        day: u32,
        tick: u64,
        step: &ReturnStep,
    ) -> Result<(), ExplorerTickError> {
        let Some(lost) = &step.lost_item else {
            return Ok(());
        };
        let Some(item) = self.reference.catalog.item(&lost.item_id) else {
            return Ok(());
        };
        self.store
            .append_journal(JournalEntry::new(
                explorer.id,
                day,
                tick,
                narrative::item_lost(&item.name),
                JournalEventType::ItemLost,
                false,
            ))
            .await?;
        Ok(())
    }

    /// Finalize a death: terminal update, then journal, counters, unlocks.
    async fn finish_death(
        &mut self,
        explorer: &Explorer,
        cause: DeathCause,
        tick: u64,
    ) -> Result<Outcome, ExplorerTickError> {
        let reference = Arc::clone(&self.reference);
        let record = process_death(
            explorer,
            cause,
            &reference.catalog,
            &reference.narrative,
            &mut self.rng,
        );

        self.store
            .update_explorer(explorer.id, record.update)
            .await?;
        self.store
            .append_journal(JournalEntry::new(
                explorer.id,
                explorer.journal_day(),
                tick,
                record.text,
                JournalEventType::Death,
                true,
            ))
            .await?;
        self.store.increment_world(WorldCounter::DeathsEver).await?;
        settle_journey(
            &*self.store,
            &reference.catalog,
            explorer.user_id,
            JourneyEnd {
                counter: LegacyCounter::Deaths,
                days_survived: explorer.days_alive,
                bonus: None,
            },
            self.config.stat_floor_cap,
        )
        .await?;

        info!(
            tick,
            explorer_id = %explorer.id,
            cause = %record.cause,
            region = %explorer.current_region,
            "Explorer died"
        );
        Ok(Outcome::Died {
            cause: record.cause.key().to_owned(),
        })
    }
}

//! Scheduled tick loop with a re-entrancy guard.
//!
//! [`TickRunner`] owns the [`TickEngine`] and guarantees at most one tick
//! runs at a time. A tick requested while another is in flight is skipped
//! with [`TickError::AlreadyRunning`]; it is never queued. The scheduled
//! loop fires on a fixed interval and drops firings it missed.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use beyond_db::Stores;
use beyond_world::RandomSource;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::tick::{TickEngine, TickError, TickSummary};

/// Callback invoked after each tick completes.
///
/// Implementations can use this to save a snapshot, publish the summary,
/// etc.
pub trait TickCallback: Send {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary) -> impl Future<Output = ()> + Send;
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    async fn on_tick(&mut self, _summary: &TickSummary) {}
}

/// Clears the running flag when a tick finishes, however it finishes.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owns the engine and serializes tick execution.
pub struct TickRunner<S, R, C> {
    /// The engine. Locked only while the guard is held.
    engine: Mutex<TickEngine<S, R>>,
    /// After-tick hook.
    callback: Mutex<C>,
    /// Set while a tick is in flight.
    running: AtomicBool,
}

impl<S: Stores, R: RandomSource, C: TickCallback> TickRunner<S, R, C> {
    /// Wrap an engine and an after-tick callback.
    pub fn new(engine: TickEngine<S, R>, callback: C) -> Self {
        Self {
            engine: Mutex::new(engine),
            callback: Mutex::new(callback),
            running: AtomicBool::new(false),
        }
    }

    /// Whether a tick is currently running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run one tick now.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::AlreadyRunning`] if a tick is in flight, or the
    /// tick's own error if it could not complete.
    pub async fn run_once(&self) -> Result<TickSummary, TickError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Tick already running, skipping");
            return Err(TickError::AlreadyRunning);
        }
        let _guard = RunningGuard(&self.running);

        let summary = self.engine.lock().await.run_tick().await?;
        self.callback.lock().await.on_tick(&summary).await;
        Ok(summary)
    }

    /// Tick every `interval` until `shutdown` resolves.
    ///
    /// The first tick fires immediately. Failed ticks are logged; the next
    /// firing is the only retry.
    pub async fn run_scheduled(&self, interval: Duration, shutdown: impl Future<Output = ()>) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(interval_secs = interval.as_secs(), "Tick loop starting");
        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutdown requested, tick loop stopping");
                    break;
                }
                _ = ticker.tick() => {
                    match self.run_once().await {
                        Ok(_) | Err(TickError::AlreadyRunning) => {}
                        Err(err) => error!(error = %err, "Tick failed"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use beyond_db::MemoryStore;
    use beyond_explorers::ExplorerConfig;
    use beyond_world::{ReferenceData, ScriptedDice};

    use super::*;

    struct Counting(Arc<std::sync::atomic::AtomicU64>);

    impl TickCallback for Counting {
        async fn on_tick(&mut self, summary: &TickSummary) {
            self.0.store(summary.tick, Ordering::SeqCst);
        }
    }

    fn runner<C: TickCallback>(callback: C) -> TickRunner<MemoryStore, ScriptedDice, C> {
        let engine = TickEngine::new(
            Arc::new(MemoryStore::new()),
            Arc::new(ReferenceData::starting().unwrap()),
            ExplorerConfig::default(),
            ScriptedDice::new(Vec::new()),
        );
        TickRunner::new(engine, callback)
    }

    #[tokio::test]
    async fn run_once_advances_the_tick_and_calls_back() {
        let seen = Arc::new(std::sync::atomic::AtomicU64::new(0));
        let runner = runner(Counting(Arc::clone(&seen)));
        let first = runner.run_once().await.unwrap();
        let second = runner.run_once().await.unwrap();
        assert_eq!(first.tick, 1);
        assert_eq!(second.tick, 2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert!(!runner.is_running());
    }

    #[tokio::test]
    async fn busy_runner_rejects_a_second_tick() {
        let runner = runner(NoOpCallback);
        runner.running.store(true, Ordering::Release);
        assert!(runner.is_running());
        assert!(matches!(
            runner.run_once().await,
            Err(TickError::AlreadyRunning)
        ));

        runner.running.store(false, Ordering::Release);
        assert!(runner.run_once().await.is_ok());
    }

    #[tokio::test]
    async fn scheduled_loop_stops_on_shutdown() {
        let seen = Arc::new(std::sync::atomic::AtomicU64::new(0));
        let runner = runner(Counting(Arc::clone(&seen)));
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let shutdown = async {
            let _ = rx.await;
        };
        let stopper = async {
            tokio::time::sleep(Duration::from_millis(60)).await;
            let _ = tx.send(());
        };
        tokio::join!(
            runner.run_scheduled(Duration::from_millis(10), shutdown),
            stopper
        );
        assert!(seen.load(Ordering::SeqCst) >= 1);
        assert!(!runner.is_running());
    }
}

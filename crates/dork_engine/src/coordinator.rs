use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use dork_core::{
    AccumulatedUrls, ClaimedDork, DorkQueue, EngineStats, RunCommand, RunState, UrlFilter,
};
use dork_logging::{dork_error, dork_info, dork_warn};
use futures_util::future::join_all;
use tokio::task::JoinHandle;

use crate::control::RunControl;
use crate::delay::DelayRange;
use crate::fetch::Fetcher;
use crate::persist::{flush_results, local_timestamp};
use crate::provider::{Provider, ProviderRegistry};
use crate::worker::run_worker;
use crate::{EngineError, EngineEvent, FlushOutcome, PageFailure, PageProgress, RunSummary};

/// Produces the stamp embedded in the results file name.
pub type TimestampFn = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Clone)]
pub struct EngineSettings {
    pub delay: DelayRange,
    pub output_dir: PathBuf,
    pub filter: UrlFilter,
    pub timestamp: TimestampFn,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            delay: DelayRange::default(),
            output_dir: PathBuf::from("."),
            filter: UrlFilter::default(),
            timestamp: Arc::new(local_timestamp),
        }
    }
}

/// Owns the shared state of a run and supervises its workers.
///
/// Cloning is cheap; every clone controls the same run, so pause, resume and
/// stop may be issued from any thread.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

struct Inner {
    registry: ProviderRegistry,
    fetcher: Arc<dyn Fetcher>,
    settings: EngineSettings,
    control: RunControl,
    ledger: Mutex<RunLedger>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

/// Everything guarded by the single run lock: the dork cursor, the
/// accumulated URLs, statistics and the progress queue.
struct RunLedger {
    queue: DorkQueue,
    urls: AccumulatedUrls,
    stats: EngineStats,
    events: mpsc::Sender<EngineEvent>,
    last_summary: Option<RunSummary>,
}

impl RunLedger {
    fn emit(&self, event: EngineEvent) {
        // The receiver lives as long as the coordinator; a failed send only
        // happens during teardown.
        let _ = self.events.send(event);
    }
}

impl Coordinator {
    pub fn new(
        registry: ProviderRegistry,
        fetcher: Arc<dyn Fetcher>,
        settings: EngineSettings,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        let ledger = RunLedger {
            queue: DorkQueue::default(),
            urls: AccumulatedUrls::new(),
            stats: EngineStats::default(),
            events: event_tx,
            last_summary: None,
        };
        Self {
            inner: Arc::new(Inner {
                registry,
                fetcher,
                settings,
                control: RunControl::new(),
                ledger: Mutex::new(ledger),
                event_rx: Mutex::new(event_rx),
            }),
        }
    }

    /// Validates the input, resets shared state and launches `worker_count`
    /// workers plus a monitor on the current Tokio runtime. Returns as soon
    /// as the tasks are spawned.
    pub fn start<S: AsRef<str>>(
        &self,
        dorks: Vec<String>,
        providers: &[S],
        worker_count: usize,
    ) -> Result<(), EngineError> {
        if dorks.is_empty() {
            return Err(EngineError::InvalidInput("no dorks to search".to_string()));
        }
        if worker_count == 0 {
            return Err(EngineError::InvalidInput(
                "worker count must be at least 1".to_string(),
            ));
        }
        let selected: Arc<[Provider]> = self.inner.registry.select(providers)?.into();
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| EngineError::NoRuntime)?;

        {
            let mut ledger = self.lock_ledger();
            let state = self
                .inner
                .control
                .apply(RunCommand::Start)
                .ok_or(EngineError::AlreadyRunning)?;

            ledger.queue = DorkQueue::new(dorks);
            ledger.urls = AccumulatedUrls::new();
            ledger.stats = EngineStats::for_providers(selected.iter().map(|p| p.id.clone()));
            ledger.last_summary = None;
            ledger.emit(EngineEvent::StateChanged(state));

            dork_info!(
                "Run started: {} dorks, providers [{}], {} workers",
                ledger.queue.len(),
                selected
                    .iter()
                    .map(|p| p.id.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                worker_count
            );
        }

        let workers: Vec<JoinHandle<()>> = (0..worker_count)
            .map(|worker_id| runtime.spawn(run_worker(worker_id, self.clone(), selected.clone())))
            .collect();
        runtime.spawn(monitor(self.clone(), workers));
        Ok(())
    }

    /// Hands out the next unclaimed dork, or `None` once every dork is taken.
    pub fn next_dork(&self) -> Option<ClaimedDork> {
        self.lock_ledger().queue.claim()
    }

    /// Filters `candidates` against the accumulated set, merges survivors,
    /// updates statistics and emits a progress event, all under one lock.
    /// Returns the number of survivors.
    pub fn report_page(&self, provider: &str, dork: &str, page: usize, candidates: &[String]) -> usize {
        let mut ledger = self.lock_ledger();
        let survivors = self.inner.settings.filter.filter(candidates, &ledger.urls);
        let valid = survivors.len();
        ledger.urls.extend(survivors);
        ledger.stats.record(provider, candidates.len(), valid);
        let accumulated = ledger.urls.len();
        ledger.emit(EngineEvent::Page(PageProgress {
            provider: provider.to_string(),
            dork: dork.to_string(),
            page,
            total_found: candidates.len(),
            valid_found: valid,
            accumulated,
        }));
        valid
    }

    /// Emits a failure event; statistics and URLs are untouched.
    pub fn report_error(&self, provider: &str, dork: &str, page: usize, message: impl Into<String>) {
        let message = message.into();
        dork_warn!(
            "Error in {} for dork '{}' page {}: {}",
            provider,
            dork,
            page,
            message
        );
        self.lock_ledger().emit(EngineEvent::PageFailed(PageFailure {
            provider: provider.to_string(),
            dork: dork.to_string(),
            page,
            message,
        }));
    }

    /// Returns true if the run was running and is now paused.
    pub fn pause(&self) -> bool {
        self.apply(RunCommand::Pause)
    }

    pub fn resume(&self) -> bool {
        self.apply(RunCommand::Resume)
    }

    /// Requests a graceful drain. Idempotent: only the call that actually
    /// moves the run to `Stopping` returns true.
    pub fn stop(&self) -> bool {
        self.apply(RunCommand::Stop)
    }

    pub fn state(&self) -> RunState {
        self.inner.control.state()
    }

    pub fn stats(&self) -> EngineStats {
        self.lock_ledger().stats.clone()
    }

    /// Snapshot of the URLs accumulated so far in the current run.
    pub fn accumulated(&self) -> Vec<String> {
        self.lock_ledger().urls.as_slice().to_vec()
    }

    pub fn last_summary(&self) -> Option<RunSummary> {
        self.lock_ledger().last_summary.clone()
    }

    /// Waits until the current run completes. Returns `None` if no run was
    /// ever started.
    pub async fn wait_completed(&self) -> Option<RunSummary> {
        if self.state() == RunState::Idle {
            return None;
        }
        self.inner.control.wait_for_state(RunState::Completed).await;
        self.last_summary()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.inner
            .event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.inner
            .event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv_timeout(timeout)
            .ok()
    }

    /// Takes every event queued so far.
    pub fn drain_events(&self) -> Vec<EngineEvent> {
        let rx = self
            .inner
            .event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        rx.try_iter().collect()
    }

    pub(crate) fn fetcher(&self) -> &dyn Fetcher {
        self.inner.fetcher.as_ref()
    }

    pub(crate) fn settings(&self) -> &EngineSettings {
        &self.inner.settings
    }

    pub(crate) fn control(&self) -> &RunControl {
        &self.inner.control
    }

    fn apply(&self, command: RunCommand) -> bool {
        let ledger = self.lock_ledger();
        match self.inner.control.apply(command) {
            Some(state) => {
                dork_info!("Run state -> {}", state);
                ledger.emit(EngineEvent::StateChanged(state));
                true
            }
            None => false,
        }
    }

    fn lock_ledger(&self) -> MutexGuard<'_, RunLedger> {
        self.inner
            .ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Flushes the accumulated URLs once and moves the run to `Completed`.
    async fn finish_run(&self) {
        let (urls, stats, dorks_total, dorks_claimed) = {
            let mut ledger = self.lock_ledger();
            (
                std::mem::take(&mut ledger.urls),
                ledger.stats.clone(),
                ledger.queue.len(),
                ledger.queue.claimed(),
            )
        };

        let dir = self.inner.settings.output_dir.clone();
        let timestamp = (self.inner.settings.timestamp)();
        let snapshot = urls.clone();
        let flush = tokio::task::spawn_blocking(move || flush_results(&dir, &timestamp, &snapshot))
            .await
            .unwrap_or_else(|err| FlushOutcome::Failed(err.to_string()));

        match &flush {
            FlushOutcome::Written(path) => {
                dork_info!("Saved {} URLs to {}", urls.len(), path.display())
            }
            FlushOutcome::Failed(err) => dork_error!("Error saving results: {}", err),
            FlushOutcome::Skipped => dork_info!("No URLs accumulated; nothing saved"),
        }

        let summary = RunSummary {
            urls: urls.into_vec(),
            stats,
            dorks_total,
            dorks_claimed,
            flush,
        };

        let mut ledger = self.lock_ledger();
        ledger.last_summary = Some(summary.clone());
        if let Some(state) = self.inner.control.apply(RunCommand::Drained) {
            ledger.emit(EngineEvent::StateChanged(state));
        }
        ledger.emit(EngineEvent::RunCompleted(summary));
    }
}

/// Waits for every worker to exit, stops a run that ran out of dorks, then
/// performs the single flush of the run.
async fn monitor(coordinator: Coordinator, workers: Vec<JoinHandle<()>>) {
    for outcome in join_all(workers).await {
        if let Err(err) = outcome {
            dork_error!("Worker task ended abnormally: {}", err);
        }
    }

    if coordinator.stop() {
        dork_info!("All dorks consumed; stopping run");
    }
    coordinator.finish_run().await;
}

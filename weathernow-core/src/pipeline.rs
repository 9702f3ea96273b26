//! Sequences one forecast run and publishes the result.
//!
//! Every run gets an id from a monotonically increasing counter. A run may only
//! write to the published snapshot while its id is the latest, and starting a
//! new run cancels whatever the previous one is still waiting on. A slow run
//! therefore can never overwrite the result of a query issued after it.

use chrono::Timelike;
use serde::Serialize;
use std::{
    future::Future,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    auxiliary::fetch_auxiliary,
    error::PipelineError,
    forecast::fetch_forecast,
    geocode::{resolve_location, validate_query},
    provider::Providers,
    view_model::ViewModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Validating,
    ResolvingLocation,
    FetchingForecast,
    FetchingAuxiliary,
    Ready,
    Errored,
}

/// What renderers observe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub run_id: u64,
    pub state: PipelineState,
    pub view: ViewModel,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self { run_id: 0, state: PipelineState::Idle, view: ViewModel::default() }
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    Ready(ViewModel),
    Failed(PipelineError),
    /// A newer run started before this one could commit; nothing was written.
    Superseded,
}

/// Source of the hour used to anchor the hourly window.
pub trait Clock: Send + Sync {
    fn current_hour(&self) -> u32;
}

/// The caller's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn current_hour(&self) -> u32 {
        chrono::Local::now().hour()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedHour(pub u32);

impl Clock for FixedHour {
    fn current_hour(&self) -> u32 {
        self.0
    }
}

enum Interrupt {
    Failed(PipelineError),
    Superseded,
}

impl From<PipelineError> for Interrupt {
    fn from(e: PipelineError) -> Self {
        Interrupt::Failed(e)
    }
}

pub struct Pipeline {
    providers: Providers,
    clock: Arc<dyn Clock>,
    latest: AtomicU64,
    cancel: Mutex<CancellationToken>,
    published: watch::Sender<Snapshot>,
}

impl Pipeline {
    pub fn new(providers: Providers) -> Self {
        Self::with_clock(providers, Arc::new(LocalClock))
    }

    pub fn with_clock(providers: Providers, clock: Arc<dyn Clock>) -> Self {
        let (published, _) = watch::channel(Snapshot::default());
        Self {
            providers,
            clock,
            latest: AtomicU64::new(0),
            cancel: Mutex::new(CancellationToken::new()),
            published,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.published.subscribe()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.published.borrow().clone()
    }

    /// Run a query to completion, or until a newer query supersedes it.
    pub async fn run(&self, query: &str) -> RunOutcome {
        let (run_id, token) = self.begin();
        tracing::info!(run_id, query, "starting forecast run");

        match self.execute(run_id, &token, query).await {
            Ok(view) => {
                if self.commit(run_id, PipelineState::Ready, Some(view.clone())) {
                    tracing::info!(run_id, "forecast run ready");
                    RunOutcome::Ready(view)
                } else {
                    self.superseded(run_id)
                }
            }
            Err(Interrupt::Failed(e)) => {
                let view = ViewModel::errored(e.user_message());
                if self.commit(run_id, PipelineState::Errored, Some(view)) {
                    tracing::warn!(run_id, "forecast run failed: {e}");
                    RunOutcome::Failed(e)
                } else {
                    self.superseded(run_id)
                }
            }
            Err(Interrupt::Superseded) => self.superseded(run_id),
        }
    }

    async fn execute(
        &self,
        run_id: u64,
        token: &CancellationToken,
        query: &str,
    ) -> Result<ViewModel, Interrupt> {
        self.enter(run_id, PipelineState::Validating)?;
        let query = validate_query(query)?;

        self.enter(run_id, PipelineState::ResolvingLocation)?;
        let location =
            guarded(token, resolve_location(self.providers.geocoder.as_ref(), query)).await??;
        let coordinate = location.coordinate;

        self.enter(run_id, PipelineState::FetchingForecast)?;
        let raw = guarded(token, fetch_forecast(self.providers.forecast.as_ref(), coordinate))
            .await??;
        // Taken before the auxiliary lookups so their latency can't shift the window.
        let start_hour = self.clock.current_hour() as usize;

        self.enter(run_id, PipelineState::FetchingAuxiliary)?;
        let auxiliary = guarded(
            token,
            fetch_auxiliary(
                self.providers.local_time.as_ref(),
                self.providers.air_quality.as_ref(),
                coordinate,
            ),
        )
        .await?;

        Ok(ViewModel::build(location, &raw, auxiliary, start_hour))
    }

    /// Allocate a run id and cancel the previous run, under one lock so that
    /// ids and tokens are handed out in the same order.
    fn begin(&self) -> (u64, CancellationToken) {
        let mut current = self.cancel.lock().unwrap_or_else(PoisonError::into_inner);
        current.cancel();
        *current = CancellationToken::new();
        let run_id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        (run_id, current.clone())
    }

    fn enter(&self, run_id: u64, state: PipelineState) -> Result<(), Interrupt> {
        if self.commit(run_id, state, None) {
            tracing::debug!(run_id, ?state, "entered state");
            Ok(())
        } else {
            Err(Interrupt::Superseded)
        }
    }

    /// Publish `state` (and `view`, if given) unless a newer run has started.
    /// The id check happens inside the channel's write lock.
    fn commit(&self, run_id: u64, state: PipelineState, view: Option<ViewModel>) -> bool {
        let latest = &self.latest;
        self.published.send_if_modified(|snapshot| {
            if latest.load(Ordering::SeqCst) != run_id {
                return false;
            }
            snapshot.run_id = run_id;
            snapshot.state = state;
            if let Some(view) = view {
                snapshot.view = view;
            }
            true
        })
    }

    fn superseded(&self, run_id: u64) -> RunOutcome {
        tracing::warn!(
            run_id,
            latest = self.latest.load(Ordering::SeqCst),
            "discarding results of superseded run"
        );
        RunOutcome::Superseded
    }
}

async fn guarded<F: Future>(token: &CancellationToken, fut: F) -> Result<F::Output, Interrupt> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(Interrupt::Superseded),
        out = fut => Ok(out),
    }
}

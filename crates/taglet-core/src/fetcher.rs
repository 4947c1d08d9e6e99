// ABOUTME: Debounced suggestion fetching with results delivered over a channel
// ABOUTME: Fired fetches run to completion; relevance is checked when results are applied

use async_trait::async_trait;
use futures::FutureExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use taglet_events::FetchRequestId;
use taglet_logging::{PerfTimer, debug};
use taglet_types::{Candidate, TextRange, TriggerKind};
use tokio::sync::mpsc;

use crate::debouncer::{DebounceConfig, Debouncer, Scheduler};

/// Pluggable lookup service turning a query into ranked candidates
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(&self, kind: TriggerKind, query: &str) -> anyhow::Result<Vec<Candidate>>;
}

/// What a fired fetch was asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: FetchRequestId,
    pub kind: TriggerKind,
    pub query: String,
    pub range: TextRange,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub request: FetchRequest,
    pub result: anyhow::Result<Vec<Candidate>>,
    pub elapsed: Duration,
}

/// Progress reports from fired fetches, in the order they happen
#[derive(Debug)]
pub enum FetchUpdate {
    Started(FetchRequest),
    Completed(FetchOutcome),
}

#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub debounce: DebounceConfig,
    pub max_candidates: usize,
    pub slow_fetch_threshold: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            debounce: DebounceConfig::default(),
            max_candidates: 50,
            slow_fetch_threshold: Duration::from_secs(1),
        }
    }
}

/// Debounces fetch requests and reports their progress on `updates`
pub struct SuggestionFetcher {
    source: Arc<dyn SuggestionSource>,
    debouncer: Debouncer,
    next_id: Arc<AtomicU64>,
    updates: mpsc::UnboundedSender<FetchUpdate>,
    max_candidates: usize,
    slow_fetch_threshold: Duration,
}

impl SuggestionFetcher {
    pub fn new(
        source: Arc<dyn SuggestionSource>,
        scheduler: Box<dyn Scheduler>,
        config: FetcherConfig,
    ) -> (Self, mpsc::UnboundedReceiver<FetchUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let fetcher = Self {
            source,
            debouncer: Debouncer::new(config.debounce, scheduler),
            next_id: Arc::new(AtomicU64::new(0)),
            updates,
            max_candidates: config.max_candidates,
            slow_fetch_threshold: config.slow_fetch_threshold,
        };
        (fetcher, receiver)
    }

    /// Request suggestions for `query`, replacing any request still waiting on its timer
    pub fn request(&mut self, kind: TriggerKind, query: String, range: TextRange) {
        let source = self.source.clone();
        let next_id = self.next_id.clone();
        let updates = self.updates.clone();
        let max_candidates = self.max_candidates;
        let threshold = self.slow_fetch_threshold;

        let task = async move {
            let id = FetchRequestId::new(next_id.fetch_add(1, Ordering::Relaxed) + 1);
            let request = FetchRequest {
                id,
                kind,
                query,
                range,
            };
            debug!(request_id = %id, kind = %kind, query = %request.query, "Suggestion fetch started");

            // The receiver is gone once the engine is dropped
            if updates.send(FetchUpdate::Started(request.clone())).is_err() {
                return;
            }

            let timer = PerfTimer::new("suggestion_fetch").with_warn_threshold(threshold);
            let mut result = source.fetch(kind, &request.query).await;
            let elapsed = timer.finish();

            if let Ok(candidates) = &mut result {
                candidates.truncate(max_candidates);
            }

            let _ = updates.send(FetchUpdate::Completed(FetchOutcome {
                request,
                result,
                elapsed,
            }));
        };

        self.debouncer.debounce(task.boxed());
    }

    /// Drop the request waiting on the debounce timer, if any
    pub fn cancel_pending(&mut self) {
        self.debouncer.cancel();
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

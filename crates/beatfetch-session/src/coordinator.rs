//! Query coordinator.
//!
//! Dispatches one catalog search per debouncer trigger and decides whether a
//! completed search may publish into the shared [`PaginationState`].
//!
//! # Concurrency Model
//!
//! - The coordinator itself is owned by the foreground loop (`&mut self`)
//! - Each search runs as a detached tokio task holding clones of the shared
//!   state: a `watch` sender for the snapshot and an atomic in-flight counter
//! - Every snapshot change happens inside one `send_modify`, so readers
//!   never see a page number paired with another page's results
//! - Cancelling a search is advisory; the publication gate is what keeps a
//!   stale response out of the snapshot

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use beatfetch_core::{
    CatalogError, CatalogPort, CatalogResult, PageCommit, PageDirection, PaginationState,
    PublishStrategy, SearchPage, SearchRequest, SearchStatus,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// How a dispatched search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The page was committed to the snapshot.
    Published {
        /// Page number that was committed.
        page: u32,
        /// Number of entries on it.
        count: usize,
    },
    /// The response arrived but was not authoritative.
    Discarded,
    /// The catalog call failed.
    Failed(CatalogError),
    /// The search was cancelled before the catalog answered.
    Interrupted,
}

/// Trim and case-fold a query the way dispatch deduplication compares it.
#[must_use]
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Bookkeeping for the most recent dispatch.
struct InFlightSearch {
    query: String,
    direction: PageDirection,
    cancel: CancellationToken,
    done: Arc<AtomicBool>,
}

impl InFlightSearch {
    fn is_finished(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

/// Issues catalog searches and owns the published [`PaginationState`].
pub struct QueryCoordinator {
    catalog: Arc<dyn CatalogPort>,
    strategy: PublishStrategy,
    state: Arc<watch::Sender<PaginationState>>,
    in_flight: Arc<AtomicUsize>,
    latest: Arc<AtomicU64>,
    settled: Arc<AtomicU64>,
    last_query: Option<String>,
    current: Option<InFlightSearch>,
}

impl QueryCoordinator {
    /// Create a coordinator with an empty snapshot.
    pub fn new(catalog: Arc<dyn CatalogPort>, strategy: PublishStrategy) -> Self {
        let (state, _) = watch::channel(PaginationState::new());
        Self {
            catalog,
            strategy,
            state: Arc::new(state),
            in_flight: Arc::new(AtomicUsize::new(0)),
            latest: Arc::new(AtomicU64::new(0)),
            settled: Arc::new(AtomicU64::new(0)),
            last_query: None,
            current: None,
        }
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> PaginationState {
        self.state.borrow().clone()
    }

    /// Run `f` against the current snapshot without cloning it.
    ///
    /// Publishing waits while `f` runs, so keep it short.
    pub fn with_state<R>(&self, f: impl FnOnce(&PaginationState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Revision of the current snapshot.
    pub fn revision(&self) -> u64 {
        self.state.borrow().revision
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PaginationState> {
        self.state.subscribe()
    }

    /// Whether any search is still running.
    pub fn is_searching(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    /// Number of searches still running.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Number of searches dispatched so far.
    pub fn dispatched(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Number of dispatched searches whose outcome is final.
    ///
    /// A search counts only after anything it publishes is visible in the
    /// snapshot.
    pub fn settled(&self) -> u64 {
        self.settled.load(Ordering::Acquire)
    }

    /// Set the direction the next dispatch applies.
    pub fn set_page_direction(&self, direction: PageDirection) {
        self.state.send_if_modified(|state| {
            state.page_direction = direction;
            false
        });
    }

    /// Let the next trigger dispatch even if the query text is unchanged.
    pub fn force_refire(&mut self) {
        self.last_query = None;
    }

    /// Whether a page action in `direction` should be ignored because the
    /// last dispatch went the same way and is still running.
    pub fn page_action_blocked(&self, direction: PageDirection) -> bool {
        self.current
            .as_ref()
            .is_some_and(|search| search.direction == direction && !search.is_finished())
    }

    /// Cancel the running search, if any.
    pub fn interrupt(&mut self) {
        if let Some(search) = self.current.take() {
            search.cancel.cancel();
        }
    }

    /// Dispatch a search for `text` unless it matches the last dispatched
    /// query.
    ///
    /// Must be called from within a tokio runtime. The returned handle may
    /// be dropped; the search keeps running detached.
    pub fn on_trigger(
        &mut self,
        text: &str,
        ranked_only: bool,
    ) -> Option<JoinHandle<SearchOutcome>> {
        let query = normalize_query(text);
        if self.last_query.as_deref() == Some(query.as_str()) {
            return None;
        }
        self.last_query = Some(query.clone());

        let mut direction = PageDirection::Current;
        let mut page = 1;
        self.state.send_if_modified(|state| {
            direction = state.page_direction;
            page = direction.target_page(state.page);
            state.page_direction = PageDirection::Current;
            false
        });

        if let Some(previous) = self.current.take() {
            let supersede =
                self.strategy == PublishStrategy::LatestWins || previous.query != query;
            if supersede && !previous.is_finished() {
                tracing::debug!(query = %previous.query, "interrupting superseded search");
                previous.cancel.cancel();
            }
        }

        let seq = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        self.in_flight.fetch_add(1, Ordering::AcqRel);

        tracing::debug!(query = %query, page, ?direction, ranked_only, "dispatching search");

        let cancel = CancellationToken::new();
        let done = Arc::new(AtomicBool::new(false));
        let task = SearchTask {
            catalog: Arc::clone(&self.catalog),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
            latest: Arc::clone(&self.latest),
            settled: Arc::clone(&self.settled),
            strategy: self.strategy,
            seq,
            direction,
            request: SearchRequest::new(query.clone(), page, ranked_only),
            cancel: cancel.clone(),
            done: Arc::clone(&done),
        };

        self.current = Some(InFlightSearch {
            query,
            direction,
            cancel,
            done,
        });

        Some(tokio::spawn(task.run()))
    }
}

/// One dispatched search, owned by its task.
struct SearchTask {
    catalog: Arc<dyn CatalogPort>,
    state: Arc<watch::Sender<PaginationState>>,
    in_flight: Arc<AtomicUsize>,
    latest: Arc<AtomicU64>,
    settled: Arc<AtomicU64>,
    strategy: PublishStrategy,
    seq: u64,
    direction: PageDirection,
    request: SearchRequest,
    cancel: CancellationToken,
    done: Arc<AtomicBool>,
}

impl SearchTask {
    async fn run(self) -> SearchOutcome {
        let result = tokio::select! {
            biased;

            () = self.cancel.cancelled() => None,

            result = self.catalog.search(&self.request) => Some(result),
        };

        // Decrement exactly once, before deciding, so siblings see our exit.
        let remaining = self.in_flight.fetch_sub(1, Ordering::AcqRel).saturating_sub(1);

        let outcome = match result {
            None => {
                tracing::debug!(query = %self.request.query, "search interrupted");
                SearchOutcome::Interrupted
            }
            Some(result) => self.settle(result, remaining),
        };

        self.done.store(true, Ordering::Release);
        self.settled.fetch_add(1, Ordering::AcqRel);
        outcome
    }

    fn settle(&self, result: CatalogResult<SearchPage>, remaining: usize) -> SearchOutcome {
        let authoritative = match self.strategy {
            PublishStrategy::DiscardOnOverlap => remaining == 0,
            PublishStrategy::LatestWins => self.latest.load(Ordering::Acquire) == self.seq,
        };

        match result {
            Ok(found) if authoritative => {
                let count = found.results.len();
                let page = self.request.page;
                let commit = PageCommit {
                    query: self.request.query.clone(),
                    page,
                    direction: self.direction,
                    results: found.results,
                    total_results: found.total_results,
                };
                self.state.send_modify(|state| state.apply(commit));
                tracing::debug!(query = %self.request.query, page, count, "published search results");
                SearchOutcome::Published { page, count }
            }
            Ok(_) => {
                tracing::debug!(
                    query = %self.request.query,
                    page = self.request.page,
                    remaining,
                    "discarding stale search response"
                );
                SearchOutcome::Discarded
            }
            Err(err) => {
                tracing::warn!(query = %self.request.query, error = %err, "search failed");
                let status = if err.is_transport() {
                    SearchStatus::ConnectionError
                } else {
                    SearchStatus::ServiceError
                };
                // Connection errors are reported even when overlapped.
                let record = authoritative
                    || (err.is_transport() && self.strategy == PublishStrategy::DiscardOnOverlap);
                if record {
                    self.state.send_modify(|state| state.record_failure(status));
                }
                SearchOutcome::Failed(err)
            }
        }
    }
}

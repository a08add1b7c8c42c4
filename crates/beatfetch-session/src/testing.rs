//! Test doubles shared by the session unit tests.

use std::ops::Range;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use beatfetch_core::{
    BeatmapSetId, CatalogError, CatalogPort, CatalogResult, DownloadExecutorPort,
    ExecutorHandle, ExecutorRequest, SearchPage, SearchRequest, SearchResult,
};
use tokio::sync::{mpsc, oneshot};

/// Build a page with ids in `ids` and the given total.
pub fn page_of(ids: Range<u32>, total: u32) -> SearchPage {
    SearchPage {
        results: ids.map(result).collect(),
        total_results: total,
    }
}

/// A result with a predictable label and preview URL.
pub fn result(id: u32) -> SearchResult {
    SearchResult::new(
        BeatmapSetId::new(id),
        format!("Title {id}"),
        "Artist",
        "Mapper",
        format!("https://catalog.test/preview/{id}.mp3"),
    )
}

/// A search waiting for the test to answer it.
pub struct PendingCall {
    pub request: SearchRequest,
    reply: oneshot::Sender<CatalogResult<SearchPage>>,
}

impl PendingCall {
    /// Complete the search. Ignored if it was already cancelled.
    pub fn reply(self, result: CatalogResult<SearchPage>) {
        let _ = self.reply.send(result);
    }
}

/// Catalog whose searches block until the test answers them, so tests pick
/// the completion order.
pub struct GatedCatalog {
    calls: mpsc::UnboundedSender<PendingCall>,
}

/// Test-side end of a [`GatedCatalog`].
pub struct Gate {
    calls: mpsc::UnboundedReceiver<PendingCall>,
}

impl GatedCatalog {
    pub fn new() -> (Self, Gate) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, Gate { calls: rx })
    }
}

impl Gate {
    /// Wait for the next search to reach the catalog.
    pub async fn next_call(&mut self) -> PendingCall {
        self.calls.recv().await.expect("catalog dropped")
    }

    /// Take a search that already reached the catalog, if any.
    pub fn try_next_call(&mut self) -> Option<PendingCall> {
        self.calls.try_recv().ok()
    }
}

#[async_trait]
impl CatalogPort for GatedCatalog {
    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage> {
        let (tx, rx) = oneshot::channel();
        let call = PendingCall {
            request: request.clone(),
            reply: tx,
        };
        if self.calls.send(call).is_err() {
            return Err(CatalogError::transport("gate closed"));
        }
        rx.await
            .unwrap_or_else(|_| Err(CatalogError::transport("call abandoned")))
    }

    fn preview_url(&self, id: BeatmapSetId) -> CatalogResult<String> {
        if id.get() == 0 {
            return Err(CatalogError::InvalidIdentifier { id });
        }
        Ok(format!("https://catalog.test/preview/{id}.mp3"))
    }

    fn download_url(&self, id: BeatmapSetId) -> CatalogResult<String> {
        if id.get() == 0 {
            return Err(CatalogError::InvalidIdentifier { id });
        }
        Ok(format!("https://catalog.test/s/{id}"))
    }
}

/// Executor that records submissions and cancellations without moving
/// bytes. Tests report progress through the update channel themselves.
#[derive(Default)]
pub struct RecordingExecutor {
    pub submitted: Mutex<Vec<ExecutorRequest>>,
    pub cancelled: Mutex<Vec<ExecutorHandle>>,
    next: AtomicU64,
}

impl DownloadExecutorPort for RecordingExecutor {
    fn submit(&self, request: ExecutorRequest) -> ExecutorHandle {
        self.submitted.lock().unwrap().push(request);
        ExecutorHandle::new(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn cancel(&self, handle: ExecutorHandle) {
        self.cancelled.lock().unwrap().push(handle);
    }
}

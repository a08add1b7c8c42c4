//! Download manager.
//!
//! Owns the [`DownloadQueue`] and is its only writer. Commands go to the
//! executor through the port; executor reports come back on the update
//! channel and are applied when the owner calls [`DownloadManager::poll`].
//!
//! # Concurrency Model
//!
//! - The manager is a plain `&mut self` type owned by the foreground loop
//! - Executors never touch the queue; they only send `ExecutorUpdate`s
//! - Handles act as leases: reports for a handle the queue no longer
//!   tracks, or for a job that already reached a terminal status, are dropped

use std::sync::Arc;

use beatfetch_core::{
    AddOutcome, BeatmapSetId, CatalogPort, DownloadError, DownloadExecutorPort, DownloadResult,
    DownloadStatus, ExecutorRequest, ExecutorUpdate, ExecutorUpdateReceiver,
};
use tokio::sync::mpsc::error::TryRecvError;

use crate::queue::{DownloadJob, DownloadQueue};

/// Dependencies for [`build_download_manager`].
pub struct DownloadManagerDeps {
    /// Resolves archive locations.
    pub catalog: Arc<dyn CatalogPort>,
    /// Moves the bytes.
    pub executor: Arc<dyn DownloadExecutorPort>,
    /// Receiving half of the channel the executor reports on.
    pub updates: ExecutorUpdateReceiver,
}

/// Build a download manager from its dependencies.
pub fn build_download_manager(deps: DownloadManagerDeps) -> DownloadManager {
    DownloadManager {
        queue: DownloadQueue::new(),
        catalog: deps.catalog,
        executor: deps.executor,
        updates: deps.updates,
    }
}

/// Queue plus executor plumbing.
pub struct DownloadManager {
    queue: DownloadQueue,
    catalog: Arc<dyn CatalogPort>,
    executor: Arc<dyn DownloadExecutorPort>,
    updates: ExecutorUpdateReceiver,
}

impl DownloadManager {
    /// Read-only view of the queue for rendering.
    pub const fn queue(&self) -> &DownloadQueue {
        &self.queue
    }

    /// Queue a download for `id` and hand it to the executor.
    ///
    /// A second request for an id already in the queue is a no-op.
    pub fn request(&mut self, id: BeatmapSetId, label: &str) -> DownloadResult<AddOutcome> {
        if self.queue.contains(id) {
            tracing::debug!(%id, "download already queued");
            return Ok(AddOutcome::Duplicate);
        }

        let url = self
            .catalog
            .download_url(id)
            .map_err(|e| DownloadError::other(e.to_string()))?;

        self.queue.add(id, label);
        let handle = self.executor.submit(ExecutorRequest {
            id,
            url,
            file_name: id.archive_name(),
        });
        self.queue.start_download(id, handle)?;

        tracing::info!(%id, %handle, label, "download queued");
        Ok(AddOutcome::Added)
    }

    /// Cancel a waiting or running download.
    pub fn cancel(&mut self, id: BeatmapSetId) -> DownloadResult<()> {
        if let Some(handle) = self.queue.cancel(id)? {
            self.executor.cancel(handle);
        }
        tracing::info!(%id, "download cancelled");
        Ok(())
    }

    /// Evict a finished download.
    pub fn remove(&mut self, id: BeatmapSetId) -> DownloadResult<DownloadJob> {
        self.queue.remove(id)
    }

    /// Evict all jobs with a terminal `status`.
    pub fn clear_terminal(&mut self, status: DownloadStatus) -> usize {
        let removed = self.queue.clear_terminal(status);
        if removed > 0 {
            tracing::debug!(%status, removed, "cleared downloads");
        }
        removed
    }

    /// Evict all terminal jobs.
    pub fn clear_inactive(&mut self) -> usize {
        let removed = self.queue.clear_inactive();
        if removed > 0 {
            tracing::debug!(removed, "cleared inactive downloads");
        }
        removed
    }

    /// Apply every pending executor report without waiting.
    ///
    /// Returns the number of status changes.
    pub fn poll(&mut self) -> usize {
        let mut changed = 0;
        loop {
            match self.updates.try_recv() {
                Ok(update) => {
                    if self.apply(update) {
                        changed += 1;
                    }
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        changed
    }

    /// Wait for the next executor report and apply it.
    ///
    /// Returns `false` once the executor side of the channel is gone.
    pub async fn next_update(&mut self) -> bool {
        match self.updates.recv().await {
            Some(update) => {
                self.apply(update);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, update: ExecutorUpdate) -> bool {
        let handle = update.handle;
        match self.queue.apply_update(handle, update.event) {
            Some((id, status)) => {
                tracing::debug!(%id, %handle, %status, "download status changed");
                true
            }
            None => false,
        }
    }
}

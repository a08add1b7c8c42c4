//! Download queue state machine.
//!
//! This module provides a pure state machine for download job lifecycles.
//! No I/O is performed here; `DownloadManager` forwards commands to the
//! executor and feeds executor updates back in.
//!
//! # Design
//!
//! - Pure synchronous state machine (no async, no IO, no tracing)
//! - Jobs are keyed by catalog identifier; duplicates are a no-op
//! - Iteration order is insertion order and survives removal
//! - Terminal jobs never change status again, so late executor updates for
//!   a cancelled job are dropped

mod types;

use beatfetch_core::{
    AddOutcome, BeatmapSetId, DownloadError, DownloadResult, DownloadStatus, ExecutorEvent,
    ExecutorHandle, JobAction,
};
use indexmap::IndexMap;

pub use types::DownloadJob;

/// Ordered collection of download jobs.
///
/// This is a sync type with no internal locking; it has exactly one writer.
#[derive(Debug, Default)]
pub struct DownloadQueue {
    jobs: IndexMap<BeatmapSetId, DownloadJob>,
}

impl DownloadQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the queue has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Whether a job for `id` exists.
    pub fn contains(&self, id: BeatmapSetId) -> bool {
        self.jobs.contains_key(&id)
    }

    /// Job at `index` in insertion order.
    pub fn get(&self, index: usize) -> Option<&DownloadJob> {
        self.jobs.get_index(index).map(|(_, job)| job)
    }

    /// Job for `id`.
    pub fn job(&self, id: BeatmapSetId) -> Option<&DownloadJob> {
        self.jobs.get(&id)
    }

    /// Iterate jobs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DownloadJob> {
        self.jobs.values()
    }

    /// Number of jobs that are waiting or downloading.
    pub fn active_count(&self) -> usize {
        self.jobs.values().filter(|j| j.status.is_active()).count()
    }

    /// Add a waiting job. An existing job with the same id is left untouched.
    pub fn add(&mut self, id: BeatmapSetId, label: impl Into<String>) -> AddOutcome {
        if self.jobs.contains_key(&id) {
            return AddOutcome::Duplicate;
        }
        self.jobs.insert(id, DownloadJob::new(id, label));
        AddOutcome::Added
    }

    /// Record the executor handle for a waiting job.
    ///
    /// The job becomes `Downloading` when the executor reports that it started.
    pub fn start_download(
        &mut self,
        id: BeatmapSetId,
        handle: ExecutorHandle,
    ) -> DownloadResult<()> {
        let job = self.job_mut(id)?;
        if job.status != DownloadStatus::Waiting || job.handle.is_some() {
            return Err(DownloadError::invalid_transition(
                id,
                job.status,
                JobAction::Start,
            ));
        }
        job.handle = Some(handle);
        Ok(())
    }

    /// Cancel a waiting or downloading job.
    ///
    /// Returns the executor handle to forward the cancellation to, if the
    /// job had been submitted.
    pub fn cancel(&mut self, id: BeatmapSetId) -> DownloadResult<Option<ExecutorHandle>> {
        let job = self.job_mut(id)?;
        if !job.status.is_active() {
            return Err(DownloadError::invalid_transition(
                id,
                job.status,
                JobAction::Cancel,
            ));
        }
        job.status = DownloadStatus::Cancelled;
        Ok(job.handle)
    }

    /// Evict a terminal job.
    pub fn remove(&mut self, id: BeatmapSetId) -> DownloadResult<DownloadJob> {
        let status = self.job_mut(id)?.status;
        if !status.is_terminal() {
            return Err(DownloadError::invalid_transition(
                id,
                status,
                JobAction::Remove,
            ));
        }
        self.jobs
            .shift_remove(&id)
            .ok_or_else(|| DownloadError::not_in_queue(id))
    }

    /// Evict every job with the given terminal status.
    ///
    /// Non-terminal statuses evict nothing. Returns the number evicted.
    pub fn clear_terminal(&mut self, status: DownloadStatus) -> usize {
        if !status.is_terminal() {
            return 0;
        }
        let before = self.jobs.len();
        self.jobs.retain(|_, job| job.status != status);
        before - self.jobs.len()
    }

    /// Evict every terminal job. Returns the number evicted.
    pub fn clear_inactive(&mut self) -> usize {
        let before = self.jobs.len();
        self.jobs.retain(|_, job| !job.status.is_terminal());
        before - self.jobs.len()
    }

    /// Apply an executor report.
    ///
    /// Returns the affected job's id and new status when something changed.
    /// Reports for unknown handles or for jobs that are already terminal are
    /// ignored.
    pub fn apply_update(
        &mut self,
        handle: ExecutorHandle,
        event: ExecutorEvent,
    ) -> Option<(BeatmapSetId, DownloadStatus)> {
        let job = self
            .jobs
            .values_mut()
            .find(|job| job.handle == Some(handle))?;

        if job.status.is_terminal() {
            return None;
        }

        match event {
            ExecutorEvent::Started => {
                if job.status == DownloadStatus::Downloading {
                    return None;
                }
                job.status = DownloadStatus::Downloading;
            }
            ExecutorEvent::Progress(progress) => {
                job.progress = progress;
                if job.status == DownloadStatus::Downloading {
                    return None;
                }
                job.status = DownloadStatus::Downloading;
            }
            ExecutorEvent::Completed { path } => {
                job.status = DownloadStatus::Complete;
                job.path = Some(path);
            }
            ExecutorEvent::Failed { message } => {
                job.status = DownloadStatus::Error;
                job.error = Some(message);
            }
            ExecutorEvent::Cancelled => {
                job.status = DownloadStatus::Cancelled;
            }
        }

        Some((job.id, job.status))
    }

    fn job_mut(&mut self, id: BeatmapSetId) -> DownloadResult<&mut DownloadJob> {
        self.jobs
            .get_mut(&id)
            .ok_or_else(|| DownloadError::not_in_queue(id))
    }
}

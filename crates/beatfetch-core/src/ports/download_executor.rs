//! Download executor port.
//!
//! The executor performs the transfer for one job at a time per handle. It
//! reports lifecycle changes as `ExecutorUpdate` messages on the channel it
//! was constructed with; the download queue drains that channel and applies
//! the updates, so job status has a single writer.

use std::fmt;
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::domain::BeatmapSetId;
use crate::download::DownloadProgress;

/// Opaque handle for one submitted transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExecutorHandle(u64);

impl ExecutorHandle {
    /// Wrap a raw handle value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExecutorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorRequest {
    /// Catalog identifier of the set.
    pub id: BeatmapSetId,
    /// Archive location.
    pub url: String,
    /// File name to store the archive under.
    pub file_name: String,
}

/// Lifecycle change reported by an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorEvent {
    /// Bytes started flowing.
    Started,
    /// Periodic byte count.
    Progress(DownloadProgress),
    /// Archive fully written.
    Completed {
        /// Final location of the archive.
        path: PathBuf,
    },
    /// Transfer failed; any partial file was removed.
    Failed {
        /// User-facing description.
        message: String,
    },
    /// Cancellation honored; any partial file was removed.
    Cancelled,
}

impl ExecutorEvent {
    /// Whether this event ends the transfer.
    #[must_use]
    pub const fn is_final(&self) -> bool {
        matches!(
            self,
            Self::Completed { .. } | Self::Failed { .. } | Self::Cancelled
        )
    }
}

/// Message delivered from an executor to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorUpdate {
    /// Handle returned by `submit`.
    pub handle: ExecutorHandle,
    /// What happened.
    pub event: ExecutorEvent,
}

/// Sending half of the executor update channel.
pub type ExecutorUpdateSender = mpsc::UnboundedSender<ExecutorUpdate>;

/// Receiving half of the executor update channel.
pub type ExecutorUpdateReceiver = mpsc::UnboundedReceiver<ExecutorUpdate>;

/// Create the channel an executor reports on.
#[must_use]
pub fn executor_channel() -> (ExecutorUpdateSender, ExecutorUpdateReceiver) {
    mpsc::unbounded_channel()
}

/// Port for the component that moves archive bytes to disk.
///
/// Both methods return immediately; work happens in the background and is
/// reported through the update channel.
pub trait DownloadExecutorPort: Send + Sync {
    /// Begin transferring `request`.
    fn submit(&self, request: ExecutorRequest) -> ExecutorHandle;

    /// Ask the transfer behind `handle` to stop.
    ///
    /// The executor must answer with `ExecutorEvent::Cancelled` (or a final
    /// event that was already in flight) and release any partial artifact.
    fn cancel(&self, handle: ExecutorHandle);
}

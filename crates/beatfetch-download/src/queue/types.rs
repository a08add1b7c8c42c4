//! Queue entry type.

use std::path::PathBuf;

use beatfetch_core::{BeatmapSetId, DownloadProgress, DownloadStatus, ExecutorHandle};

/// One download job as tracked by the queue.
///
/// The executor handle is borrowed: the queue records it so a cancel can be
/// forwarded, but never drives the transfer itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadJob {
    /// Catalog identifier; unique within the queue.
    pub id: BeatmapSetId,
    /// Display label ("Artist - Title").
    pub label: String,
    /// Current lifecycle status.
    pub status: DownloadStatus,
    /// Executor handle once the job has been submitted.
    pub handle: Option<ExecutorHandle>,
    /// Latest reported byte progress.
    pub progress: DownloadProgress,
    /// Failure description when `status` is `Error`.
    pub error: Option<String>,
    /// Archive location when `status` is `Complete`.
    pub path: Option<PathBuf>,
}

impl DownloadJob {
    /// Create a waiting job.
    pub fn new(id: BeatmapSetId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            status: DownloadStatus::Waiting,
            handle: None,
            progress: DownloadProgress::default(),
            error: None,
            path: None,
        }
    }

    /// One-line status text for rendering.
    pub fn status_line(&self) -> String {
        match self.status {
            DownloadStatus::Downloading => self.progress.percentage().map_or_else(
                || format!("Downloading {} KiB", self.progress.downloaded / 1024),
                |pct| format!("Downloading {pct:.1}%"),
            ),
            DownloadStatus::Error => self
                .error
                .as_deref()
                .map_or_else(|| "Error".to_string(), |e| format!("Error: {e}")),
            DownloadStatus::Waiting => "Waiting".to_string(),
            DownloadStatus::Complete => "Complete".to_string(),
            DownloadStatus::Cancelled => "Cancelled".to_string(),
        }
    }
}

//! Download lifecycle types.
//!
//! Pure data types with no I/O dependencies.

use serde::{Deserialize, Serialize};

/// Status of a download job.
///
/// `Waiting → Downloading → {Complete, Error, Cancelled}`; a waiting job can
/// also be cancelled directly. The last three are terminal until the job is
/// cleared from the queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Queued, executor has not started transferring yet.
    Waiting,
    /// Executor is transferring bytes.
    Downloading,
    /// Archive is on disk.
    Complete,
    /// Transfer failed.
    Error,
    /// Cancelled by the user.
    Cancelled,
}

impl DownloadStatus {
    /// Convert to string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Downloading => "downloading",
            Self::Complete => "complete",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether no further automatic transition happens from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error | Self::Cancelled)
    }

    /// Whether the job may still be cancelled.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Waiting | Self::Downloading)
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte progress of a running download.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadProgress {
    /// Bytes written so far.
    pub downloaded: u64,
    /// Total size if the server reported one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl DownloadProgress {
    /// Create a progress value.
    #[must_use]
    pub const fn new(downloaded: u64, total: Option<u64>) -> Self {
        Self { downloaded, total }
    }

    /// Completion percentage (0.0 - 100.0), if the total is known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> Option<f64> {
        match self.total {
            Some(0) | None => None,
            Some(total) => Some((self.downloaded as f64 / total as f64) * 100.0),
        }
    }
}

/// Result of adding a job to the queue.
///
/// A duplicate identifier is not an error: the existing job is kept and the
/// request is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new job was created.
    Added,
    /// A job with this identifier already exists.
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!DownloadStatus::Waiting.is_terminal());
        assert!(!DownloadStatus::Downloading.is_terminal());
        assert!(DownloadStatus::Complete.is_terminal());
        assert!(DownloadStatus::Error.is_terminal());
        assert!(DownloadStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(DownloadProgress::new(50, Some(200)).percentage(), Some(25.0));
        assert_eq!(DownloadProgress::new(50, None).percentage(), None);
        assert_eq!(DownloadProgress::new(0, Some(0)).percentage(), None);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&DownloadStatus::Downloading).unwrap();
        assert_eq!(json, "\"downloading\"");
    }
}

//! Download error types.
//!
//! These errors are serializable and do not hold `std::io::Error`; I/O
//! failures are captured as kind and message strings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::DownloadStatus;
use crate::domain::BeatmapSetId;

/// Queue operation that was attempted on a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobAction {
    /// Hand the job to the executor.
    Start,
    /// Stop a waiting or running job.
    Cancel,
    /// Evict a finished job.
    Remove,
}

impl std::fmt::Display for JobAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Cancel => "cancel",
            Self::Remove => "remove",
        })
    }
}

/// Error type for download operations.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum DownloadError {
    /// The job's status forbids the requested operation. No state changed.
    #[error("Cannot {action} download {id} while {status}")]
    InvalidTransition {
        /// The job the operation targeted.
        id: BeatmapSetId,
        /// Status of the job when the operation was attempted.
        status: DownloadStatus,
        /// The rejected operation.
        action: JobAction,
    },

    /// Download not found in queue.
    #[error("Not in queue: {id}")]
    NotInQueue {
        /// The identifier that wasn't found.
        id: BeatmapSetId,
    },

    /// Network/HTTP error during download.
    #[error("Network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if available.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// I/O error during file operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "not found", "permission denied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Download was cancelled by user.
    #[error("Download cancelled")]
    Cancelled,

    /// General/uncategorized error.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl DownloadError {
    /// Create an invalid transition error.
    #[must_use]
    pub const fn invalid_transition(
        id: BeatmapSetId,
        status: DownloadStatus,
        action: JobAction,
    ) -> Self {
        Self::InvalidTransition { id, status, action }
    }

    /// Create a not in queue error.
    #[must_use]
    pub const fn not_in_queue(id: BeatmapSetId) -> Self {
        Self::NotInQueue { id }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error with HTTP status code.
    pub fn network_with_status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an I/O error from a `std::io::Error`.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        let kind = err.kind();
        Self::Io {
            kind: format!("{kind:?}"),
            message: err.to_string(),
        }
    }

    /// Create a generic error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Check if this is a cancellation.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Convert to a user-friendly message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidTransition { status, action, .. } => {
                format!("Cannot {action} a download that is {status}.")
            }
            Self::NotInQueue { id } => format!("Download {id} is not in the queue."),
            Self::Network {
                message,
                status_code: Some(code),
            } => format!("Network error (HTTP {code}): {message}"),
            Self::Network { message, .. } => format!("Network error: {message}"),
            Self::Io { message, .. } => format!("File operation failed: {message}"),
            Self::Cancelled => "Download was cancelled.".to_string(),
            Self::Other { message } => message.clone(),
        }
    }
}

/// Result type alias for download operations.
pub type DownloadResult<T> = Result<T, DownloadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message() {
        let err = DownloadError::invalid_transition(
            BeatmapSetId::new(12),
            DownloadStatus::Complete,
            JobAction::Cancel,
        );
        assert_eq!(err.to_string(), "Cannot cancel download 12 while complete");
        assert_eq!(err.user_message(), "Cannot cancel a download that is complete.");
    }

    #[test]
    fn test_network_user_message_includes_status() {
        let err = DownloadError::network_with_status("bad gateway", 502);
        assert_eq!(err.user_message(), "Network error (HTTP 502): bad gateway");
    }

    #[test]
    fn test_from_io_error_captures_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = DownloadError::from_io_error(&io);
        assert!(matches!(err, DownloadError::Io { ref kind, .. } if kind == "PermissionDenied"));
    }

    #[test]
    fn test_error_round_trips_through_json() {
        let err = DownloadError::not_in_queue(BeatmapSetId::new(5));
        let json = serde_json::to_string(&err).unwrap();
        let back: DownloadError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}

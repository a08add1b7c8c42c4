//! Download domain types and errors.
//!
//! No I/O, networking, or runtime dependencies allowed here.

pub mod errors;
pub mod types;

pub use errors::{DownloadError, DownloadResult, JobAction};
pub use types::{AddOutcome, DownloadProgress, DownloadStatus};

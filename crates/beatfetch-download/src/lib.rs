//! Download queue and executor for beatfetch.
//!
//! - `queue` - pure job lifecycle state machine
//! - `manager` - queue owner wiring commands to the executor port
//! - `executor` - reqwest-backed `DownloadExecutorPort`
//! - `progress` - progress report throttling
#![deny(unused_crate_dependencies)]

// Re-export core types for convenience
pub use beatfetch_core::{AddOutcome, DownloadError, DownloadProgress, DownloadStatus};

mod executor;
mod manager;
pub(crate) mod progress;
mod queue;

pub use executor::{ExecutorConfig, HttpDownloadExecutor};
pub use manager::{DownloadManager, DownloadManagerDeps, build_download_manager};
pub use progress::ProgressThrottle;
pub use queue::{DownloadJob, DownloadQueue};

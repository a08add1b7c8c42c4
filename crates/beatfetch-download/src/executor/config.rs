//! Executor configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for [`HttpDownloadExecutor`](super::HttpDownloadExecutor).
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Directory archives are written to.
    pub download_dir: PathBuf,
    /// User agent string for HTTP requests.
    pub user_agent: String,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    /// Minimum spacing between progress reports per transfer.
    pub progress_interval: Duration,
    /// Maximum number of transfers moving bytes at once.
    pub max_concurrent: usize,
}

impl ExecutorConfig {
    /// Create a configuration writing into `download_dir`.
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            user_agent: concat!("beatfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            progress_interval: Duration::from_millis(100),
            max_concurrent: 4,
        }
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the progress report interval.
    #[must_use]
    pub const fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    /// Set the number of concurrent transfers. Zero is treated as one.
    #[must_use]
    pub const fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }
}

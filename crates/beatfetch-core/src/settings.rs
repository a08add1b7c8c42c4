//! Session settings and validation.
//!
//! Pure domain types with no infrastructure dependencies. Front ends load
//! these from wherever they keep configuration and validate before use.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between the last keystroke and the search it triggers.
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 700;

/// Minimum spacing enforced for explicitly triggered searches.
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 300;

/// Window in which a second click on a focused result counts as a double-click.
pub const DEFAULT_FOCUS_DELAY_MS: u64 = 250;

/// How a completed search decides whether it may publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStrategy {
    /// Publish only if no sibling search is still in flight. Overlapping
    /// searches can all be discarded except the last to finish.
    #[default]
    DiscardOnOverlap,
    /// Publish only the newest dispatch; older searches are cancelled when a
    /// new one starts.
    LatestWins,
}

/// Tunables for a search/download session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Debounce delay after typing, in milliseconds.
    pub search_delay_ms: u64,
    /// Minimum spacing for explicit triggers, in milliseconds.
    pub min_request_interval_ms: u64,
    /// Double-click window on a focused result, in milliseconds.
    pub focus_delay_ms: u64,
    /// Only show ranked sets.
    pub ranked_only: bool,
    /// Publication gate for overlapping searches.
    pub publish_strategy: PublishStrategy,
    /// Number of result rows visible at once.
    pub results_per_view: usize,
    /// Number of download rows visible at once.
    pub downloads_per_view: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            search_delay_ms: DEFAULT_SEARCH_DELAY_MS,
            min_request_interval_ms: DEFAULT_MIN_REQUEST_INTERVAL_MS,
            focus_delay_ms: DEFAULT_FOCUS_DELAY_MS,
            ranked_only: true,
            publish_strategy: PublishStrategy::DiscardOnOverlap,
            results_per_view: 8,
            downloads_per_view: 10,
        }
    }
}

impl SessionSettings {
    /// Debounce delay.
    #[must_use]
    pub const fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_delay_ms)
    }

    /// Minimum explicit-trigger spacing.
    #[must_use]
    pub const fn min_request_interval(&self) -> Duration {
        Duration::from_millis(self.min_request_interval_ms)
    }

    /// Double-click window.
    #[must_use]
    pub const fn focus_delay(&self) -> Duration {
        Duration::from_millis(self.focus_delay_ms)
    }

    /// Set the publication strategy.
    #[must_use]
    pub const fn with_publish_strategy(mut self, strategy: PublishStrategy) -> Self {
        self.publish_strategy = strategy;
        self
    }

    /// Set the ranked-only filter.
    #[must_use]
    pub const fn with_ranked_only(mut self, ranked_only: bool) -> Self {
        self.ranked_only = ranked_only;
        self
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Search delay must be greater than zero")]
    ZeroSearchDelay,

    #[error(
        "Minimum request interval ({interval_ms}ms) must be shorter than the search delay ({delay_ms}ms)"
    )]
    IntervalNotBelowDelay { interval_ms: u64, delay_ms: u64 },

    #[error("View sizes must be at least 1")]
    EmptyView,
}

/// Validate settings values.
pub const fn validate_settings(settings: &SessionSettings) -> Result<(), SettingsError> {
    if settings.search_delay_ms == 0 {
        return Err(SettingsError::ZeroSearchDelay);
    }

    if settings.min_request_interval_ms >= settings.search_delay_ms {
        return Err(SettingsError::IntervalNotBelowDelay {
            interval_ms: settings.min_request_interval_ms,
            delay_ms: settings.search_delay_ms,
        });
    }

    if settings.results_per_view == 0 || settings.downloads_per_view == 0 {
        return Err(SettingsError::EmptyView);
    }

    Ok(())
}

//! Published search state.
//!
//! `PaginationState` is the single value the presentation layer reads each
//! frame. It is replaced as a whole by the query coordinator, so a reader
//! never sees a page number paired with another page's results.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::beatmap::SearchResult;

/// Which page the next dispatched search should fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    /// Start over at page 1.
    #[default]
    Reset,
    /// Re-fetch the page currently shown.
    Current,
    /// Go back one page.
    Previous,
    /// Advance one page.
    Next,
}

impl PageDirection {
    /// Compute the page to request given the currently published page.
    #[must_use]
    pub const fn target_page(self, current: u32) -> u32 {
        match self {
            Self::Reset => 1,
            Self::Current => current,
            Self::Next => current.saturating_add(1),
            Self::Previous => {
                if current > 1 {
                    current - 1
                } else {
                    1
                }
            }
        }
    }
}

/// Human-readable state of the last search, shown under the search field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchStatus {
    /// Empty query.
    #[default]
    TypeToSearch,
    /// The catalog answered with zero matches.
    NoResults,
    /// The catalog answered with `total` matches across all pages.
    Found {
        /// Total match count reported by the catalog.
        total: u32,
    },
    /// The catalog could not be reached.
    ConnectionError,
    /// The catalog answered with something unusable.
    ServiceError,
}

impl SearchStatus {
    /// Derive the status for a successful response.
    #[must_use]
    pub fn for_response(query: &str, total: u32) -> Self {
        if query.is_empty() {
            Self::TypeToSearch
        } else if total == 0 {
            Self::NoResults
        } else {
            Self::Found { total }
        }
    }

    /// Whether this status reports a failed request.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::ConnectionError | Self::ServiceError)
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeToSearch => f.write_str("Type to search!"),
            Self::NoResults => f.write_str("No results found."),
            Self::Found { total: 1 } => f.write_str("1 result found!"),
            Self::Found { total } => write!(f, "{total} results found!"),
            Self::ConnectionError => f.write_str("Could not establish connection to server."),
            Self::ServiceError => f.write_str("An error has occurred."),
        }
    }
}

/// A catalog page accepted for publication.
#[derive(Clone, Debug)]
pub struct PageCommit {
    /// Normalized query the page was fetched for.
    pub query: String,
    /// Page number that was requested.
    pub page: u32,
    /// Direction captured when the search was dispatched.
    pub direction: PageDirection,
    /// Entries of the page.
    pub results: Vec<SearchResult>,
    /// Total match count across all pages.
    pub total_results: u32,
}

/// Current query, page and result set.
///
/// Invariant: `results_seen <= total_results`, except transiently while a
/// page change is being applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationState {
    /// Normalized query of the published page.
    pub query: String,
    /// Published page number (1-based).
    pub page: u32,
    /// Direction the next dispatch will apply.
    pub page_direction: PageDirection,
    /// Entries of the published page.
    pub results: Arc<[SearchResult]>,
    /// Total match count across all pages.
    pub total_results: u32,
    /// Number of entries on this and all preceding pages.
    pub results_seen: u32,
    /// Status line for the last search.
    pub status: SearchStatus,
    /// Incremented on every published result set.
    pub revision: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            page_direction: PageDirection::Reset,
            results: Arc::from(Vec::new()),
            total_results: 0,
            results_seen: 0,
            status: SearchStatus::TypeToSearch,
            revision: 0,
        }
    }
}

impl PaginationState {
    /// Create an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an accepted page as one commit.
    pub fn apply(&mut self, commit: PageCommit) {
        #[allow(clippy::cast_possible_truncation)] // catalog pages are small
        let count = commit.results.len() as u32;

        #[allow(clippy::cast_possible_truncation)]
        let shown = self.results.len() as u32;

        self.results_seen = match commit.direction {
            PageDirection::Next => self.results_seen.saturating_add(count),
            PageDirection::Previous => self.results_seen.saturating_sub(shown),
            // Swap the shown page's entries for the refreshed ones.
            PageDirection::Current => {
                self.results_seen.saturating_sub(shown).saturating_add(count)
            }
            PageDirection::Reset => count,
        };
        self.page = commit.page;
        self.status = SearchStatus::for_response(&commit.query, commit.total_results);
        self.query = commit.query;
        self.results = Arc::from(commit.results);
        self.total_results = commit.total_results;
        self.revision += 1;
    }

    /// Record a failed request. Results and totals are left untouched.
    pub const fn record_failure(&mut self, status: SearchStatus) {
        self.status = status;
    }

    /// Whether a previous page exists.
    #[must_use]
    pub fn can_page_previous(&self) -> bool {
        !self.results.is_empty() && self.page > 1
    }

    /// Whether more results exist past the published page.
    #[must_use]
    pub fn can_page_next(&self) -> bool {
        !self.results.is_empty() && self.results_seen < self.total_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BeatmapSetId;

    fn page_of(n: u32) -> Vec<SearchResult> {
        (0..n)
            .map(|i| SearchResult::new(BeatmapSetId::new(i), "t", "a", "c", "u"))
            .collect()
    }

    fn commit(query: &str, page: u32, direction: PageDirection, n: u32, total: u32) -> PageCommit {
        PageCommit {
            query: query.to_string(),
            page,
            direction,
            results: page_of(n),
            total_results: total,
        }
    }

    #[test]
    fn test_target_page() {
        assert_eq!(PageDirection::Reset.target_page(4), 1);
        assert_eq!(PageDirection::Current.target_page(4), 4);
        assert_eq!(PageDirection::Next.target_page(4), 5);
        assert_eq!(PageDirection::Previous.target_page(4), 3);
        assert_eq!(PageDirection::Previous.target_page(1), 1);
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(SearchStatus::TypeToSearch.to_string(), "Type to search!");
        assert_eq!(SearchStatus::NoResults.to_string(), "No results found.");
        assert_eq!(SearchStatus::Found { total: 1 }.to_string(), "1 result found!");
        assert_eq!(SearchStatus::Found { total: 45 }.to_string(), "45 results found!");
        assert_eq!(
            SearchStatus::ConnectionError.to_string(),
            "Could not establish connection to server."
        );
        assert_eq!(SearchStatus::ServiceError.to_string(), "An error has occurred.");
    }

    #[test]
    fn test_empty_query_status_ignores_total() {
        assert_eq!(SearchStatus::for_response("", 500), SearchStatus::TypeToSearch);
        assert_eq!(SearchStatus::for_response("abc", 0), SearchStatus::NoResults);
    }

    #[test]
    fn test_next_then_previous_round_trip() {
        let mut state = PaginationState::new();
        state.apply(commit("abc", 1, PageDirection::Reset, 20, 45));
        assert_eq!(state.results_seen, 20);
        assert_eq!(state.status.to_string(), "45 results found!");

        state.apply(commit("abc", 2, PageDirection::Next, 20, 45));
        assert_eq!(state.page, 2);
        assert_eq!(state.results_seen, 40);

        state.apply(commit("abc", 1, PageDirection::Previous, 20, 45));
        assert_eq!(state.page, 1);
        assert_eq!(state.results_seen, 20);
    }

    #[test]
    fn test_previous_subtracts_shown_page_size() {
        let mut state = PaginationState::new();
        state.apply(commit("abc", 1, PageDirection::Reset, 20, 45));
        state.apply(commit("abc", 2, PageDirection::Next, 20, 45));
        state.apply(commit("abc", 3, PageDirection::Next, 5, 45));
        assert_eq!(state.results_seen, 45);
        assert!(!state.can_page_next());

        state.apply(commit("abc", 2, PageDirection::Previous, 20, 45));
        assert_eq!(state.results_seen, 40);
        assert!(state.can_page_next());
        assert!(state.can_page_previous());
    }

    #[test]
    fn test_current_on_first_page_replaces_seen_count() {
        let mut state = PaginationState::new();
        state.apply(commit("abc", 1, PageDirection::Reset, 20, 45));
        state.apply(commit("abc", 1, PageDirection::Current, 18, 43));
        assert_eq!(state.results_seen, 18);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn test_refresh_on_later_page_keeps_running_total() {
        let mut state = PaginationState::new();
        state.apply(commit("abc", 1, PageDirection::Reset, 20, 45));
        state.apply(commit("abc", 2, PageDirection::Next, 20, 45));
        assert_eq!(state.results_seen, 40);

        state.apply(commit("abc", 2, PageDirection::Current, 20, 45));
        assert_eq!(state.results_seen, 40);
        assert_eq!(state.page, 2);

        state.apply(commit("abc", 3, PageDirection::Next, 5, 45));
        assert_eq!(state.results_seen, 45);
        assert!(!state.can_page_next());

        state.apply(commit("abc", 2, PageDirection::Previous, 20, 45));
        assert_eq!(state.results_seen, 40);
        state.apply(commit("abc", 1, PageDirection::Previous, 20, 45));
        assert_eq!(state.results_seen, 20);
        assert!(!state.can_page_previous());
    }

    #[test]
    fn test_failure_keeps_results() {
        let mut state = PaginationState::new();
        state.apply(commit("abc", 1, PageDirection::Reset, 3, 3));
        let before = state.clone();

        state.record_failure(SearchStatus::ConnectionError);

        assert_eq!(state.results, before.results);
        assert_eq!(state.total_results, 3);
        assert_eq!(state.revision, before.revision);
        assert!(state.status.is_error());
    }

    #[test]
    fn test_paging_guards_on_empty_results() {
        let state = PaginationState::new();
        assert!(!state.can_page_next());
        assert!(!state.can_page_previous());
    }
}

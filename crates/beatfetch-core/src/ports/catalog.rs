//! Catalog search port.
//!
//! The orchestrator talks to the remote beatmap catalog only through this
//! trait. The HTTP implementation lives in `beatfetch-catalog`.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{BeatmapSetId, SearchResult};

/// Parameters of one catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Normalized query text (may be empty).
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    /// Restrict to ranked sets.
    pub ranked_only: bool,
}

impl SearchRequest {
    /// Create a request.
    pub fn new(query: impl Into<String>, page: u32, ranked_only: bool) -> Self {
        Self {
            query: query.into(),
            page,
            ranked_only,
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    /// Entries of this page.
    pub results: Vec<SearchResult>,
    /// Total number of matches across all pages.
    pub total_results: u32,
}

/// Errors from catalog operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The service could not be reached or the transfer failed.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the failure
        message: String,
    },

    /// The identifier has no catalog entry or cannot form a URL.
    #[error("Invalid identifier: {id}")]
    InvalidIdentifier {
        /// The rejected identifier
        id: BeatmapSetId,
    },

    /// The service answered with an unusable payload.
    #[error("Invalid catalog response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },
}

impl CatalogError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether this is a network-level failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Port trait for the remote beatmap catalog.
///
/// # Design
///
/// - Uses core-owned DTOs, not wire types
/// - Returns `CatalogError` for all failures
/// - `search` may be dropped mid-flight; implementations must not leave
///   shared state behind when that happens
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Fetch one page of results.
    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage>;

    /// Location of the audio preview for a set.
    fn preview_url(&self, id: BeatmapSetId) -> CatalogResult<String>;

    /// Location of the downloadable archive for a set.
    fn download_url(&self, id: BeatmapSetId) -> CatalogResult<String>;
}

//! `CatalogPort` implementation for `CatalogClient`.
//!
//! Converts internal client errors into core port errors.

use async_trait::async_trait;
use beatfetch_core::{
    BeatmapSetId, CatalogError, CatalogPort, CatalogResult, SearchPage, SearchRequest,
};

use crate::client::CatalogClient;
use crate::error::CatalogClientError;
use crate::http::HttpBackend;
use crate::url::expand_template;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `CatalogClientError` to core `CatalogError`.
///
/// Anything that prevented a response from arriving is a transport failure;
/// anything wrong with a response that did arrive is an invalid response.
fn map_error(err: CatalogClientError) -> CatalogError {
    match err {
        CatalogClientError::ApiRequestFailed { status, url } => CatalogError::Transport {
            message: format!("request failed with status {status}: {url}"),
        },
        CatalogClientError::Network(e) => CatalogError::Transport {
            message: e.to_string(),
        },
        CatalogClientError::InvalidResponse { message } => CatalogError::InvalidResponse { message },
        CatalogClientError::JsonParse(e) => CatalogError::InvalidResponse {
            message: e.to_string(),
        },
        CatalogClientError::InvalidUrl(e) => CatalogError::InvalidResponse {
            message: format!("invalid URL: {e}"),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend + Send + Sync> CatalogPort for CatalogClient<B> {
    async fn search(&self, request: &SearchRequest) -> CatalogResult<SearchPage> {
        self.search_page(request).await.map_err(map_error)
    }

    fn preview_url(&self, id: BeatmapSetId) -> CatalogResult<String> {
        expand_template(&self.config.preview_url_template, id)
            .ok_or(CatalogError::InvalidIdentifier { id })
    }

    fn download_url(&self, id: BeatmapSetId) -> CatalogResult<String> {
        expand_template(&self.config.download_url_template, id)
            .ok_or(CatalogError::InvalidIdentifier { id })
    }
}

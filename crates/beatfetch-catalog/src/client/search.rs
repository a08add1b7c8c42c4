//! Search functionality for the catalog client.

use beatfetch_core::{SearchPage, SearchRequest};

use crate::error::CatalogClientResult;
use crate::http::HttpBackend;
use crate::parsing::parse_search_response;
use crate::url::build_search_url;

use super::CatalogClient;

impl<B: HttpBackend> CatalogClient<B> {
    /// Fetch one page of search results.
    pub(crate) async fn search_page(&self, request: &SearchRequest) -> CatalogClientResult<SearchPage> {
        let url = build_search_url(&self.config, request);
        tracing::debug!(query = %request.query, page = request.page, "fetching catalog page");

        let body: serde_json::Value = self.backend.get_json(&url).await?;
        let page = parse_search_response(&body, &self.config.preview_url_template)?;

        tracing::debug!(
            count = page.results.len(),
            total = page.total_results,
            "catalog page received"
        );
        Ok(page)
    }
}

//! URL construction helpers for the catalog API.

use beatfetch_core::{BeatmapSetId, SearchRequest};
use url::Url;

use crate::config::ID_PLACEHOLDER;
use crate::models::{ALL_STATUS_FILTER, CatalogConfig, RANKED_FILTER};

/// Build a search URL for one page of results.
pub fn build_search_url(config: &CatalogConfig, request: &SearchRequest) -> Url {
    let mut url = config.search_url.clone();
    let status = if request.ranked_only {
        RANKED_FILTER
    } else {
        ALL_STATUS_FILTER
    };

    url.query_pairs_mut()
        .append_pair("mod", "json")
        .append_pair("q", &request.query)
        .append_pair("p", &request.page.max(1).to_string())
        .append_pair("c", "b")
        .append_pair("s", status);

    url
}

/// Substitute a set id into a URL template.
///
/// Returns `None` for the reserved id 0 or if the result is not a valid URL.
pub fn expand_template(template: &str, id: BeatmapSetId) -> Option<String> {
    if id.get() == 0 {
        return None;
    }
    let expanded = template.replace(ID_PLACEHOLDER, &id.to_string());
    Url::parse(&expanded).ok().map(String::from)
}

//! JSON parsing for catalog search responses.
//!
//! Sync functions that turn the raw response body into core result types.

use beatfetch_core::{BeatmapSetId, SearchPage, SearchResult};
use serde_json::Value;

use crate::error::{CatalogClientError, CatalogClientResult};
use crate::url::expand_template;

// ============================================================================
// Field helpers
// ============================================================================

/// Read an unsigned integer that the service may encode as a number or a string.
fn as_u64_lenient(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// First non-empty string among `keys`.
fn str_field(json: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}

// ============================================================================
// Entry Parsing
// ============================================================================

/// Parse one result entry.
///
/// Returns None if the entry has no usable identifier.
pub fn parse_entry(json: &Value, preview_template: &str) -> Option<SearchResult> {
    let raw_id = json.get("id").and_then(as_u64_lenient)?;
    let id = BeatmapSetId::new(u32::try_from(raw_id).ok()?);
    let preview_url = expand_template(preview_template, id)?;

    let title = str_field(json, &["title"]).unwrap_or_default();
    let artist = str_field(json, &["artist"]).unwrap_or_default();
    let creator = str_field(json, &["creator"]).unwrap_or_default();

    let mut result = SearchResult::new(id, title, artist, creator, preview_url);
    result.title_unicode = str_field(json, &["titleUnicode", "titleU"]);
    result.artist_unicode = str_field(json, &["artistUnicode", "artistU"]);
    result.date = str_field(json, &["date", "synced"]);
    Some(result)
}

/// Parse a full search response.
///
/// The body must be an object with a `resultCount` and a `results` array.
/// Entries without an identifier are skipped.
pub fn parse_search_response(json: &Value, preview_template: &str) -> CatalogClientResult<SearchPage> {
    let total = json
        .get("resultCount")
        .and_then(as_u64_lenient)
        .ok_or_else(|| CatalogClientError::invalid_response("missing field 'resultCount'"))?;

    let entries = json
        .get("results")
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogClientError::invalid_response("missing array 'results'"))?;

    let results: Vec<SearchResult> = entries
        .iter()
        .filter_map(|entry| parse_entry(entry, preview_template))
        .collect();

    let total_results = u32::try_from(total).unwrap_or(u32::MAX);

    Ok(SearchPage {
        results,
        total_results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PREVIEW: &str = "https://b.ppy.sh/preview/{id}.mp3";

    #[test]
    fn test_parse_entry_full() {
        let entry = json!({
            "id": "39804",
            "title": "Flower Dance",
            "titleUnicode": "フラワーダンス",
            "artist": "DJ OKAWARI",
            "artistUnicode": "",
            "creator": "Charles445",
            "date": "2012-04-21"
        });

        let result = parse_entry(&entry, PREVIEW).unwrap();
        assert_eq!(result.id, BeatmapSetId::new(39804));
        assert_eq!(result.title, "Flower Dance");
        assert_eq!(result.title_unicode.as_deref(), Some("フラワーダンス"));
        assert!(result.artist_unicode.is_none());
        assert_eq!(result.creator, "Charles445");
        assert_eq!(result.preview_url, "https://b.ppy.sh/preview/39804.mp3");
    }

    #[test]
    fn test_parse_entry_numeric_id_and_short_keys() {
        let entry = json!({"id": 7, "title": "t", "titleU": "T", "artist": "a", "creator": "c"});
        let result = parse_entry(&entry, PREVIEW).unwrap();
        assert_eq!(result.id.get(), 7);
        assert_eq!(result.title_unicode.as_deref(), Some("T"));
    }

    #[test]
    fn test_parse_entry_without_id() {
        assert!(parse_entry(&json!({"title": "orphan"}), PREVIEW).is_none());
        assert!(parse_entry(&json!({"id": "abc"}), PREVIEW).is_none());
        assert!(parse_entry(&json!({"id": 0}), PREVIEW).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "resultCount": 45,
            "results": [
                {"id": 1, "title": "a", "artist": "x", "creator": "m"},
                {"title": "skipped"},
                {"id": "2", "title": "b", "artist": "y", "creator": "n"}
            ]
        });

        let page = parse_search_response(&body, PREVIEW).unwrap();
        assert_eq!(page.total_results, 45);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].id.get(), 2);
    }

    #[test]
    fn test_parse_search_response_missing_fields() {
        let err = parse_search_response(&json!({"results": []}), PREVIEW).unwrap_err();
        assert!(matches!(err, CatalogClientError::InvalidResponse { .. }));

        let err = parse_search_response(&json!({"resultCount": 3}), PREVIEW).unwrap_err();
        assert!(err.to_string().contains("results"));

        let err = parse_search_response(&json!([1, 2, 3]), PREVIEW).unwrap_err();
        assert!(matches!(err, CatalogClientError::InvalidResponse { .. }));
    }

    #[test]
    fn test_parse_empty_page() {
        let page = parse_search_response(&json!({"resultCount": "0", "results": []}), PREVIEW)
            .unwrap();
        assert_eq!(page.total_results, 0);
        assert!(page.results.is_empty());
    }
}

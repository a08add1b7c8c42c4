//! Catalog client for searching beatmap sets and resolving their URLs.

mod search;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::CatalogConfig;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default catalog client using the reqwest HTTP backend.
pub type DefaultCatalogClient = CatalogClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the remote beatmap catalog.
///
/// Generic over an HTTP backend so tests can inject canned responses. Use
/// `DefaultCatalogClient` in production code.
pub struct CatalogClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: CatalogConfig,
}

impl DefaultCatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &CatalogClientConfig) -> CatalogClientResult<Self> {
        let internal_config = CatalogConfig::from_public(config)?;
        let backend = ReqwestBackend::new(&internal_config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }
}

impl<B: HttpBackend> CatalogClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: CatalogConfig, backend: B) -> Self {
        Self { backend, config }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::testing::FakeBackend;
    use serde_json::json;

    pub fn test_config() -> CatalogConfig {
        CatalogConfig::from_public(
            &CatalogClientConfig::new().with_search_url("https://catalog.test/osu/"),
        )
        .unwrap()
    }

    pub fn fake_set_json(id: u32, title: &str) -> serde_json::Value {
        json!({
            "id": id.to_string(),
            "title": title,
            "artist": "Artist",
            "creator": "Mapper",
        })
    }

    pub fn fake_client(backend: FakeBackend) -> CatalogClient<FakeBackend> {
        CatalogClient::with_backend(test_config(), backend)
    }

    #[test]
    fn test_default_client_creation() {
        let config = CatalogClientConfig::new();
        assert!(DefaultCatalogClient::new(&config).is_ok());
    }

    #[test]
    fn test_default_client_rejects_bad_url() {
        let config = CatalogClientConfig::new().with_search_url("not a url");
        assert!(DefaultCatalogClient::new(&config).is_err());
    }
}

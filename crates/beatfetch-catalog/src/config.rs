//! Public configuration for the catalog client.
//!
//! The internal config is derived from this when the client is built.

use std::time::Duration;

/// Placeholder substituted with the set identifier in URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Configuration for the catalog client.
///
/// # Example
///
/// ```
/// use beatfetch_catalog::CatalogClientConfig;
/// use std::time::Duration;
///
/// let config = CatalogClientConfig::new()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogClientConfig {
    /// Search endpoint
    pub(crate) search_url: String,
    /// Archive location template with an `{id}` placeholder
    pub(crate) download_url_template: String,
    /// Preview audio location template with an `{id}` placeholder
    pub(crate) preview_url_template: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for CatalogClientConfig {
    fn default() -> Self {
        Self {
            search_url: "https://bloodcat.com/osu/".to_string(),
            download_url_template: "https://bloodcat.com/osu/s/{id}".to_string(),
            preview_url_template: "https://b.ppy.sh/preview/{id}.mp3".to_string(),
            user_agent: concat!("beatfetch/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(15),
            max_retries: 1,
            retry_base_delay: Duration::from_millis(250),
        }
    }
}

impl CatalogClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search endpoint.
    #[must_use]
    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    /// Set the archive URL template. `{id}` is replaced with the set id.
    #[must_use]
    pub fn with_download_url_template(mut self, template: impl Into<String>) -> Self {
        self.download_url_template = template.into();
        self
    }

    /// Set the preview URL template. `{id}` is replaced with the set id.
    #[must_use]
    pub fn with_preview_url_template(mut self, template: impl Into<String>) -> Self {
        self.preview_url_template = template.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 15 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 1 retry.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 250ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

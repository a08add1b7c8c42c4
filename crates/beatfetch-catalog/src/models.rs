//! Internal types for the catalog client.
//!
//! Consumers see only the core port DTOs; these stay inside the crate.

use std::time::Duration;

use url::Url;

use crate::config::CatalogClientConfig;
use crate::error::CatalogClientResult;

/// Status filter value the catalog uses for ranked sets.
pub const RANKED_FILTER: &str = "1";

/// Status filter value covering every approval state.
pub const ALL_STATUS_FILTER: &str = "1,2,3,4,0,-1,-2";

/// Validated configuration used by the client at runtime.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Search endpoint
    pub search_url: Url,
    /// Archive URL template
    pub download_url_template: String,
    /// Preview URL template
    pub preview_url_template: String,
    /// User agent string
    pub user_agent: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub max_retries: u8,
    /// Base delay in milliseconds for exponential backoff
    pub retry_base_delay_ms: u64,
}

impl CatalogConfig {
    /// Validate the public configuration.
    pub fn from_public(config: &CatalogClientConfig) -> CatalogClientResult<Self> {
        Ok(Self {
            search_url: Url::parse(&config.search_url)?,
            download_url_template: config.download_url_template.clone(),
            preview_url_template: config.preview_url_template.clone(),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        })
    }
}

//! Error types for catalog client operations.
//!
//! These are mapped to the core `CatalogError` at the port boundary.

use thiserror::Error;

/// Result type alias for catalog client operations.
pub type CatalogClientResult<T> = Result<T, CatalogClientError>;

/// Errors raised inside the catalog client.
#[derive(Debug, Error)]
pub enum CatalogClientError {
    /// The service answered with an HTTP error status.
    #[error("Catalog request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The service returned an unusable payload.
    #[error("Invalid response from catalog: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl CatalogClientError {
    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

//! CLI-specific error types and mappings.
//!
//! Maps errors from the library crates to exit codes and user-facing
//! messages.

use beatfetch_catalog::CatalogClientError;
use beatfetch_core::{DownloadError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The catalog could not be reached or answered badly.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// One or more downloads did not complete.
    #[error("Download error: {0}")]
    Download(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Download(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Catalog(_) => 69,  // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<CatalogClientError> for CliError {
    fn from(err: CatalogClientError) -> Self {
        match err {
            CatalogClientError::InvalidUrl(e) => Self::Config(format!("catalog URL: {e}")),
            other => Self::Catalog(other.to_string()),
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(err: DownloadError) -> Self {
        Self::Download(err.user_message())
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

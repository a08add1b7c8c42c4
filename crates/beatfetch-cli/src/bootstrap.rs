//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. All concrete implementations are instantiated here:
//! - Catalog client (via beatfetch-catalog)
//! - Download executor and manager (via beatfetch-download)
//! - Search session (via beatfetch-session)
//!
//! Command handlers receive the composed context and never construct
//! adapters themselves.

use std::path::PathBuf;
use std::sync::Arc;

use beatfetch_catalog::{CatalogClientConfig, DefaultCatalogClient};
use beatfetch_core::{
    CatalogPort, NoopLibrary, NoopPreviewPlayer, SessionSettings, executor_channel,
};
use beatfetch_download::{
    DownloadManager, DownloadManagerDeps, ExecutorConfig, HttpDownloadExecutor,
    build_download_manager,
};
use beatfetch_session::{Session, SessionDeps, build_session};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Catalog search endpoint; the client default when `None`.
    pub catalog_url: Option<String>,
    /// Where archives are written.
    pub download_dir: PathBuf,
}

/// Composed adapters for CLI commands.
pub struct CliContext {
    /// Catalog client shared by every command.
    pub catalog: Arc<dyn CatalogPort>,
    /// Where archives are written.
    pub download_dir: PathBuf,
}

impl CliContext {
    /// Build a download manager backed by the HTTP executor.
    ///
    /// Must be called from within a tokio runtime.
    pub fn download_manager(&self) -> Result<DownloadManager, CliError> {
        let (tx, rx) = executor_channel();
        let executor = HttpDownloadExecutor::new(ExecutorConfig::new(&self.download_dir), tx)?;
        Ok(build_download_manager(DownloadManagerDeps {
            catalog: Arc::clone(&self.catalog),
            executor: Arc::new(executor),
            updates: rx,
        }))
    }

    /// Build a session without audio or library integration.
    ///
    /// Must be called from within a tokio runtime.
    pub fn session(&self, settings: SessionSettings) -> Result<Session, CliError> {
        let (tx, rx) = executor_channel();
        let executor = HttpDownloadExecutor::new(ExecutorConfig::new(&self.download_dir), tx)?;
        Ok(build_session(
            settings,
            SessionDeps {
                catalog: Arc::clone(&self.catalog),
                executor: Arc::new(executor),
                updates: rx,
                player: Arc::new(NoopPreviewPlayer),
                library: Arc::new(NoopLibrary),
            },
        )?)
    }
}

/// Compose the CLI context from its configuration.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let mut catalog_config = CatalogClientConfig::new();
    if let Some(url) = config.catalog_url {
        catalog_config = catalog_config.with_search_url(url);
    }
    let catalog = DefaultCatalogClient::new(&catalog_config)?;

    tracing::debug!(download_dir = %config.download_dir.display(), "bootstrapped CLI context");

    Ok(CliContext {
        catalog: Arc::new(catalog),
        download_dir: config.download_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: Option<&str>) -> CliConfig {
        CliConfig {
            catalog_url: url.map(str::to_string),
            download_dir: std::env::temp_dir(),
        }
    }

    #[test]
    fn test_bootstrap_with_defaults() {
        assert!(bootstrap(config(None)).is_ok());
    }

    #[test]
    fn test_bootstrap_rejects_bad_catalog_url() {
        let err = bootstrap(config(Some("not a url"))).err().unwrap();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[tokio::test]
    async fn test_context_builds_manager_and_session() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = bootstrap(CliConfig {
            catalog_url: None,
            download_dir: dir.path().to_path_buf(),
        })
        .unwrap();

        assert!(ctx.download_manager().unwrap().queue().is_empty());
        let session = ctx.session(SessionSettings::default()).unwrap();
        assert!(!session.is_searching());
    }
}

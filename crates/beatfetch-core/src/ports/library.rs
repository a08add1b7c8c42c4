//! Local beatmap library port.
//!
//! The library owns unpacking downloaded archives and indexing installed
//! sets. The orchestrator only asks whether a set is present and triggers a
//! bulk import of everything downloaded so far.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::BeatmapSetId;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Number of song directories added to the library.
    pub imported: usize,
}

impl ImportReport {
    /// Notice text for the presentation layer, if anything was imported.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self.imported {
            0 => None,
            1 => Some("Imported 1 new song.".to_string()),
            n => Some(format!("Imported {n} new songs.")),
        }
    }
}

/// Errors from library operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    /// Archives could not be unpacked or parsed.
    #[error("Import failed: {message}")]
    Failed {
        /// Description of the failure
        message: String,
    },
}

/// Port for the installed-beatmap store.
#[async_trait]
pub trait LibraryPort: Send + Sync {
    /// Whether the set is already installed.
    fn contains(&self, id: BeatmapSetId) -> bool;

    /// Unpack and index every pending archive.
    ///
    /// Dropping the future aborts the remaining work. Items imported before
    /// that point stay in the library.
    async fn import_all(&self) -> Result<ImportReport, ImportError>;
}

/// Library that is always empty and imports nothing.
pub struct NoopLibrary;

#[async_trait]
impl LibraryPort for NoopLibrary {
    fn contains(&self, _id: BeatmapSetId) -> bool {
        false
    }

    async fn import_all(&self) -> Result<ImportReport, ImportError> {
        Ok(ImportReport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_notice_pluralization() {
        assert_eq!(ImportReport { imported: 0 }.notice(), None);
        assert_eq!(
            ImportReport { imported: 1 }.notice().as_deref(),
            Some("Imported 1 new song.")
        );
        assert_eq!(
            ImportReport { imported: 4 }.notice().as_deref(),
            Some("Imported 4 new songs.")
        );
    }

    #[tokio::test]
    async fn test_noop_library() {
        let library = NoopLibrary;
        assert!(!library.contains(BeatmapSetId::new(1)));
        assert_eq!(library.import_all().await.unwrap().imported, 0);
    }
}

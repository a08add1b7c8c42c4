//! Bulk library import as a detached, interruptible task.

use std::sync::Arc;

use beatfetch_core::{ImportError, ImportReport, LibraryPort};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio_util::sync::CancellationToken;

/// How an import run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The importer ran to completion.
    Finished(ImportReport),
    /// The user interrupted it; whatever was imported stays imported.
    Interrupted,
    /// The importer reported an error.
    Failed(ImportError),
}

/// A running import.
pub struct ImportTask {
    cancel: CancellationToken,
    result: oneshot::Receiver<ImportOutcome>,
}

impl ImportTask {
    /// Start importing everything the library finds.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(library: Arc<dyn LibraryPort>) -> Self {
        let cancel = CancellationToken::new();
        let (tx, rx) = oneshot::channel();
        let token = cancel.clone();

        tracing::info!("starting library import");

        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;

                () = token.cancelled() => ImportOutcome::Interrupted,

                result = library.import_all() => match result {
                    Ok(report) => ImportOutcome::Finished(report),
                    Err(err) => ImportOutcome::Failed(err),
                },
            };
            let _ = tx.send(outcome);
        });

        Self { cancel, result: rx }
    }

    /// Ask the import to stop.
    pub fn interrupt(&self) {
        tracing::info!("interrupting library import");
        self.cancel.cancel();
    }

    /// The outcome once the task has ended, `None` while it runs.
    pub fn try_finish(&mut self) -> Option<ImportOutcome> {
        match self.result.try_recv() {
            Ok(outcome) => {
                match &outcome {
                    ImportOutcome::Finished(report) => {
                        tracing::info!(imported = report.imported, "library import finished");
                    }
                    ImportOutcome::Interrupted => tracing::info!("library import interrupted"),
                    ImportOutcome::Failed(err) => {
                        tracing::warn!(error = %err, "library import failed");
                    }
                }
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                tracing::warn!("library import task ended without a result");
                Some(ImportOutcome::Interrupted)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use beatfetch_core::BeatmapSetId;
    use mockall::mock;

    mock! {
        Library {}

        #[async_trait]
        impl LibraryPort for Library {
            fn contains(&self, id: BeatmapSetId) -> bool;
            async fn import_all(&self) -> Result<ImportReport, ImportError>;
        }
    }

    struct EndlessLibrary;

    #[async_trait]
    impl LibraryPort for EndlessLibrary {
        fn contains(&self, _id: BeatmapSetId) -> bool {
            false
        }

        async fn import_all(&self) -> Result<ImportReport, ImportError> {
            std::future::pending().await
        }
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_import_reports_count() {
        let mut library = MockLibrary::new();
        library
            .expect_import_all()
            .times(1)
            .returning(|| Ok(ImportReport { imported: 3 }));

        let mut task = ImportTask::spawn(Arc::new(library));
        settle().await;

        assert_eq!(
            task.try_finish(),
            Some(ImportOutcome::Finished(ImportReport { imported: 3 }))
        );
    }

    #[tokio::test]
    async fn test_import_failure() {
        let mut library = MockLibrary::new();
        library.expect_import_all().returning(|| {
            Err(ImportError::Failed {
                message: "songs directory missing".into(),
            })
        });

        let mut task = ImportTask::spawn(Arc::new(library));
        settle().await;

        assert!(matches!(task.try_finish(), Some(ImportOutcome::Failed(_))));
    }

    #[tokio::test]
    async fn test_interrupt() {
        let mut task = ImportTask::spawn(Arc::new(EndlessLibrary));
        settle().await;
        assert_eq!(task.try_finish(), None);

        task.interrupt();
        settle().await;
        assert_eq!(task.try_finish(), Some(ImportOutcome::Interrupted));
    }
}

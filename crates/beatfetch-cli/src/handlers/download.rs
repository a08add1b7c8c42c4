//! Download handler.

use beatfetch_core::{AddOutcome, BeatmapSetId, DownloadStatus};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::DownloadProgressView;

/// Execute the download command.
///
/// Queues every id, then applies executor reports until no job is active.
pub async fn execute(ctx: &CliContext, ids: &[BeatmapSetId]) -> Result<(), CliError> {
    tokio::fs::create_dir_all(&ctx.download_dir).await?;
    let mut manager = ctx.download_manager()?;

    for &id in ids {
        if manager.request(id, &id.to_string())? == AddOutcome::Duplicate {
            tracing::info!(%id, "listed more than once, downloading once");
        }
    }

    let view = DownloadProgressView::new(manager.queue());
    while manager.queue().active_count() > 0 {
        if !manager.next_update().await {
            break;
        }
        view.update(manager.queue());
    }
    view.update(manager.queue());

    let total = manager.queue().len();
    let mut failed = 0;
    for job in manager.queue().iter() {
        match (&job.status, &job.path) {
            (DownloadStatus::Complete, Some(path)) => {
                println!("{}: saved to {}", job.id, path.display());
            }
            _ => {
                failed += 1;
                println!("{}: {}", job.id, job.status_line());
            }
        }
    }

    if failed > 0 {
        return Err(CliError::Download(format!(
            "{failed} of {total} downloads did not complete"
        )));
    }
    Ok(())
}

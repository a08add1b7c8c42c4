//! One archive transfer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use beatfetch_core::{
    DownloadError, DownloadProgress, DownloadResult, ExecutorEvent, ExecutorHandle,
    ExecutorRequest, ExecutorUpdate, ExecutorUpdateSender,
};
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::progress::ProgressThrottle;

/// Everything a spawned transfer needs, owned.
pub struct Transfer {
    pub handle: ExecutorHandle,
    pub request: ExecutorRequest,
    pub client: reqwest::Client,
    pub download_dir: PathBuf,
    pub progress_interval: Duration,
    pub updates: ExecutorUpdateSender,
}

impl Transfer {
    /// Run to completion and return the final event.
    ///
    /// Cancellation is honored while waiting for a slot and while bytes are
    /// flowing. A partial file never outlives a cancelled or failed run.
    pub async fn run(self, permits: &Semaphore, cancel: &CancellationToken) -> ExecutorEvent {
        let _permit = tokio::select! {
            biased;

            () = cancel.cancelled() => return ExecutorEvent::Cancelled,

            permit = permits.acquire() => match permit {
                Ok(permit) => permit,
                Err(_) => {
                    return ExecutorEvent::Failed {
                        message: "Executor shut down".to_string(),
                    };
                }
            },
        };

        self.report(ExecutorEvent::Started);

        let final_path = self.download_dir.join(&self.request.file_name);
        let part_path = self
            .download_dir
            .join(format!("{}.part", self.request.file_name));

        let result = tokio::select! {
            biased;

            () = cancel.cancelled() => Err(DownloadError::Cancelled),

            result = self.stream_to(&part_path) => result,
        };

        // A cancel that lands after the last chunk still wins.
        let result = match result {
            Ok(()) if cancel.is_cancelled() => Err(DownloadError::Cancelled),
            other => other,
        };

        match result {
            Ok(()) => match tokio::fs::rename(&part_path, &final_path).await {
                Ok(()) => ExecutorEvent::Completed { path: final_path },
                Err(e) => {
                    discard_partial(&part_path).await;
                    ExecutorEvent::Failed {
                        message: DownloadError::from_io_error(&e).user_message(),
                    }
                }
            },
            Err(err) => {
                discard_partial(&part_path).await;
                if err.is_cancelled() {
                    ExecutorEvent::Cancelled
                } else {
                    tracing::warn!(handle = %self.handle, id = %self.request.id, error = %err, "transfer failed");
                    ExecutorEvent::Failed {
                        message: err.user_message(),
                    }
                }
            }
        }
    }

    /// Write the response body to `part_path`.
    async fn stream_to(&self, part_path: &Path) -> DownloadResult<()> {
        let mut response = self
            .client
            .get(&self.request.url)
            .send()
            .await
            .map_err(|e| DownloadError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::network_with_status(
                format!("server answered {status}"),
                status.as_u16(),
            ));
        }

        let total = response.content_length();
        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;
        let mut file = tokio::fs::File::create(part_path)
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;

        let mut throttle = ProgressThrottle::new(self.progress_interval);
        let mut downloaded: u64 = 0;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| DownloadError::network(e.to_string()))?
        {
            file.write_all(&chunk)
                .await
                .map_err(|e| DownloadError::from_io_error(&e))?;
            downloaded += chunk.len() as u64;

            let progress = DownloadProgress::new(downloaded, total);
            if throttle.should_emit(&progress) {
                // Flush so the partial file reflects what was reported.
                file.flush()
                    .await
                    .map_err(|e| DownloadError::from_io_error(&e))?;
                self.report(ExecutorEvent::Progress(progress));
            }
        }

        file.flush()
            .await
            .map_err(|e| DownloadError::from_io_error(&e))?;
        Ok(())
    }

    fn report(&self, event: ExecutorEvent) {
        let update = ExecutorUpdate {
            handle: self.handle,
            event,
        };
        if self.updates.send(update).is_err() {
            tracing::debug!(handle = %self.handle, "update receiver dropped");
        }
    }
}

async fn discard_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial download"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove partial download"),
    }
}

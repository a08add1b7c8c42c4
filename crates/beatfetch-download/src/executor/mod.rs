//! HTTP download executor.
//!
//! Streams an archive to `<dir>/<name>.part`, renames it to `<dir>/<name>`
//! on success and removes the partial file on cancellation or failure.
//! Every transfer runs as a detached task; lifecycle changes are reported
//! on the executor update channel.

mod config;
mod transfer;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use beatfetch_core::{
    DownloadError, DownloadExecutorPort, DownloadResult, ExecutorHandle, ExecutorRequest,
    ExecutorUpdate, ExecutorUpdateSender,
};
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

pub use config::ExecutorConfig;
use transfer::Transfer;

type ActiveMap = Arc<Mutex<HashMap<ExecutorHandle, CancellationToken>>>;

/// Download executor backed by reqwest.
pub struct HttpDownloadExecutor {
    client: reqwest::Client,
    config: ExecutorConfig,
    updates: ExecutorUpdateSender,
    runtime: Handle,
    permits: Arc<Semaphore>,
    active: ActiveMap,
    next_handle: AtomicU64,
}

impl HttpDownloadExecutor {
    /// Create an executor reporting on `updates`.
    ///
    /// Must be called from within a tokio runtime; transfers are spawned
    /// onto that runtime.
    pub fn new(config: ExecutorConfig, updates: ExecutorUpdateSender) -> DownloadResult<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| DownloadError::other(format!("no async runtime: {e}")))?;

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| DownloadError::other(format!("failed to create HTTP client: {e}")))?;

        let permits = Arc::new(Semaphore::new(config.max_concurrent.max(1)));

        Ok(Self {
            client,
            config,
            updates,
            runtime,
            permits,
            active: Arc::new(Mutex::new(HashMap::new())),
            next_handle: AtomicU64::new(1),
        })
    }

    /// Number of transfers that have not reported a final event yet.
    pub fn active_count(&self) -> usize {
        lock(&self.active).len()
    }

    /// Cancel every running transfer. Returns how many were signalled.
    pub fn shutdown(&self) -> usize {
        let active = lock(&self.active);
        for token in active.values() {
            token.cancel();
        }
        active.len()
    }
}

fn lock(active: &ActiveMap) -> MutexGuard<'_, HashMap<ExecutorHandle, CancellationToken>> {
    active.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DownloadExecutorPort for HttpDownloadExecutor {
    fn submit(&self, request: ExecutorRequest) -> ExecutorHandle {
        let handle = ExecutorHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed));
        let cancel = CancellationToken::new();
        lock(&self.active).insert(handle, cancel.clone());

        tracing::debug!(%handle, id = %request.id, url = %request.url, "submitting transfer");

        let transfer = Transfer {
            handle,
            request,
            client: self.client.clone(),
            download_dir: self.config.download_dir.clone(),
            progress_interval: self.config.progress_interval,
            updates: self.updates.clone(),
        };
        let permits = Arc::clone(&self.permits);
        let active = Arc::clone(&self.active);
        let updates = self.updates.clone();

        self.runtime.spawn(async move {
            let event = transfer.run(&permits, &cancel).await;
            lock(&active).remove(&handle);
            tracing::debug!(%handle, ?event, "transfer finished");
            if updates.send(ExecutorUpdate { handle, event }).is_err() {
                tracing::debug!(%handle, "update receiver dropped");
            }
        });

        handle
    }

    fn cancel(&self, handle: ExecutorHandle) {
        if let Some(token) = lock(&self.active).get(&handle) {
            tracing::debug!(%handle, "cancelling transfer");
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatfetch_core::{BeatmapSetId, ExecutorEvent, ExecutorUpdateReceiver, executor_channel};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    enum Reply {
        Body(Vec<u8>),
        Status(u16),
        /// Send headers and `sent` bytes of a larger body, then stall.
        Stall { sent: usize, total: usize },
    }

    /// Serve a single HTTP response on a local port.
    async fn serve(reply: Reply) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let mut read = Vec::new();
            while !read.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                read.extend_from_slice(&buf[..n]);
            }

            match reply {
                Reply::Body(body) => {
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    );
                    socket.write_all(head.as_bytes()).await.unwrap();
                    socket.write_all(&body).await.unwrap();
                }
                Reply::Status(code) => {
                    let head = format!(
                        "HTTP/1.1 {code} Nope\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    );
                    socket.write_all(head.as_bytes()).await.unwrap();
                }
                Reply::Stall { sent, total } => {
                    let head = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {total}\r\nConnection: close\r\n\r\n"
                    );
                    socket.write_all(head.as_bytes()).await.unwrap();
                    socket.write_all(&vec![7u8; sent]).await.unwrap();
                    socket.flush().await.unwrap();
                    tokio::time::sleep(Duration::from_secs(30)).await;
                }
            }
        });

        format!("http://{addr}/archive")
    }

    fn request(url: String) -> ExecutorRequest {
        ExecutorRequest {
            id: BeatmapSetId::new(42),
            url,
            file_name: "42.osz".to_string(),
        }
    }

    async fn collect_until_final(rx: &mut ExecutorUpdateReceiver) -> Vec<ExecutorEvent> {
        let mut events = Vec::new();
        while let Some(update) = rx.recv().await {
            let done = update.event.is_final();
            events.push(update.event);
            if done {
                break;
            }
        }
        events
    }

    fn executor(dir: &std::path::Path) -> (HttpDownloadExecutor, ExecutorUpdateReceiver) {
        let (tx, rx) = executor_channel();
        let config = ExecutorConfig::new(dir).with_progress_interval(Duration::ZERO);
        (HttpDownloadExecutor::new(config, tx).unwrap(), rx)
    }

    #[test]
    fn test_new_requires_runtime() {
        let (tx, _rx) = executor_channel();
        let result = HttpDownloadExecutor::new(ExecutorConfig::new("/tmp"), tx);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_download_success_renames_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, mut rx) = executor(dir.path());
        let url = serve(Reply::Body(b"archive-bytes".to_vec())).await;

        executor.submit(request(url));
        let events = collect_until_final(&mut rx).await;

        assert_eq!(events.first(), Some(&ExecutorEvent::Started));
        let final_path = dir.path().join("42.osz");
        assert_eq!(
            events.last(),
            Some(&ExecutorEvent::Completed {
                path: final_path.clone()
            })
        );
        assert_eq!(std::fs::read(&final_path).unwrap(), b"archive-bytes");
        assert!(!dir.path().join("42.osz.part").exists());
        assert_eq!(executor.active_count(), 0);
    }

    #[tokio::test]
    async fn test_http_error_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, mut rx) = executor(dir.path());
        let url = serve(Reply::Status(404)).await;

        executor.submit(request(url));
        let events = collect_until_final(&mut rx).await;

        assert!(matches!(events.last(), Some(ExecutorEvent::Failed { .. })));
        assert!(!dir.path().join("42.osz.part").exists());
        assert!(!dir.path().join("42.osz").exists());
    }

    #[tokio::test]
    async fn test_cancel_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, mut rx) = executor(dir.path());
        let url = serve(Reply::Stall {
            sent: 1024,
            total: 1 << 20,
        })
        .await;

        let handle = executor.submit(request(url));

        // Wait until bytes have hit the partial file.
        loop {
            let update = rx.recv().await.unwrap();
            if matches!(update.event, ExecutorEvent::Progress(p) if p.downloaded > 0) {
                break;
            }
        }
        assert!(dir.path().join("42.osz.part").exists());

        executor.cancel(handle);
        let events = collect_until_final(&mut rx).await;

        assert_eq!(events.last(), Some(&ExecutorEvent::Cancelled));
        assert!(!dir.path().join("42.osz.part").exists());
        assert!(!dir.path().join("42.osz").exists());
    }

    #[tokio::test]
    async fn test_cancel_unknown_handle_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, _rx) = executor(dir.path());
        executor.cancel(ExecutorHandle::new(999));
        assert_eq!(executor.shutdown(), 0);
    }

    #[tokio::test]
    async fn test_handles_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let (executor, _rx) = executor(dir.path());
        let a = executor.submit(request("http://127.0.0.1:9/a".to_string()));
        let b = executor.submit(request("http://127.0.0.1:9/b".to_string()));
        assert_ne!(a, b);
        executor.shutdown();
    }
}

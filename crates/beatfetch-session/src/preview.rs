//! Audio preview controller.
//!
//! At most one preview plays at a time. Playback runs as a detached task
//! that reports back on a channel; the controller drains those reports in
//! [`PreviewController::poll`] so the foreground never waits on audio.

use std::sync::Arc;

use beatfetch_core::{BeatmapSetId, PreviewError, PreviewPlayerPort};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Notice shown when the player cannot load a preview.
pub const LOAD_FAILED_NOTICE: &str = "Failed to load track preview.";

/// Notice shown when a preview location cannot be resolved.
pub const BAD_URL_NOTICE: &str = "Could not load track preview (bad URL).";

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewToggle {
    /// A new preview is starting.
    Started,
    /// The preview for this id was playing and has been stopped.
    Stopped,
}

struct ActivePreview {
    id: BeatmapSetId,
    generation: u64,
    cancel: CancellationToken,
}

struct PlaybackFinished {
    generation: u64,
    result: Result<(), PreviewError>,
}

/// Starts, stops and tracks the single active preview.
pub struct PreviewController {
    player: Arc<dyn PreviewPlayerPort>,
    current: Option<ActivePreview>,
    generation: u64,
    finished_tx: mpsc::UnboundedSender<PlaybackFinished>,
    finished_rx: mpsc::UnboundedReceiver<PlaybackFinished>,
}

impl PreviewController {
    pub fn new(player: Arc<dyn PreviewPlayerPort>) -> Self {
        let (finished_tx, finished_rx) = mpsc::unbounded_channel();
        Self {
            player,
            current: None,
            generation: 0,
            finished_tx,
            finished_rx,
        }
    }

    /// Id of the preview currently playing.
    pub fn previewing(&self) -> Option<BeatmapSetId> {
        self.current.as_ref().map(|active| active.id)
    }

    /// Stop `id` if it is playing, otherwise replace whatever plays with it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle(&mut self, id: BeatmapSetId, url: String) -> PreviewToggle {
        if self.previewing() == Some(id) {
            self.stop();
            return PreviewToggle::Stopped;
        }
        self.stop();

        self.generation += 1;
        let generation = self.generation;
        let cancel = CancellationToken::new();
        let player = Arc::clone(&self.player);
        let finished = self.finished_tx.clone();
        let token = cancel.clone();

        tracing::debug!(%id, url = %url, "starting preview");

        tokio::spawn(async move {
            tokio::select! {
                biased;

                () = token.cancelled() => {}

                result = player.play(&url) => {
                    let _ = finished.send(PlaybackFinished { generation, result });
                }
            }
        });

        self.current = Some(ActivePreview {
            id,
            generation,
            cancel,
        });
        PreviewToggle::Started
    }

    /// Stop the playing preview. Safe to call with nothing playing.
    pub fn stop(&mut self) {
        if let Some(active) = self.current.take() {
            tracing::debug!(id = %active.id, "stopping preview");
            active.cancel.cancel();
            self.player.stop();
        }
    }

    /// Apply finished playbacks. Returns notices for failed ones.
    pub fn poll(&mut self) -> Vec<String> {
        let mut notices = Vec::new();
        while let Ok(finished) = self.finished_rx.try_recv() {
            if self
                .current
                .as_ref()
                .is_some_and(|active| active.generation == finished.generation)
            {
                self.current = None;
            }
            if let Err(err) = finished.result {
                tracing::warn!(error = %err, "preview playback failed");
                notices.push(notice_for(&err).to_string());
            }
        }
        notices
    }
}

/// User-facing notice for a playback error.
pub const fn notice_for(err: &PreviewError) -> &'static str {
    match err {
        PreviewError::BadUrl { .. } => BAD_URL_NOTICE,
        PreviewError::Load { .. } => LOAD_FAILED_NOTICE,
    }
}

//! Audio preview port.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the preview audio line.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreviewError {
    /// The preview location could not be used.
    #[error("Bad preview URL: {url}")]
    BadUrl {
        /// The rejected location
        url: String,
    },

    /// The audio could not be fetched or decoded.
    #[error("Failed to load track preview: {message}")]
    Load {
        /// Description of the failure
        message: String,
    },
}

/// Port for the audio line that plays track previews.
#[async_trait]
pub trait PreviewPlayerPort: Send + Sync {
    /// Resolve and play `url`, returning once playback has stopped on its own.
    ///
    /// The caller may drop the future at any point; `stop` is called
    /// afterwards to silence the line.
    async fn play(&self, url: &str) -> Result<(), PreviewError>;

    /// Silence the line. Safe to call with nothing playing.
    fn stop(&self);
}

/// Player that plays nothing and finishes immediately.
///
/// Used by front ends without an audio device.
pub struct NoopPreviewPlayer;

#[async_trait]
impl PreviewPlayerPort for NoopPreviewPlayer {
    async fn play(&self, _url: &str) -> Result<(), PreviewError> {
        Ok(())
    }

    fn stop(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_player_finishes_immediately() {
        let player = NoopPreviewPlayer;
        assert!(player.play("https://example.com/1.mp3").await.is_ok());
        player.stop();
    }
}

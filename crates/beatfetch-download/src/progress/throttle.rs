//! Progress throttling.
//!
//! Archives arrive in many small chunks; reporting each one would flood the
//! update channel the foreground drains once per frame.

use std::time::{Duration, Instant};

use beatfetch_core::DownloadProgress;

/// Rate-limiter for executor progress reports.
///
/// A report passes when the interval has elapsed since the last one, or when
/// it marks the end of the transfer.
#[derive(Debug)]
pub struct ProgressThrottle {
    last_emit: Option<Instant>,
    min_interval: Duration,
}

impl ProgressThrottle {
    /// Create a new throttle with the specified minimum interval.
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            last_emit: None,
            min_interval,
        }
    }

    /// Decide whether `progress` should be reported at `now`.
    pub fn should_emit_at(&mut self, progress: &DownloadProgress, now: Instant) -> bool {
        let finished = progress.total.is_some_and(|total| progress.downloaded >= total);
        let due = self
            .last_emit
            .is_none_or(|last| now.duration_since(last) >= self.min_interval);

        if finished || due {
            self.last_emit = Some(now);
            true
        } else {
            false
        }
    }

    /// Decide whether `progress` should be reported now.
    pub fn should_emit(&mut self, progress: &DownloadProgress) -> bool {
        self.should_emit_at(progress, Instant::now())
    }
}

impl Default for ProgressThrottle {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_first_emit() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(100));
        assert!(throttle.should_emit(&DownloadProgress::new(1, None)));
    }

    #[test]
    fn test_throttle_respects_interval() {
        let mut throttle = ProgressThrottle::new(Duration::from_millis(50));
        let start = Instant::now();
        let progress = DownloadProgress::new(10, Some(100));

        assert!(throttle.should_emit_at(&progress, start));
        assert!(!throttle.should_emit_at(&progress, start + Duration::from_millis(10)));
        assert!(throttle.should_emit_at(&progress, start + Duration::from_millis(60)));
    }

    #[test]
    fn test_throttle_always_emits_completion() {
        let mut throttle = ProgressThrottle::new(Duration::from_secs(10));
        let start = Instant::now();

        assert!(throttle.should_emit_at(&DownloadProgress::new(10, Some(100)), start));
        assert!(throttle.should_emit_at(&DownloadProgress::new(100, Some(100)), start));
    }
}

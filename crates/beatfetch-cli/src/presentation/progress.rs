//! Download progress rendering.
//!
//! One bar per job, drawn with indicatif. Bars are hidden automatically
//! when stderr is not a terminal.

use beatfetch_core::BeatmapSetId;
use beatfetch_download::DownloadQueue;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress bars mirroring the jobs of a [`DownloadQueue`].
pub struct DownloadProgressView {
    _multi: MultiProgress,
    bars: Vec<(BeatmapSetId, ProgressBar)>,
}

impl DownloadProgressView {
    /// Create one bar for every job currently in `queue`.
    pub fn new(queue: &DownloadQueue) -> Self {
        let multi = MultiProgress::new();
        let bars = queue
            .iter()
            .map(|job| {
                let bar = multi.add(ProgressBar::new(0));
                bar.set_style(bar_style());
                bar.set_prefix(job.id.to_string());
                bar.set_message(job.status_line());
                (job.id, bar)
            })
            .collect();
        Self {
            _multi: multi,
            bars,
        }
    }

    /// Redraw every bar from the queue.
    pub fn update(&self, queue: &DownloadQueue) {
        for (id, bar) in &self.bars {
            let Some(job) = queue.job(*id) else {
                continue;
            };
            if bar.is_finished() {
                continue;
            }
            if let Some(total) = job.progress.total {
                bar.set_length(total);
            }
            bar.set_position(job.progress.downloaded);
            if job.status.is_terminal() {
                bar.finish_with_message(job.status_line());
            } else {
                bar.set_message(job.status_line());
            }
        }
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:>10} {bar:28.cyan/blue} {bytes:>9} / {total_bytes:>9} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
}

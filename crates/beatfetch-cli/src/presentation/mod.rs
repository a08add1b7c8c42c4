//! Terminal output for CLI commands.

pub mod progress;
pub mod tables;

pub use progress::DownloadProgressView;
pub use tables::{print_results, truncate_string};
